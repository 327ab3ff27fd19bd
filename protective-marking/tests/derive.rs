//! Compile tests for the `Vocabulary` derive used from a downstream crate.
//!
//! These verify that the generated impls resolve `protective_marking` by its
//! external name and satisfy the trait's serde bounds.

#[test]
fn derive_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/*.rs");
}
