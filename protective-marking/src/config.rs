//! Process-wide configuration.
//!
//! Values resolve lazily on first access, with this precedence:
//! 1. [`init`] with an explicit [`Config`]
//! 2. environment variables ([`PRODUCTION_MODE_ENV`], [`RELEASABILITY_ORDER_ENV`],
//!    [`DATE_TIME_FORMAT_ENV`], `PROTECTIVE_MARKING_<SCHEME>_DEVELOPMENT_NAMES`)
//! 3. TOML files: the path in [`CONFIG_FILE_ENV`], then [`DEFAULT_CONFIG_FILE`] in the
//!    working directory
//! 4. defaults: development mode, alliance-first ordering, [`DEFAULT_DATE_TIME_FORMAT`],
//!    built-in development names
//!
//! Bad values from the environment or files are logged and skipped. Bad values
//! handed to the `Config` builder methods are returned as [`ConfigError`].
//!
//! [`reset`] drops the cached configuration so the next access reloads it.
//! [`init_from_env`] loads with the logger it is given. A lazy load logs to the
//! logger installed with [`set_load_logger`], or nowhere if none is set.
//!
//! ```toml
//! production_mode = false
//! releasability_order = "home-first"
//! date_time_format = "%d %B %Y %H:%M"
//!
//! [development_names]
//! nzl = ["TEST-U", "TEST-IC", "TEST-S", "TEST-R", "TEST-C", "TEST-SEC", "TEST-TS"]
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    env, fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, PoisonError, RwLock},
};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use slog::{debug, o, warn, Discard, Logger};
use thiserror::Error;

use crate::{schemes, SchemeProfile};

/// Enables production classification names when `true`.
pub const PRODUCTION_MODE_ENV: &str = "PROTECTIVE_MARKING_PRODUCTION_MODE";
/// `home-first` or `alliance-first`.
pub const RELEASABILITY_ORDER_ENV: &str = "PROTECTIVE_MARKING_RELEASABILITY_ORDER";
/// `strftime` pattern for dates rendered inside markings.
pub const DATE_TIME_FORMAT_ENV: &str = "PROTECTIVE_MARKING_DATE_TIME_FORMAT";
/// Path of a TOML configuration file.
pub const CONFIG_FILE_ENV: &str = "PROTECTIVE_MARKING_CONFIG_FILE";
/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "protective-marking.toml";
/// Renders 15 May 2025, 14:34 as `2025-05-15 14:34`.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

static CURRENT: RwLock<Option<Arc<Config>>> = RwLock::new(None);
static LOAD_LOGGER: RwLock<Option<Logger>> = RwLock::new(None);

/// Name of the environment variable overriding a scheme's development names.
///
/// The value is a comma separated list, lowest rung first.
pub fn development_names_env(scheme_key: &str) -> String {
    format!(
        "PROTECTIVE_MARKING_{}_DEVELOPMENT_NAMES",
        scheme_key.to_ascii_uppercase()
    )
}

/// Errors from building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
    #[error("invalid development names for scheme '{scheme}': {reason}")]
    DevelopmentNames { scheme: String, reason: String },
    #[error("invalid date time format '{format}'")]
    DateTimeFormat { format: String },
}

/// How releasable-to destinations are ordered.
///
/// Ordering is cosmetic: it changes rendering, never validity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasabilityOrder {
    /// The scheme's home nation first, then lexicographic.
    HomeFirst,
    /// The alliance block (lexicographic), then everything else (lexicographic).
    #[default]
    AllianceFirst,
}

impl ReleasabilityOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HomeFirst => "home-first",
            Self::AllianceFirst => "alliance-first",
        }
    }
}

impl fmt::Display for ReleasabilityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleasabilityOrder {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home-first" => Ok(Self::HomeFirst),
            "alliance-first" => Ok(Self::AllianceFirst),
            _ => Err(ConfigError::InvalidValue {
                key: RELEASABILITY_ORDER_ENV.to_owned(),
                value: value.to_owned(),
            }),
        }
    }
}

/// Resolved configuration.
#[derive(Clone)]
pub struct Config {
    production_mode: bool,
    releasability_order: ReleasabilityOrder,
    date_time_format: String,
    development_names: BTreeMap<String, Vec<String>>,
    logger: Logger,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("production_mode", &self.production_mode)
            .field("releasability_order", &self.releasability_order)
            .field("date_time_format", &self.date_time_format)
            .field("development_names", &self.development_names)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            production_mode: false,
            releasability_order: ReleasabilityOrder::default(),
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_owned(),
            development_names: BTreeMap::new(),
            logger: Logger::root(Discard, o!()),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_production_mode(mut self, production_mode: bool) -> Self {
        self.production_mode = production_mode;
        self
    }

    pub fn with_releasability_order(mut self, order: ReleasabilityOrder) -> Self {
        self.releasability_order = order;
        self
    }

    /// Sets the `strftime` pattern used for dates inside markings.
    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Result<Self, ConfigError> {
        let format = format.into();
        validate_date_time_format(&format)?;
        self.date_time_format = format;
        Ok(self)
    }

    /// Replaces the development names of one scheme.
    ///
    /// The names must match the ladder length, be unique, non-blank, and
    /// disjoint from the production names.
    pub fn with_development_names<I, N>(
        mut self,
        scheme_key: &str,
        names: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_development_names(scheme_key, &names)?;
        self.development_names.insert(scheme_key.to_owned(), names);
        Ok(self)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn production_mode(&self) -> bool {
        self.production_mode
    }

    pub fn releasability_order(&self) -> ReleasabilityOrder {
        self.releasability_order
    }

    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Active display names for a scheme's ladder, lowest rung first.
    pub fn classification_names(&self, profile: &SchemeProfile) -> Vec<String> {
        if self.production_mode {
            return profile
                .classifications
                .iter()
                .map(|name| (*name).to_owned())
                .collect();
        }
        match self.development_names.get(profile.key) {
            Some(names) => names.clone(),
            None => profile
                .development_classifications
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    /// Parses a TOML document. Invalid development names are an error.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: "inline TOML".to_owned(),
            source,
        })?;
        file.into_config()
    }

    /// Reads a TOML file. Invalid development names are an error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_file(path.as_ref())?.into_config()
    }

    /// Resolves environment variables, then configuration files, then defaults.
    pub fn load() -> Self {
        Self::load_with_logger(Logger::root(Discard, o!()))
    }

    /// Like [`Config::load`], logging each resolved value and each skipped source.
    pub fn load_with_logger(logger: Logger) -> Self {
        let mut layered = Layered::default();
        layered.fill_from(env_layer(&logger), "environment", &logger);

        let mut files = Vec::new();
        if let Some(path) = env::var_os(CONFIG_FILE_ENV) {
            files.push((PathBuf::from(path), true));
        }
        files.push((PathBuf::from(DEFAULT_CONFIG_FILE), false));

        for (path, explicit) in files {
            if !explicit && !path.exists() {
                continue;
            }
            match read_file(&path) {
                Ok(file) => layered.fill_from(file, &path.display().to_string(), &logger),
                Err(err) => warn!(logger, "skipping configuration file"; "error" => %err),
            }
        }

        layered.finish(logger)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    production_mode: Option<bool>,
    releasability_order: Option<ReleasabilityOrder>,
    date_time_format: Option<String>,
    development_names: BTreeMap<String, Vec<String>>,
}

impl FileConfig {
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        if let Some(production_mode) = self.production_mode {
            config = config.with_production_mode(production_mode);
        }
        if let Some(order) = self.releasability_order {
            config = config.with_releasability_order(order);
        }
        if let Some(format) = self.date_time_format {
            config = config.with_date_time_format(format)?;
        }
        for (key, names) in self.development_names {
            config = config.with_development_names(&key, names)?;
        }
        Ok(config)
    }
}

/// Values gathered so far; earlier sources win.
#[derive(Debug, Default)]
struct Layered {
    production_mode: Option<bool>,
    releasability_order: Option<ReleasabilityOrder>,
    date_time_format: Option<String>,
    development_names: BTreeMap<String, Vec<String>>,
}

impl Layered {
    fn fill_from(&mut self, source: FileConfig, origin: &str, logger: &Logger) {
        if self.production_mode.is_none() {
            if let Some(value) = source.production_mode {
                debug!(logger, "resolved production mode"; "source" => origin, "value" => value);
                self.production_mode = Some(value);
            }
        }
        if self.releasability_order.is_none() {
            if let Some(value) = source.releasability_order {
                debug!(logger, "resolved releasability order"; "source" => origin, "value" => %value);
                self.releasability_order = Some(value);
            }
        }
        if self.date_time_format.is_none() {
            if let Some(value) = source.date_time_format {
                match validate_date_time_format(&value) {
                    Ok(()) => {
                        debug!(logger, "resolved date time format"; "source" => origin, "value" => &value);
                        self.date_time_format = Some(value);
                    }
                    Err(err) => {
                        warn!(logger, "ignoring date time format"; "source" => origin, "error" => %err);
                    }
                }
            }
        }
        for (scheme, names) in source.development_names {
            if self.development_names.contains_key(&scheme) {
                continue;
            }
            match validate_development_names(&scheme, &names) {
                Ok(()) => {
                    debug!(logger, "resolved development names"; "source" => origin, "scheme" => &scheme);
                    self.development_names.insert(scheme, names);
                }
                Err(err) => {
                    warn!(logger, "ignoring development names"; "source" => origin, "error" => %err);
                }
            }
        }
    }

    fn finish(self, logger: Logger) -> Config {
        Config {
            production_mode: self.production_mode.unwrap_or(false),
            releasability_order: self.releasability_order.unwrap_or_default(),
            date_time_format: self
                .date_time_format
                .unwrap_or_else(|| DEFAULT_DATE_TIME_FORMAT.to_owned()),
            development_names: self.development_names,
            logger,
        }
    }
}

fn env_layer(logger: &Logger) -> FileConfig {
    let mut layer = FileConfig::default();
    if let Ok(value) = env::var(PRODUCTION_MODE_ENV) {
        match parse_bool(&value) {
            Some(flag) => layer.production_mode = Some(flag),
            None => warn!(logger, "ignoring invalid value"; "key" => PRODUCTION_MODE_ENV, "value" => &value),
        }
    }
    if let Ok(value) = env::var(RELEASABILITY_ORDER_ENV) {
        match value.parse() {
            Ok(order) => layer.releasability_order = Some(order),
            Err(err) => warn!(logger, "ignoring invalid value"; "error" => %err),
        }
    }
    if let Ok(value) = env::var(DATE_TIME_FORMAT_ENV) {
        layer.date_time_format = Some(value);
    }
    for profile in schemes::profiles() {
        if let Ok(value) = env::var(development_names_env(profile.key)) {
            let names = value.split(',').map(|name| name.trim().to_owned()).collect();
            layer.development_names.insert(profile.key.to_owned(), names);
        }
    }
    layer
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_date_time_format(format: &str) -> Result<(), ConfigError> {
    let invalid = format.trim().is_empty()
        || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if invalid {
        return Err(ConfigError::DateTimeFormat {
            format: format.to_owned(),
        });
    }
    Ok(())
}

fn validate_development_names(scheme_key: &str, names: &[String]) -> Result<(), ConfigError> {
    let fail = |reason: String| ConfigError::DevelopmentNames {
        scheme: scheme_key.to_owned(),
        reason,
    };
    let profile = schemes::profile(scheme_key).ok_or_else(|| fail("unknown scheme".to_owned()))?;
    if names.len() != profile.classifications.len() {
        return Err(fail(format!(
            "expected {} names, got {}",
            profile.classifications.len(),
            names.len()
        )));
    }
    let mut seen = BTreeSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(fail("names must not be blank".to_owned()));
        }
        if profile.classifications.iter().any(|production| *production == name.as_str()) {
            return Err(fail(format!("'{name}' is a production name")));
        }
        if !seen.insert(name.as_str()) {
            return Err(fail(format!("'{name}' appears more than once")));
        }
    }
    Ok(())
}

/// Returns the active configuration, loading it on first use.
///
/// The first-use load goes through [`Config::load_with_logger`] with the logger
/// given to [`set_load_logger`], and the loaded configuration keeps that logger.
/// Without one, the load is silent and the loaded configuration discards its
/// records. [`init_from_env`] loads eagerly with an explicit logger instead.
pub fn current() -> Arc<Config> {
    {
        let guard = CURRENT.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = guard.as_ref() {
            return Arc::clone(config);
        }
    }
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(guard.get_or_insert_with(|| Arc::new(lazy_load())))
}

/// Sets the logger used by the first-use load in [`current`]. `None` restores
/// the silent default.
///
/// A configuration that is already active is left alone; call [`reset`] to load
/// again.
pub fn set_load_logger(logger: impl Into<Option<Logger>>) {
    let mut guard = LOAD_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    *guard = logger.into();
}

fn lazy_load() -> Config {
    let logger = LOAD_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    match logger {
        Some(logger) => Config::load_with_logger(logger),
        None => Config::load(),
    }
}

/// Installs `config`, replacing whatever was active.
pub fn init(config: Config) -> Arc<Config> {
    let config = Arc::new(config);
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::clone(&config));
    config
}

/// Loads from the environment and files, logging through `logger`, and installs
/// the result.
pub fn init_from_env(logger: Logger) -> Arc<Config> {
    init(Config::load_with_logger(logger))
}

/// Drops the active configuration. The next access reloads it.
pub fn reset() {
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

pub fn production_mode() -> bool {
    current().production_mode()
}

pub fn releasability_order() -> ReleasabilityOrder {
    current().releasability_order()
}

pub fn date_time_format() -> String {
    current().date_time_format().to_owned()
}

pub fn logger() -> Logger {
    current().logger().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::{AUSTRALIA, NEW_ZEALAND};

    fn nzl_test_names() -> Vec<&'static str> {
        vec![
            "TEST-U", "TEST-IC", "TEST-S", "TEST-R", "TEST-C", "TEST-SEC", "TEST-TS",
        ]
    }

    #[test]
    fn defaults_are_development_and_alliance_first() {
        let config = Config::default();
        assert!(!config.production_mode());
        assert_eq!(config.releasability_order(), ReleasabilityOrder::AllianceFirst);
        assert_eq!(
            config.classification_names(&AUSTRALIA)[3],
            "Development PROTECTED"
        );
    }

    #[test]
    fn production_mode_uses_production_names() {
        let config = Config::new().with_production_mode(true);
        assert_eq!(config.classification_names(&AUSTRALIA)[2], "OFFICIAL: Sensitive");
    }

    #[test]
    fn development_names_override_one_scheme() {
        let config = Config::new()
            .with_development_names("nzl", nzl_test_names())
            .unwrap();
        assert_eq!(config.classification_names(&NEW_ZEALAND)[6], "TEST-TS");
        assert_eq!(
            config.classification_names(&AUSTRALIA)[0],
            "Development UNOFFICIAL"
        );
    }

    #[test]
    fn development_names_must_match_ladder_length() {
        let err = Config::new()
            .with_development_names("nzl", ["ONLY-ONE"])
            .unwrap_err();
        assert!(err.to_string().contains("expected 7 names, got 1"));
    }

    #[test]
    fn development_names_must_not_reuse_production_names() {
        let mut names = nzl_test_names();
        names[5] = "SECRET";
        let err = Config::new()
            .with_development_names("nzl", names)
            .unwrap_err();
        assert!(err.to_string().contains("production name"));
    }

    #[test]
    fn development_names_must_be_unique() {
        let mut names = nzl_test_names();
        names[1] = "TEST-U";
        assert!(Config::new().with_development_names("nzl", names).is_err());
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = Config::new()
            .with_development_names("gbr", nzl_test_names())
            .unwrap_err();
        assert!(err.to_string().contains("unknown scheme"));
    }

    #[test]
    fn releasability_order_parses_kebab_case() {
        assert_eq!(
            "home-first".parse::<ReleasabilityOrder>().unwrap(),
            ReleasabilityOrder::HomeFirst
        );
        assert_eq!(
            " Alliance-First ".parse::<ReleasabilityOrder>().unwrap(),
            ReleasabilityOrder::AllianceFirst
        );
        assert!("aus-first".parse::<ReleasabilityOrder>().is_err());
    }

    #[test]
    fn toml_document_is_parsed() {
        let config = Config::from_toml_str(
            r#"
            production_mode = true
            releasability_order = "home-first"
            "#,
        )
        .unwrap();
        assert!(config.production_mode());
        assert_eq!(config.releasability_order(), ReleasabilityOrder::HomeFirst);
    }

    #[test]
    fn date_time_format_is_validated() {
        let config = Config::new().with_date_time_format("%d/%m/%Y").unwrap();
        assert_eq!(config.date_time_format(), "%d/%m/%Y");
        assert_eq!(Config::default().date_time_format(), DEFAULT_DATE_TIME_FORMAT);

        let err = Config::new().with_date_time_format("%Y-%Q").unwrap_err();
        assert!(matches!(err, ConfigError::DateTimeFormat { .. }));
        assert!(Config::from_toml_str("date_time_format = \"\"").is_err());
    }

    #[test]
    fn invalid_layered_date_time_format_falls_back() {
        let logger = Logger::root(Discard, o!());
        let mut layered = Layered::default();
        layered.fill_from(
            FileConfig {
                date_time_format: Some("%Q".to_owned()),
                ..FileConfig::default()
            },
            "environment",
            &logger,
        );
        assert_eq!(layered.finish(logger).date_time_format(), DEFAULT_DATE_TIME_FORMAT);
    }

    #[test]
    fn toml_unknown_key_is_rejected() {
        let err = Config::from_toml_str("verbose = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn earlier_layer_wins() {
        let logger = Logger::root(Discard, o!());
        let mut layered = Layered::default();
        layered.fill_from(
            FileConfig {
                production_mode: Some(true),
                ..FileConfig::default()
            },
            "first",
            &logger,
        );
        layered.fill_from(
            FileConfig {
                production_mode: Some(false),
                releasability_order: Some(ReleasabilityOrder::HomeFirst),
                ..FileConfig::default()
            },
            "second",
            &logger,
        );
        let config = layered.finish(logger);
        assert!(config.production_mode());
        assert_eq!(config.releasability_order(), ReleasabilityOrder::HomeFirst);
    }

    #[test]
    fn invalid_layered_names_are_skipped() {
        let logger = Logger::root(Discard, o!());
        let mut layered = Layered::default();
        let mut development_names = BTreeMap::new();
        development_names.insert("nzl".to_owned(), vec!["TOO-SHORT".to_owned()]);
        layered.fill_from(
            FileConfig {
                development_names,
                ..FileConfig::default()
            },
            "file",
            &logger,
        );
        assert!(layered.development_names.is_empty());
    }

    #[test]
    fn bool_values_accept_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
