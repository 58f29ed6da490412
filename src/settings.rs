//! Layered settings: built-in defaults, then an optional `fuzzaction.toml`
//! (or the file named by `FUZZACTION_CONFIG`), then `FUZZACTION_*` environment
//! variables, e.g. `FUZZACTION_PRINT__SEPARATOR=-`.

use std::sync::Arc;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::{CrispMembership, MaximumDefuzzification, Membership, ThresholdMembership};
use crate::types::TypeRegistry;

pub const DEFAULT_FILE: &str = "fuzzaction";
pub const FILE_VARIABLE: &str = "FUZZACTION_CONFIG";
pub const ENVIRONMENT_PREFIX: &str = "FUZZACTION";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub print: PrintSettings,
    pub fuzzy: FuzzySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrintSettings {
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FuzzySettings {
    /// `crisp` or `graded`
    pub membership: String,
    /// degrees used by the graded membership
    pub success: f64,
    pub fail: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Settings {
    /// Reads the settings from the default locations.
    pub fn load() -> Result<Self> {
        let file = std::env::var(FILE_VARIABLE).unwrap_or_else(|_| DEFAULT_FILE.to_owned());
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name(&file).required(false))
                .add_source(Environment::with_prefix(ENVIRONMENT_PREFIX).separator("__")),
        )
    }
    /// Reads the settings from inline TOML layered over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::from_builder(
            Self::defaults()?.add_source(File::from_str(toml, ::config::FileFormat::Toml)),
        )
    }
    fn defaults() -> Result<::config::ConfigBuilder<::config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("print.separator", " ")?
            .set_default("fuzzy.membership", "crisp")?
            .set_default("fuzzy.success", 1.0)?
            .set_default("fuzzy.fail", 1.0)?
            .set_default("logging.filter", "info")?)
    }
    fn from_builder(builder: ::config::ConfigBuilder<::config::builder::DefaultState>) -> Result<Self> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.membership()?;
        Ok(settings)
    }
    pub fn membership(&self) -> Result<Arc<dyn Membership>> {
        match self.fuzzy.membership.trim().to_lowercase().as_str() {
            "crisp" => Ok(Arc::new(CrispMembership)),
            "graded" => Ok(Arc::new(ThresholdMembership::new(self.fuzzy.success, self.fuzzy.fail))),
            other => Err(ActionError::Config(format!("unknown fuzzy membership: {other}"))),
        }
    }
    /// A root context carrying the configured fuzzy semantics and the builtin types.
    pub fn context(&self, name: &str) -> Result<Context> {
        Ok(Context::new(
            name,
            self.membership()?,
            Arc::new(MaximumDefuzzification),
            Arc::new(TypeRegistry::with_builtin_types()),
        ))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            print: PrintSettings {
                separator: " ".into(),
            },
            fuzzy: FuzzySettings {
                membership: "crisp".into(),
                success: 1.,
                fail: 1.,
            },
            logging: LoggingSettings {
                filter: "info".into(),
            },
        }
    }
}
