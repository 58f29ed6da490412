use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Illegal argument in {context}: {message}")]
    IllegalArgument {
        context: String,
        message: String,
        value: Option<String>,
    },
    #[error("Execution error in {context}: {message}")]
    Execution { context: String, message: String },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;

impl ActionError {
    // Every illegal argument names the context it happened in, so that the
    // dispatcher can report which plan step has to be halted.
    pub fn illegal_argument(context: &str, message: impl Into<String>) -> Self {
        Self::IllegalArgument {
            context: context.to_owned(),
            message: message.into(),
            value: None,
        }
    }
    pub fn illegal_value(context: &str, message: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::IllegalArgument {
            context: context.to_owned(),
            message: format!("{} ({})", message.into(), value),
            value: Some(value),
        }
    }
    pub fn execution(context: &str, message: impl Into<String>) -> Self {
        Self::Execution {
            context: context.to_owned(),
            message: message.into(),
        }
    }
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, Self::IllegalArgument { .. })
    }
    /// The raw form of the argument that caused an illegal argument, if any.
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            Self::IllegalArgument { value, .. } => value.as_deref(),
            _ => None,
        }
    }
}

// Helper conversions
impl From<::config::ConfigError> for ActionError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
