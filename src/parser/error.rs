use std::fmt;

/// Failure raised while parsing notation or building a value from parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TheoryError {
    /// Unrecognized or malformed token in a notation string.
    Parse {
        message: String,
        fragment: String,
        input: String,
    },
    /// Well-formed input describing a value the model cannot hold.
    InvalidValue { message: String },
}

impl TheoryError {
    pub fn parse(message: impl Into<String>, fragment: &str, input: &str) -> Self {
        TheoryError::Parse {
            message: message.into(),
            fragment: fragment.to_string(),
            input: input.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        TheoryError::InvalidValue {
            message: message.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, TheoryError::Parse { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, TheoryError::InvalidValue { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            TheoryError::Parse { message, .. } => message,
            TheoryError::InvalidValue { message } => message,
        }
    }
}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheoryError::Parse {
                message,
                fragment,
                input,
            } => write!(f, "{} {:?} in {:?}", message, fragment, input),
            TheoryError::InvalidValue { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for TheoryError {}
