use thiserror::Error;

/// How many positional arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Exactly(usize),
    AtLeast(usize),
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Exactly(n) => write!(f, "{n}"),
            Expected::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Caller-input failures. Every variant is terminal for the invocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{command} command requires {expected} arguments, got {got}")]
    ArgumentCount {
        command: String,
        expected: Expected,
        got: usize,
    },
    #[error("invalid {field} '{value}': {reason}")]
    ArgumentParse {
        field: String,
        value: String,
        reason: String,
    },
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown machine type '{0}' (expected L, M, H or a numeric code)")]
    UnknownCategory(String),
    #[error("{field} scales to negative value {value}, which is not a field input")]
    NegativeValue { field: String, value: String },
}

impl InputError {
    pub(crate) fn parse(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        InputError::ArgumentParse {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Failures raised by the permutation adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("no Poseidon parameters for arity {0} (supported: 1..=16)")]
    UnsupportedArity(usize),
    #[error("input {index} is not below the field modulus")]
    InputOutOfField { index: usize },
    #[error("permutation failed: {0}")]
    Permutation(String),
    #[error("permutation returned a digest outside the field")]
    DigestOutOfField,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown output format '{0}' (expected field, hex, json, all or bytes32)")]
    UnknownFormat(String),
    #[error("unknown digest mode '{0}' (expected element or bytes)")]
    UnknownDigestMode(String),
}

/// Top-level error for one hashing request.
#[derive(Debug, Error)]
pub enum FieldprintError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
