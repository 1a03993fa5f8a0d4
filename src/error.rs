use thiserror::Error;

/// Errors that can occur while importing a persisted form document.
///
/// Every variant leaves the caller's current forest untouched; the `Display` text is meant to be
/// shown to the user as-is.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import failed: the JSON configuration is invalid ({0})")]
    InvalidJson(String),

    #[error("Import failed: missing components array")]
    MissingComponents,

    #[error("Import failed: components must be an array, found {found}")]
    ComponentsNotArray { found: String },

    #[error("Import failed: component #{index} is malformed: {message}")]
    InvalidComponent { index: usize, message: String },

    #[error("Import failed: could not read '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised by a user-authored fragment (custom validation source or custom JSON props).
///
/// The generator never propagates these: it logs them and drops the offending fragment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("Custom validation for field '{field}' is unbalanced: {message}")]
    UnbalancedValidation { field: String, message: String },

    #[error("Custom props for field '{field}' are not valid JSON: {message}")]
    InvalidCustomProps { field: String, message: String },

    #[error("Custom props for field '{field}' must be a JSON object")]
    CustomPropsNotObject { field: String },
}

/// Errors surfaced by the editing session to the user.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please add at least one component to generate code")]
    EmptyForm,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Could not write '{path}': {message}")]
    Export { path: String, message: String },
}
