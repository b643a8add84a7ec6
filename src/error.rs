use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("CSRF token is empty (pass a non-empty --token)")]
    MissingToken,

    #[error("Invalid base URL \"{input}\" (expected http:// or https://)")]
    InvalidBaseUrl { input: String },

    #[error("Invalid interval \"{input}\" (expected a positive number of milliseconds)")]
    InvalidInterval { input: String },
}
