use thiserror::Error;

/// Failure taxonomy surfaced to the user. The displayed text comes from
/// [`crate::Messages`]; `Display` is for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("registration rejected")]
    RegisterFailed,
    #[error("login rejected")]
    LoginFailed,
    #[error("username and password required")]
    CredentialsRequired,
    #[error("url input is empty")]
    UrlRequired,
    #[error("no active session")]
    AuthRequired,
    #[error("link list unavailable")]
    FetchFailed,
    #[error("shorten request rejected")]
    ShortenFailed,
}
