use crate::{AuthMode, Button, ClientError, Link};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the username input.
    UsernameChanged(String),
    /// User edited the password input.
    PasswordChanged(String),
    /// User edited the long-URL input.
    UrlChanged(String),
    /// User switched between the login and sign-up forms.
    ModeSelected(AuthMode),
    /// Pointer entered or left an action button.
    ButtonHovered { button: Button, hovered: bool },
    RegisterSubmitted,
    LoginSubmitted,
    ShortenSubmitted,
    LogoutClicked,
    /// Persisted credentials read at startup.
    SessionRestored {
        token: Option<String>,
        username: Option<String>,
    },
    /// Locally cached link list for `username`.
    CachedLinksLoaded { username: String, links: Vec<Link> },
    RegisterDone { result: Result<(), ClientError> },
    /// Token endpoint answered for the credentials submitted as `username`.
    LoginDone {
        username: String,
        result: Result<String, ClientError>,
    },
    ShortenDone {
        username: String,
        result: Result<Link, ClientError>,
    },
    /// Link list endpoint answered for `username`.
    LinksFetched {
        username: String,
        result: Result<Vec<Link>, ClientError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
