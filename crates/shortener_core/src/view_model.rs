use crate::{AuthMode, Button, Link};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Logged-in username; `None` shows the login/sign-up form.
    pub username: Option<String>,
    pub mode: AuthMode,
    pub username_input: String,
    pub password_len: usize,
    pub url_input: String,
    pub links: Vec<Link>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub busy: bool,
    pub hovered: Option<Button>,
    pub dirty: bool,
}
