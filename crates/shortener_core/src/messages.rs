use serde::{Deserialize, Serialize};

use crate::ClientError;

/// User-facing strings. Loaded from config so wording can change without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub registration_failed: String,
    pub login_failed: String,
    pub credentials_required: String,
    pub url_required: String,
    pub login_required: String,
    pub no_past_links: String,
    pub shorten_failed: String,
    pub registered: String,
    pub logged_in: String,
    pub logged_out: String,
    pub shortened: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            registration_failed: "Registration failed".to_string(),
            login_failed: "Login failed".to_string(),
            credentials_required: "Please enter a username and password".to_string(),
            url_required: "Please enter a URL".to_string(),
            login_required: "You Must Login First".to_string(),
            no_past_links: "You Do Not Have Any Past Links".to_string(),
            shorten_failed: "Shorten fails".to_string(),
            registered: "Registration successful! Please log in.".to_string(),
            logged_in: "Successfully Logged In".to_string(),
            logged_out: "The Log Out has been made, the link history is protected.".to_string(),
            shortened: "Link shortened successfully".to_string(),
        }
    }
}

impl Messages {
    pub fn error_text(&self, error: ClientError) -> &str {
        match error {
            ClientError::RegisterFailed => &self.registration_failed,
            ClientError::LoginFailed => &self.login_failed,
            ClientError::CredentialsRequired => &self.credentials_required,
            ClientError::UrlRequired => &self.url_required,
            ClientError::AuthRequired => &self.login_required,
            ClientError::FetchFailed => &self.no_past_links,
            ClientError::ShortenFailed => &self.shorten_failed,
        }
    }
}
