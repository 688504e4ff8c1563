use crate::view_model::AppViewModel;
use crate::{ClientError, Messages};

/// Authenticated identity. Token and username are set and cleared together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub short_url: String,
    pub original_url: String,
    pub click_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Login,
    Register,
    Shorten,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Message(String),
    Error(String),
}

/// User-initiated request currently awaiting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Register,
    Login,
    Shorten,
}

/// Newest-first links owned by exactly one username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkCache {
    owner: Option<String>,
    links: Vec<Link>,
}

impl LinkCache {
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn replace(&mut self, owner: &str, links: Vec<Link>) {
        self.owner = Some(owner.to_string());
        self.links = links;
    }

    pub(crate) fn prepend(&mut self, link: Link) {
        self.links.insert(0, link);
    }

    pub(crate) fn clear(&mut self) {
        self.owner = None;
        self.links.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: Option<Session>,
    mode: AuthMode,
    username_input: String,
    password_input: String,
    url_input: String,
    cache: LinkCache,
    feedback: Feedback,
    pending: Option<PendingRequest>,
    hovered: Option<Button>,
    messages: Messages,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: Messages) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let (error, message) = match &self.feedback {
            Feedback::None => (None, None),
            Feedback::Message(text) => (None, Some(text.clone())),
            Feedback::Error(text) => (Some(text.clone()), None),
        };
        AppViewModel {
            username: self.session.as_ref().map(|s| s.username.clone()),
            mode: self.mode,
            username_input: self.username_input.clone(),
            password_len: self.password_input.chars().count(),
            url_input: self.url_input.clone(),
            links: self.cache.links().to_vec(),
            error,
            message,
            busy: self.pending.is_some(),
            hovered: self.hovered,
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn links(&self) -> &[Link] {
        self.cache.links()
    }

    pub fn link_cache(&self) -> &LinkCache {
        &self.cache
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn current_username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub(crate) fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_username_input(&mut self, text: String) {
        self.username_input = text;
        self.mark_dirty();
    }

    pub(crate) fn set_password_input(&mut self, text: String) {
        self.password_input = text;
        self.mark_dirty();
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
        self.mark_dirty();
    }

    /// Trimmed username and raw password, or `None` if either is blank.
    pub(crate) fn credentials(&self) -> Option<(String, String)> {
        let username = self.username_input.trim();
        if username.is_empty() || self.password_input.is_empty() {
            return None;
        }
        Some((username.to_string(), self.password_input.clone()))
    }

    pub(crate) fn clear_password(&mut self) {
        self.password_input.clear();
        self.mark_dirty();
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn cache_mut(&mut self) -> &mut LinkCache {
        self.mark_dirty();
        &mut self.cache
    }

    pub(crate) fn clear_feedback(&mut self) {
        if self.feedback != Feedback::None {
            self.feedback = Feedback::None;
            self.mark_dirty();
        }
    }

    pub(crate) fn show_message(&mut self, pick: impl FnOnce(&Messages) -> &str) {
        self.feedback = Feedback::Message(pick(&self.messages).to_string());
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, error: ClientError) {
        self.feedback = Feedback::Error(self.messages.error_text(error).to_string());
        self.mark_dirty();
    }

    pub(crate) fn begin_request(&mut self, request: PendingRequest) {
        self.pending = Some(request);
        self.mark_dirty();
    }

    pub(crate) fn finish_request(&mut self, request: PendingRequest) {
        if self.pending == Some(request) {
            self.pending = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_hovered(&mut self, button: Button, hovered: bool) {
        let next = if hovered {
            Some(button)
        } else if self.hovered == Some(button) {
            None
        } else {
            self.hovered
        };
        if next != self.hovered {
            self.hovered = next;
            self.mark_dirty();
        }
    }
}
