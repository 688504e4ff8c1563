use crate::{Link, Session};

/// Side effects requested by `update`. The runner executes them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Register { username: String, password: String },
    Login { username: String, password: String },
    Shorten {
        token: String,
        username: String,
        original_url: String,
    },
    FetchLinks { token: String, username: String },
    LoadCachedLinks { username: String },
    PersistSession(Session),
    ClearSession,
    PersistLinks { username: String, links: Vec<Link> },
}
