//! Shortener core: pure session/link state machine and view-model helpers.
mod effect;
mod error;
mod messages;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::ClientError;
pub use messages::Messages;
pub use msg::Msg;
pub use state::{
    AppState, AuthMode, Button, Feedback, Link, LinkCache, PendingRequest,
    Session,
};
pub use update::update;
pub use view_model::AppViewModel;
