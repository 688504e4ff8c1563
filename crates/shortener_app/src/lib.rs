//! Terminal front end for the link shortener client.
pub mod platform;
