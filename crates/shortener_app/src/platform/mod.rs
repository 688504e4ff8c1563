mod app;
pub mod cli;
pub mod config;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod ui;

pub use app::{run_app, ClientApp};
