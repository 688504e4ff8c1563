use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shortener_core::{AuthMode, Msg};

use super::logging::LogDestination;

/// Terminal client for the link shortener service.
///
/// Without a subcommand an interactive prompt starts. The session is kept in
/// the data directory, so one-shot commands behave like reloading the page.
#[derive(Debug, Parser)]
#[command(name = "shortener", version)]
pub struct Cli {
    /// RON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory holding the local store, overrides the config file.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create an account.
    Register { username: String, password: String },
    /// Log in and fetch the link history.
    Login { username: String, password: String },
    /// Log out; the cached link history stays on disk.
    Logout,
    /// Shorten a URL with the current session.
    Shorten { url: String },
    /// Show the session and its links.
    Show,
}

impl Command {
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Register { username, password } => vec![
                Msg::ModeSelected(AuthMode::Register),
                Msg::UsernameChanged(username),
                Msg::PasswordChanged(password),
                Msg::RegisterSubmitted,
            ],
            Command::Login { username, password } => vec![
                Msg::UsernameChanged(username),
                Msg::PasswordChanged(password),
                Msg::LoginSubmitted,
            ],
            Command::Logout => vec![Msg::LogoutClicked],
            Command::Shorten { url } => vec![Msg::UrlChanged(url), Msg::ShortenSubmitted],
            Command::Show => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "shortener",
            "--api-url",
            "http://127.0.0.1:9000",
            "--log",
            "both",
            "shorten",
            "http://x.com",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.log, LogDestination::Both);
        assert_eq!(
            cli.command,
            Some(Command::Shorten {
                url: "http://x.com".to_string()
            })
        );
    }

    #[test]
    fn no_subcommand_means_prompt() {
        let cli = Cli::try_parse_from(["shortener"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.log, LogDestination::File);
    }

    #[test]
    fn login_maps_to_form_messages() {
        let msgs = Command::Login {
            username: "alice".to_string(),
            password: "pw".to_string(),
        }
        .into_msgs();
        assert_eq!(msgs.last(), Some(&Msg::LoginSubmitted));
        assert_eq!(msgs[0], Msg::UsernameChanged("alice".to_string()));
    }
}
