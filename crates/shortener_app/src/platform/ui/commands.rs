use shortener_core::{AuthMode, Msg};
use thiserror::Error;

/// One line typed at the prompt, resolved against the current form mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Dispatch(Vec<Msg>),
    Show,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

pub const HELP: &str = "\
Commands:
  login <user> <password>     log in
  register <user> <password>  create an account
  user <name>                 set the username field
  password <password>         set the password field
  submit                      submit the login or sign-up form
  signup | signin             switch between sign-up and login forms
  url <long-url>              set the URL field
  shorten [long-url]          shorten the URL field (or the given URL)
  logout                      log out, keeping the link history
  show                        redraw the screen
  help                        this text
  quit                        leave";

pub fn parse_command(line: &str, mode: AuthMode) -> Result<PromptCommand, CommandError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let msgs = match command.to_ascii_lowercase().as_str() {
        "" => return Ok(PromptCommand::Empty),
        "help" | "?" => return Ok(PromptCommand::Help),
        "show" => return Ok(PromptCommand::Show),
        "quit" | "exit" => return Ok(PromptCommand::Quit),
        "user" => vec![Msg::UsernameChanged(rest.to_string())],
        "password" => vec![Msg::PasswordChanged(rest.to_string())],
        "url" => vec![Msg::UrlChanged(rest.to_string())],
        "signup" => vec![Msg::ModeSelected(AuthMode::Register)],
        "signin" => vec![Msg::ModeSelected(AuthMode::Login)],
        "submit" => match mode {
            AuthMode::Login => vec![Msg::LoginSubmitted],
            AuthMode::Register => vec![Msg::RegisterSubmitted],
        },
        "login" => with_credentials("login", rest, Vec::new(), Msg::LoginSubmitted)?,
        "register" => with_credentials(
            "register",
            rest,
            vec![Msg::ModeSelected(AuthMode::Register)],
            Msg::RegisterSubmitted,
        )?,
        "shorten" => {
            let mut msgs = Vec::with_capacity(2);
            if !rest.is_empty() {
                msgs.push(Msg::UrlChanged(rest.to_string()));
            }
            msgs.push(Msg::ShortenSubmitted);
            msgs
        }
        "logout" => vec![Msg::LogoutClicked],
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(PromptCommand::Dispatch(msgs))
}

/// `<user> <password>` fills both fields; no arguments submits what is already typed.
fn with_credentials(
    command: &'static str,
    rest: &str,
    mut msgs: Vec<Msg>,
    submit: Msg,
) -> Result<Vec<Msg>, CommandError> {
    if !rest.is_empty() {
        let Some((username, password)) = rest.split_once(char::is_whitespace) else {
            return Err(CommandError::MissingArgument {
                command,
                argument: "a password after the username",
            });
        };
        msgs.push(Msg::UsernameChanged(username.to_string()));
        msgs.push(Msg::PasswordChanged(password.trim().to_string()));
    }
    msgs.push(submit);
    Ok(msgs)
}
