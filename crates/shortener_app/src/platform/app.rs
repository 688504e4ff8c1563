use std::collections::VecDeque;
use std::process::ExitCode;

use anyhow::Context;
use client_logging::{client_debug, client_info, redacted};
use shortener_core::{update, AppState, AppViewModel, Messages, Msg};
use shortener_engine::{ensure_data_dir, FileStore, KeyValueStore, LinkApi, ReqwestApi};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::cli::Cli;
use super::config::ClientConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, PromptCommand, HELP};
use super::ui::render::render;

pub async fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.api_url.clone(), cli.data_dir.clone());
    logging::initialize(cli.log, cli.verbose);
    client_info!(
        "Starting shortener client api_url={} data_dir={:?}",
        config.api_url,
        config.data_dir
    );

    let api = ReqwestApi::new(config.api_settings())
        .with_context(|| format!("invalid api url {}", config.api_url))?;
    ensure_data_dir(&config.data_dir)?;
    let store = FileStore::open(&config.data_dir)?;

    let mut app = ClientApp::new(api, store, config.messages.clone());
    app.start().await;

    match cli.command {
        Some(command) => {
            for msg in command.into_msgs() {
                app.dispatch(msg).await;
            }
            let view = app.view();
            print_lines(&render(&view));
            Ok(if view.error.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            run_prompt(&mut app).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Owns the single `AppState` and applies messages one at a time.
///
/// Every effect of a message, and every effect those effects lead to, has
/// finished before `dispatch` returns.
pub struct ClientApp<A, S> {
    state: AppState,
    runner: EffectRunner<A, S>,
}

impl<A: LinkApi, S: KeyValueStore> ClientApp<A, S> {
    pub fn new(api: A, store: S, messages: Messages) -> Self {
        Self {
            state: AppState::with_messages(messages),
            runner: EffectRunner::new(api, store),
        }
    }

    /// Rehydrates the persisted session; refreshes links when one exists.
    pub async fn start(&mut self) {
        let msg = self.runner.restore_msg();
        self.dispatch(msg).await;
    }

    pub async fn dispatch(&mut self, msg: Msg) {
        let mut queue: VecDeque<_> = self.apply(msg).into();
        while let Some(effect) = queue.pop_front() {
            client_debug!("Running effect {:?}", EffectName(&effect));
            if let Some(next) = self.runner.run(effect).await {
                // Follow-ups run before the rest of the batch.
                for effect in self.apply(next).into_iter().rev() {
                    queue.push_front(effect);
                }
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        self.runner.store()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// The current view if anything changed since the last call.
    pub fn take_dirty_view(&mut self) -> Option<AppViewModel> {
        let view = self.state.view();
        self.state.consume_dirty().then_some(view)
    }

    fn apply(&mut self, msg: Msg) -> Vec<shortener_core::Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }
}

/// Debug-formats an effect without its secrets.
struct EffectName<'a>(&'a shortener_core::Effect);

impl std::fmt::Debug for EffectName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use shortener_core::Effect;
        match self.0 {
            Effect::Register { username, password } => {
                write!(f, "Register({username}, {})", redacted(password))
            }
            Effect::Login { username, password } => {
                write!(f, "Login({username}, {})", redacted(password))
            }
            Effect::Shorten {
                token, username, ..
            } => write!(f, "Shorten({username}, {})", redacted(token)),
            Effect::FetchLinks { token, username } => {
                write!(f, "FetchLinks({username}, {})", redacted(token))
            }
            Effect::LoadCachedLinks { username } => write!(f, "LoadCachedLinks({username})"),
            Effect::PersistSession(session) => write!(f, "PersistSession({})", session.username),
            Effect::ClearSession => write!(f, "ClearSession"),
            Effect::PersistLinks { username, links } => {
                write!(f, "PersistLinks({username}, {} links)", links.len())
            }
        }
    }
}

async fn run_prompt<A: LinkApi, S: KeyValueStore>(app: &mut ClientApp<A, S>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_lines(&render(&app.view()));
    println!("Type `help` for commands.");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_command(&line, app.state().mode()) {
            Ok(PromptCommand::Dispatch(msgs)) => {
                for msg in msgs {
                    app.dispatch(msg).await;
                }
                if let Some(view) = app.take_dirty_view() {
                    print_lines(&render(&view));
                }
            }
            Ok(PromptCommand::Show) => print_lines(&render(&app.view())),
            Ok(PromptCommand::Help) => println!("{HELP}"),
            Ok(PromptCommand::Quit) => break,
            Ok(PromptCommand::Empty) => {}
            Err(err) => println!("{err}"),
        }
    }
    client_info!("Prompt closed");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
