use crate::{
    AppState, AuthMode, ClientError, Effect, Link, Msg, PendingRequest, Session,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// State changes and the persistence effects describing them are produced
/// together, so the runner never sees one without the other.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UsernameChanged(text) => {
            state.set_username_input(text);
            Vec::new()
        }
        Msg::PasswordChanged(text) => {
            state.set_password_input(text);
            Vec::new()
        }
        Msg::UrlChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::ButtonHovered { button, hovered } => {
            state.set_hovered(button, hovered);
            Vec::new()
        }
        Msg::RegisterSubmitted => submit_credentials(&mut state, PendingRequest::Register),
        Msg::LoginSubmitted => submit_credentials(&mut state, PendingRequest::Login),
        Msg::ShortenSubmitted => submit_shorten(&mut state),
        Msg::LogoutClicked => {
            if state.session().is_none() {
                return (state, Vec::new());
            }
            state.set_session(None);
            state.cache_mut().clear();
            state.set_url_input(String::new());
            state.show_message(|m| &m.logged_out);
            vec![Effect::ClearSession]
        }
        Msg::SessionRestored { token, username } => restore_session(&mut state, token, username),
        Msg::CachedLinksLoaded { username, links } => {
            if state.current_username() == Some(username.as_str()) {
                state.cache_mut().replace(&username, links);
            }
            Vec::new()
        }
        Msg::RegisterDone { result } => {
            state.finish_request(PendingRequest::Register);
            match result {
                Ok(()) => {
                    state.show_message(|m| &m.registered);
                    state.set_mode(AuthMode::Login);
                }
                Err(error) => state.show_error(error),
            }
            Vec::new()
        }
        Msg::LoginDone { username, result } => {
            state.finish_request(PendingRequest::Login);
            match result {
                Ok(token) => start_session(&mut state, Session::new(token, username)),
                Err(error) => {
                    state.show_error(error);
                    Vec::new()
                }
            }
        }
        Msg::ShortenDone { username, result } => {
            state.finish_request(PendingRequest::Shorten);
            match result {
                Ok(link) => append_link(&mut state, &username, link),
                Err(error) => {
                    state.show_error(error);
                    Vec::new()
                }
            }
        }
        Msg::LinksFetched { username, result } => {
            if state.current_username() != Some(username.as_str()) {
                return (state, Vec::new());
            }
            match result {
                Ok(links) => {
                    state.cache_mut().replace(&username, links.clone());
                    vec![Effect::PersistLinks { username, links }]
                }
                Err(error) => {
                    state.show_error(error);
                    Vec::new()
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_credentials(state: &mut AppState, request: PendingRequest) -> Vec<Effect> {
    if state.pending().is_some() {
        return Vec::new();
    }
    state.clear_feedback();
    let Some((username, password)) = state.credentials() else {
        state.show_error(ClientError::CredentialsRequired);
        return Vec::new();
    };
    state.begin_request(request);
    state.clear_password();
    match request {
        PendingRequest::Register => vec![Effect::Register { username, password }],
        PendingRequest::Login => vec![Effect::Login { username, password }],
        PendingRequest::Shorten => Vec::new(),
    }
}

fn submit_shorten(state: &mut AppState) -> Vec<Effect> {
    if state.pending().is_some() {
        return Vec::new();
    }
    state.clear_feedback();
    let original_url = state.url_input().trim().to_string();
    if original_url.is_empty() {
        state.show_error(ClientError::UrlRequired);
        return Vec::new();
    }
    let Some(session) = state.session().cloned() else {
        state.show_error(ClientError::AuthRequired);
        return Vec::new();
    };
    state.begin_request(PendingRequest::Shorten);
    vec![Effect::Shorten {
        token: session.token,
        username: session.username,
        original_url,
    }]
}

fn start_session(state: &mut AppState, session: Session) -> Vec<Effect> {
    if state.link_cache().owner() != Some(session.username.as_str()) {
        state.cache_mut().clear();
    }
    state.set_session(Some(session.clone()));
    state.show_message(|m| &m.logged_in);
    vec![
        Effect::PersistSession(session.clone()),
        Effect::LoadCachedLinks {
            username: session.username.clone(),
        },
        Effect::FetchLinks {
            token: session.token,
            username: session.username,
        },
    ]
}

fn restore_session(
    state: &mut AppState,
    token: Option<String>,
    username: Option<String>,
) -> Vec<Effect> {
    let token = token.filter(|t| !t.is_empty());
    let username = username.filter(|u| !u.is_empty());
    match (token, username) {
        (Some(token), Some(username)) => {
            let session = Session::new(token, username);
            state.set_session(Some(session.clone()));
            vec![
                Effect::LoadCachedLinks {
                    username: session.username.clone(),
                },
                Effect::FetchLinks {
                    token: session.token,
                    username: session.username,
                },
            ]
        }
        (None, None) => Vec::new(),
        // Half a session is not a session; drop the stray key.
        _ => vec![Effect::ClearSession],
    }
}

fn append_link(state: &mut AppState, username: &str, link: Link) -> Vec<Effect> {
    if state.current_username() != Some(username) {
        return Vec::new();
    }
    state.cache_mut().prepend(link);
    state.set_url_input(String::new());
    state.show_message(|m| &m.shortened);
    vec![Effect::PersistLinks {
        username: username.to_string(),
        links: state.links().to_vec(),
    }]
}
