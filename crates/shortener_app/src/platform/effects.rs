use client_logging::{client_info, client_warn};
use shortener_core::{ClientError, Effect, Msg};
use shortener_engine::{KeyValueStore, LinkApi};

use super::persistence;

/// Executes core effects against the backend and the local store.
///
/// Network effects resolve to the `Msg` carrying their outcome; storage
/// effects complete synchronously and yield nothing.
pub struct EffectRunner<A, S> {
    api: A,
    store: S,
}

impl<A: LinkApi, S: KeyValueStore> EffectRunner<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Startup message built from persisted credentials.
    pub fn restore_msg(&self) -> Msg {
        let (token, username) = persistence::load_credentials(&self.store);
        Msg::SessionRestored { token, username }
    }

    pub async fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Register { username, password } => {
                client_info!("Register username={}", username);
                let result = self
                    .api
                    .register(&username, &password)
                    .await
                    .map_err(|err| {
                        client_warn!("Register for {} failed: {}", username, err);
                        ClientError::RegisterFailed
                    });
                Some(Msg::RegisterDone { result })
            }
            Effect::Login { username, password } => {
                client_info!("Login username={}", username);
                let result = self.api.login(&username, &password).await.map_err(|err| {
                    client_warn!("Login for {} failed: {}", username, err);
                    ClientError::LoginFailed
                });
                Some(Msg::LoginDone { username, result })
            }
            Effect::Shorten {
                token,
                username,
                original_url,
            } => {
                client_info!("Shorten url_len={} url={}", original_url.len(), original_url);
                let result = self
                    .api
                    .shorten(&token, &original_url)
                    .await
                    .map(persistence::link_from_record)
                    .map_err(|err| {
                        client_warn!("Shorten {} failed: {}", original_url, err);
                        ClientError::ShortenFailed
                    });
                Some(Msg::ShortenDone { username, result })
            }
            Effect::FetchLinks { token, username } => {
                let result = self
                    .api
                    .list_links(&token)
                    .await
                    .map(|records| {
                        records
                            .into_iter()
                            .map(persistence::link_from_record)
                            .collect()
                    })
                    .map_err(|err| {
                        client_warn!("Fetching links for {} failed: {}", username, err);
                        ClientError::FetchFailed
                    });
                Some(Msg::LinksFetched { username, result })
            }
            Effect::LoadCachedLinks { username } => {
                let links = persistence::load_links(&self.store, &username);
                Some(Msg::CachedLinksLoaded { username, links })
            }
            Effect::PersistSession(session) => {
                persistence::save_session(&mut self.store, &session);
                None
            }
            Effect::ClearSession => {
                persistence::clear_session(&mut self.store);
                None
            }
            Effect::PersistLinks { username, links } => {
                persistence::save_links(&mut self.store, &username, &links);
                None
            }
        }
    }
}
