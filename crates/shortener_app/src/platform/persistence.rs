use client_logging::{client_error, client_info, client_warn};
use shortener_core::{Link, Session};
use shortener_engine::{KeyValueStore, LinkRecord};

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
const LINKS_KEY_PREFIX: &str = "shortenedLinks_";

/// Storage key of the cached link list for `username`.
pub fn links_key(username: &str) -> String {
    format!("{LINKS_KEY_PREFIX}{username}")
}

pub fn link_from_record(record: LinkRecord) -> Link {
    Link {
        short_url: record.short_url,
        original_url: record.original_url,
        click_count: record.click_count,
    }
}

pub fn record_from_link(link: &Link) -> LinkRecord {
    LinkRecord {
        short_url: link.short_url.clone(),
        original_url: link.original_url.clone(),
        click_count: link.click_count,
    }
}

/// Persisted `(token, username)`; unreadable keys count as absent.
pub fn load_credentials(store: &dyn KeyValueStore) -> (Option<String>, Option<String>) {
    (read_key(store, TOKEN_KEY), read_key(store, USERNAME_KEY))
}

pub fn save_session(store: &mut dyn KeyValueStore, session: &Session) {
    let result = store
        .set(TOKEN_KEY, &session.token)
        .and_then(|()| store.set(USERNAME_KEY, &session.username));
    match result {
        Ok(()) => client_info!("Persisted session for {}", session.username),
        Err(err) => client_error!("Failed to persist session for {}: {}", session.username, err),
    }
}

pub fn clear_session(store: &mut dyn KeyValueStore) {
    for key in [TOKEN_KEY, USERNAME_KEY] {
        if let Err(err) = store.remove(key) {
            client_error!("Failed to remove {} from local store: {}", key, err);
        }
    }
}

pub fn load_links(store: &dyn KeyValueStore, username: &str) -> Vec<Link> {
    if username.is_empty() {
        return Vec::new();
    }
    let key = links_key(username);
    let Some(text) = read_key(store, &key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<LinkRecord>>(&text) {
        Ok(records) => records.into_iter().map(link_from_record).collect(),
        Err(err) => {
            client_warn!("Ignoring corrupt link cache {}: {}", key, err);
            Vec::new()
        }
    }
}

pub fn save_links(store: &mut dyn KeyValueStore, username: &str, links: &[Link]) {
    if username.is_empty() {
        return;
    }
    let key = links_key(username);
    let records: Vec<LinkRecord> = links.iter().map(record_from_link).collect();
    let text = match serde_json::to_string(&records) {
        Ok(text) => text,
        Err(err) => {
            client_error!("Failed to serialize link cache {}: {}", key, err);
            return;
        }
    };
    if let Err(err) = store.set(&key, &text) {
        client_error!("Failed to write link cache {}: {}", key, err);
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            client_warn!("Failed to read {} from local store: {}", key, err);
            None
        }
    }
}
