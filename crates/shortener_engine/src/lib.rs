//! Shortener engine: REST API client and local key-value persistence.
mod api;
mod persist;
mod store;
mod types;

pub use api::{ApiSettings, LinkApi, ReqwestApi};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, STORE_FILENAME};
pub use types::{ApiError, FailureKind, LinkRecord, TokenResponse};
