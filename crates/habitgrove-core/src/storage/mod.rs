//! Snapshot persistence: the gateway contract, the JSON codec, initial
//! hydration, and whole-collection writes.
//!
//! Three collections are stored independently -- habits, completions,
//! settings -- each as one JSON payload under its own key. Hydration
//! tolerates a missing or corrupt record by defaulting that collection
//! alone; a half-broken store still hydrates everything that is readable.

mod file;

pub use file::FileGateway;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StorageError;
use crate::habit::{CompletionLedger, Habit, Settings};
use crate::store::HabitStore;

/// Storage keys for the three collections. Versioned so a future format
/// change can migrate by key.
pub mod keys {
    pub const HABITS: &str = "habitgrove.habits.v1";
    pub const COMPLETIONS: &str = "habitgrove.completions.v1";
    pub const SETTINGS: &str = "habitgrove.settings.v1";
}

/// Contract for the device-local key-value persistence layer.
///
/// Calls may suspend; no timeout is imposed here -- the embedder owns that
/// policy.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load the payload stored under `key`, or `None` if absent.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `bytes` under `key`, replacing any previous payload.
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete the payload under `key`. Absent keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Fully hydrated state, one field per stored collection.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub completions: CompletionLedger,
    pub settings: Settings,
}

/// Load all three collections.
///
/// Each loads independently: a missing key, a gateway error, or a payload
/// that fails to decode defaults that collection only (logged), never
/// aborting the whole load.
pub async fn hydrate(gateway: &dyn PersistenceGateway) -> Snapshot {
    let (habits, completions, settings) = tokio::join!(
        load_or_default::<Vec<Habit>>(gateway, keys::HABITS),
        load_or_default::<CompletionLedger>(gateway, keys::COMPLETIONS),
        load_or_default::<Settings>(gateway, keys::SETTINGS),
    );
    Snapshot {
        habits,
        completions,
        settings,
    }
}

async fn load_or_default<T>(gateway: &dyn PersistenceGateway, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let bytes = match gateway.load(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, %err, "load failed; starting this collection from defaults");
            return T::default();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "stored payload did not decode; starting this collection from defaults");
            T::default()
        }
    }
}

/// Snapshot all three collections as independent whole-collection writes.
pub async fn persist_all(
    gateway: &dyn PersistenceGateway,
    store: &HabitStore,
) -> Result<(), StorageError> {
    let habits = encode(keys::HABITS, &store.habits())?;
    let completions = encode(keys::COMPLETIONS, store.completions())?;
    let settings = encode(keys::SETTINGS, &store.settings())?;
    let (a, b, c) = tokio::join!(
        gateway.save(keys::HABITS, &habits),
        gateway.save(keys::COMPLETIONS, &completions),
        gateway.save(keys::SETTINGS, &settings),
    );
    a.and(b).and(c)
}

/// Remove all three stored collections.
pub async fn remove_all(gateway: &dyn PersistenceGateway) -> Result<(), StorageError> {
    let (a, b, c) = tokio::join!(
        gateway.remove(keys::HABITS),
        gateway.remove(keys::COMPLETIONS),
        gateway.remove(keys::SETTINGS),
    );
    a.and(b).and(c)
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(value).map_err(|err| StorageError::SaveFailed {
        key: key.to_string(),
        message: err.to_string(),
    })
}
