pub mod add;
pub mod convert;
pub mod export;
pub mod import;
pub mod rate;
pub mod schema;
pub mod set;
pub mod show;
pub mod summary;

use crate::rates::ConversionContext;
use crate::snapshot::PersistedSnapshot;
use crate::storage::Storage;
use crate::store::{LoadOutcome, RowStore};

/// Load the table state for a command, logging how it came to be.
pub fn load_state(storage: &Storage) -> (RowStore, ConversionContext) {
    let (store, ctx, outcome) = RowStore::initialize(storage);
    match outcome {
        LoadOutcome::Loaded => log::debug!("loaded {} rows from {}", store.len(), storage.path().display()),
        LoadOutcome::Fresh => log::info!("no stored table, starting with the default"),
        LoadOutcome::Corrupt => {
            log::warn!("stored table could not be parsed and was discarded")
        }
    }
    (store, ctx)
}

/// Write the current state back to the store file. Called after every
/// mutating command so the table survives between invocations.
pub fn persist(storage: &Storage, store: &RowStore, ctx: &ConversionContext) -> anyhow::Result<()> {
    storage.save(&PersistedSnapshot::capture(store, ctx))
}
