//! Export command - write the current snapshot to a file

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cmd::load_state;
use crate::snapshot::{PersistedSnapshot, EXPORT_FILE_NAME};
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Output file
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,
}

impl ExportCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (store, ctx) = load_state(storage);
        let snapshot = PersistedSnapshot::capture(&store, &ctx);
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.output, json)
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        println!("Exported {} row(s) to {}", store.len(), self.output.display());
        Ok(())
    }
}
