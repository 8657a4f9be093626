//! Import command - replace the table from an exported file
//!
//! A file that cannot be parsed is rejected before any state changes, so a
//! failed import never clobbers the stored table.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cmd::{load_state, persist};
use crate::snapshot::parse_import;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ImportCommand {
    /// JSON file in the export format
    #[arg(short, long)]
    file: PathBuf,
}

impl ImportCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let snapshot = parse_import(&text)
            .with_context(|| format!("failed to import {}", self.file.display()))?;

        let (mut store, _) = load_state(storage);
        let ctx = snapshot.context();
        store.replace_all(snapshot.rows);
        persist(storage, &store, &ctx)?;
        println!("Imported {} row(s) from {}", store.len(), self.file.display());
        println!("{}", ctx.display());
        Ok(())
    }
}
