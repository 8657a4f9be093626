//! Schema command - print the snapshot/import file format

use clap::Args;
use schemars::schema_for;

use crate::snapshot::PersistedSnapshot;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(PersistedSnapshot);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
