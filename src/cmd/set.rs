//! Set command - edit one field of one row

use clap::Args;

use crate::cmd::{load_state, persist};
use crate::row::Field;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct SetCommand {
    /// Row id (the Nr. column)
    #[arg(short, long)]
    row: u32,

    /// Field to edit
    #[arg(short, long, value_enum)]
    field: Field,

    /// New value; empty clears the field
    #[arg(short, long, default_value = "")]
    value: String,
}

impl SetCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (mut store, ctx) = load_state(storage);
        store.update_field(self.row, self.field, &self.value)?;
        persist(storage, &store, &ctx)?;
        Ok(())
    }
}
