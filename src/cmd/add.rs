//! Add command - append blank rows to the table

use clap::Args;

use crate::cmd::{load_state, persist};
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct AddCommand {
    /// Number of rows to append
    #[arg(short, long, default_value_t = 1)]
    count: u32,
}

impl AddCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (mut store, ctx) = load_state(storage);
        for _ in 0..self.count {
            store.append();
        }
        persist(storage, &store, &ctx)?;
        println!("Added {} row(s), table now has {}", self.count, store.len());
        Ok(())
    }
}
