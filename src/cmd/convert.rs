//! Convert command - derive GB prices from the stored rate

use clap::Args;

use crate::cmd::{load_state, persist};
use crate::rates::apply_rate;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ConvertCommand {}

impl ConvertCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (mut store, ctx) = load_state(storage);
        if !ctx.has_rate() {
            println!("{}", ctx.display());
            println!("No rate available, run `cntab rate --date <date>` first");
            return Ok(());
        }

        apply_rate(store.rows_mut(), ctx.rate);
        persist(storage, &store, &ctx)?;

        let converted = store.rows().iter().filter(|r| r.price_gb.is_set()).count();
        println!("Converted {} row(s) at rate {}", converted, ctx.rate.normalize());
        Ok(())
    }
}
