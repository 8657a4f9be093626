//! Rate command - fetch the GBP mid-rate for a date

use chrono::NaiveDate;
use clap::Args;

use crate::cmd::{load_state, persist};
use crate::rates::{self, apply_rate};
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct RateCommand {
    /// Conversion date (YYYY-MM-DD)
    #[arg(short, long)]
    date: NaiveDate,

    /// Also convert all row prices with the fetched rate
    #[arg(long)]
    apply: bool,
}

impl RateCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (mut store, mut ctx) = load_state(storage);

        ctx.request(self.date);
        ctx.absorb(rates::fetch_rate(self.date));
        println!("{}", ctx.display());

        if self.apply {
            if ctx.has_rate() {
                apply_rate(store.rows_mut(), ctx.rate);
            } else {
                println!("No rate available, rows left unconverted");
            }
        }
        persist(storage, &store, &ctx)?;
        Ok(())
    }
}
