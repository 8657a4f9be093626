//! Show command - the current table, formatted or as CSV

use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd::load_state;
use crate::row::Row;
use crate::storage::Storage;
use crate::utils;

#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Output as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled, Serialize)]
struct RowDisplay {
    #[tabled(rename = "Nr.")]
    #[serde(rename = "id")]
    nr: u32,
    #[tabled(rename = "Index Name")]
    #[serde(rename = "index_name")]
    index_name: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Price GB")]
    #[serde(rename = "price_gb")]
    price_gb: String,
    #[tabled(rename = "CN Code")]
    #[serde(rename = "cn_code")]
    cn_code: String,
}

impl From<&Row> for RowDisplay {
    fn from(row: &Row) -> Self {
        RowDisplay {
            nr: row.id,
            index_name: row.index_name.clone(),
            quantity: row.quantity.input_display(),
            price: row.price.input_display(),
            price_gb: row.price_gb.derived_display(),
            cn_code: row.cn_code.clone(),
        }
    }
}

impl ShowCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (store, ctx) = load_state(storage);
        let rows: Vec<RowDisplay> = store.rows().iter().map(Into::into).collect();

        if self.csv {
            return utils::write_csv(rows, std::io::stdout());
        }

        let mut table = Table::new(&rows);
        table
            .with(Style::sharp())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        println!("{}", table);
        println!();
        println!("{}", ctx.display());
        Ok(())
    }
}
