//! Summary command - per-CN-group totals and the whole-table totals block

use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd::load_state;
use crate::storage::Storage;
use crate::summary::{summarize, totals, GroupTotals, Totals};
use crate::utils;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output the group table as CSV instead of formatted text
    #[arg(long, conflicts_with = "json")]
    csv: bool,
}

#[derive(Tabled, Serialize)]
struct GroupRow {
    #[tabled(rename = "CN Group")]
    cn_group: String,
    #[tabled(rename = "Quantity")]
    total_quantity: String,
    #[tabled(rename = "Value")]
    total_line_value: String,
    #[tabled(rename = "Value GB")]
    total_line_value_gb: String,
}

/// Summary data for JSON output
#[derive(Serialize)]
struct SummaryData {
    exchange_rate: String,
    totals: TotalsData,
    groups: Vec<GroupRow>,
}

#[derive(Serialize)]
struct TotalsData {
    total_price: String,
    total_price_gb: String,
    total_quantity: String,
}

impl SummaryCommand {
    pub fn exec(&self, storage: &Storage) -> anyhow::Result<()> {
        let (store, ctx) = load_state(storage);
        let groups = summarize(store.rows());
        let table_totals = totals(store.rows());

        // The group map carries no order; sort keys for stable output
        let mut keys: Vec<&String> = groups.keys().collect();
        keys.sort();
        let group_rows: Vec<GroupRow> = keys
            .iter()
            .map(|key| group_row(key, &groups[key.as_str()]))
            .collect();

        if self.json {
            self.print_json(&ctx.display(), &table_totals, group_rows)
        } else if self.csv {
            utils::write_csv(group_rows, std::io::stdout())
        } else {
            self.print_text(&ctx.display(), &table_totals, &group_rows);
            Ok(())
        }
    }

    fn print_text(&self, rate_display: &str, table_totals: &Totals, group_rows: &[GroupRow]) {
        println!();
        println!("TOTAL SUMMARY");
        println!("  Total Price:    {:.2}", table_totals.total_price);
        println!("  Total Price GB: {:.2}", table_totals.total_price_gb);
        println!("  Total Quantity: {}", table_totals.total_quantity.normalize());
        println!("  {}", rate_display);
        println!();

        if group_rows.is_empty() {
            println!("No rows to group");
            return;
        }

        let mut table = Table::new(group_rows);
        table
            .with(Style::sharp())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        println!("{}", table);
    }

    fn print_json(
        &self,
        rate_display: &str,
        table_totals: &Totals,
        groups: Vec<GroupRow>,
    ) -> anyhow::Result<()> {
        let data = SummaryData {
            exchange_rate: rate_display.to_string(),
            totals: TotalsData {
                total_price: format!("{:.2}", table_totals.total_price),
                total_price_gb: format!("{:.2}", table_totals.total_price_gb),
                total_quantity: table_totals.total_quantity.normalize().to_string(),
            },
            groups,
        };
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn group_row(key: &str, group: &GroupTotals) -> GroupRow {
    GroupRow {
        cn_group: key.to_string(),
        total_quantity: group.total_quantity.normalize().to_string(),
        total_line_value: format!("{:.2}", group.total_line_value),
        total_line_value_gb: format!("{:.2}", group.total_line_value_gb),
    }
}
