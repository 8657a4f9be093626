use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::storage::Storage;

mod cmd;
mod error;
mod rates;
mod row;
mod snapshot;
mod storage;
mod store;
mod summary;
mod utils;

#[derive(Parser, Debug)]
#[command(
    name = "cntab",
    version,
    about = "Shipment line-item table with CN-code group totals and NBP currency conversion"
)]
struct Cli {
    /// Path to the table store file (defaults to the platform data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current table
    Show(cmd::show::ShowCommand),
    /// Append blank rows
    Add(cmd::add::AddCommand),
    /// Edit one field of one row
    Set(cmd::set::SetCommand),
    /// Fetch the GBP mid-rate for a date
    Rate(cmd::rate::RateCommand),
    /// Convert row prices with the stored rate
    Convert(cmd::convert::ConvertCommand),
    /// Per-CN-group totals and table totals
    Summary(cmd::summary::SummaryCommand),
    /// Write the snapshot to a file
    Export(cmd::export::ExportCommand),
    /// Replace the table from an exported file
    Import(cmd::import::ImportCommand),
    /// Print the snapshot file format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let storage = Storage::new(cli.store.clone().unwrap_or_else(Storage::default_path));

    match &cli.command {
        Command::Show(c) => c.exec(&storage),
        Command::Add(c) => c.exec(&storage),
        Command::Set(c) => c.exec(&storage),
        Command::Rate(c) => c.exec(&storage),
        Command::Convert(c) => c.exec(&storage),
        Command::Summary(c) => c.exec(&storage),
        Command::Export(c) => c.exec(&storage),
        Command::Import(c) => c.exec(&storage),
        Command::Schema(c) => c.exec(),
    }
}
