//! The row store - single source of truth for line-item data.

use crate::error::StoreError;
use crate::rates::ConversionContext;
use crate::row::{Field, NumberCell, Row};
use crate::storage::Storage;

/// Number of blank rows a fresh table starts with.
pub const DEFAULT_ROW_COUNT: u32 = 20;

/// How the initial table state was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored snapshot was loaded.
    Loaded,
    /// No stored snapshot existed; the default table was created.
    Fresh,
    /// A stored snapshot existed but could not be parsed and was discarded.
    Corrupt,
}

/// Ordered list of line-item rows. Ids are assigned once at append time and
/// never renumbered; row removal is not supported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    /// Load the stored table, falling back to the blank default when nothing
    /// is stored or the stored snapshot cannot be parsed. The outcome tells
    /// the caller which of the three it was; a corrupt snapshot is discarded,
    /// not raised.
    pub fn initialize(storage: &Storage) -> (RowStore, ConversionContext, LoadOutcome) {
        match storage.load() {
            Ok(Some(snapshot)) => {
                let (store, ctx) = snapshot.into_state();
                (store, ctx, LoadOutcome::Loaded)
            }
            Ok(None) => (
                RowStore::with_default_rows(),
                ConversionContext::default(),
                LoadOutcome::Fresh,
            ),
            Err(err) => {
                log::warn!("discarding stored table: {}", err);
                (
                    RowStore::with_default_rows(),
                    ConversionContext::default(),
                    LoadOutcome::Corrupt,
                )
            }
        }
    }

    pub fn with_default_rows() -> Self {
        let rows = (1..=DEFAULT_ROW_COUNT).map(Row::empty).collect();
        RowStore { rows }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        RowStore { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one blank row with id = current row count + 1.
    pub fn append(&mut self) -> &Row {
        let id = self.rows.len() as u32 + 1;
        self.rows.push(Row::empty(id));
        self.rows.last().unwrap()
    }

    /// Apply one field edit. Text fields are stored verbatim; numeric fields
    /// are parsed, with non-numeric input kept as the not-a-number marker.
    /// Derived cells that depend on the edited field are cleared so they can
    /// never go stale relative to their inputs.
    pub fn update_field(&mut self, row_id: u32, field: Field, raw: &str) -> Result<(), StoreError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or(StoreError::UnknownRow(row_id))?;

        match field {
            Field::IndexName => row.index_name = raw.to_string(),
            Field::CnCode => row.cn_code = raw.to_string(),
            Field::Quantity => {
                row.quantity = NumberCell::parse(raw);
                row.line_value = NumberCell::Empty;
                row.line_value_gb = NumberCell::Empty;
            }
            Field::Price => {
                row.price = NumberCell::parse(raw);
                row.price_gb = NumberCell::Empty;
                row.line_value = NumberCell::Empty;
                row.line_value_gb = NumberCell::Empty;
            }
        }
        Ok(())
    }

    /// Wholesale replacement, used by import. Rows pass through as parsed;
    /// no per-field validation.
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }
}
