//! The persisted snapshot: the one JSON shape shared by the durable store
//! file, file export and file import. Keys are camelCase to stay
//! round-trippable with snapshots written by earlier versions of the tool.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::rates::ConversionContext;
use crate::row::Row;
use crate::store::RowStore;

/// Default file name for exports.
pub const EXPORT_FILE_NAME: &str = "tableData.json";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSnapshot {
    pub rows: Vec<Row>,
    /// ISO date the rate was fetched for; empty when no rate was requested.
    pub target_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl Default for PersistedSnapshot {
    fn default() -> Self {
        PersistedSnapshot {
            rows: Vec::new(),
            target_date: String::new(),
            rate: Decimal::ZERO,
        }
    }
}

impl PersistedSnapshot {
    pub fn capture(store: &RowStore, ctx: &ConversionContext) -> Self {
        PersistedSnapshot {
            rows: store.rows().to_vec(),
            target_date: ctx
                .target_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            rate: ctx.rate,
        }
    }

    pub fn into_state(self) -> (RowStore, ConversionContext) {
        let ctx = self.context();
        (RowStore::from_rows(self.rows), ctx)
    }

    pub fn context(&self) -> ConversionContext {
        ConversionContext::new(parse_target_date(&self.target_date), self.rate)
    }
}

fn parse_target_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(err) => {
            log::warn!("ignoring unparseable target date {:?}: {}", raw, err);
            None
        }
    }
}

/// Parse an imported file into a snapshot.
///
/// Validation is list-shape only: `rows` must be absent (defaulting to the
/// empty list) or a JSON array; row fields themselves pass through as
/// parsed. Any failure leaves the caller's existing state untouched.
pub fn parse_import(text: &str) -> Result<PersistedSnapshot, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if let Some(rows) = value.get("rows") {
        if !rows.is_array() {
            return Err(ImportError::RowsNotAList);
        }
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::NumberCell;
    use rust_decimal_macros::dec;

    fn sample_state() -> (RowStore, ConversionContext) {
        let mut store = RowStore::with_default_rows();
        store
            .update_field(1, crate::row::Field::IndexName, "widget")
            .unwrap();
        store.update_field(1, crate::row::Field::Price, "100").unwrap();
        store.update_field(1, crate::row::Field::Quantity, "2").unwrap();
        store.update_field(1, crate::row::Field::CnCode, "1234AB").unwrap();
        store.update_field(2, crate::row::Field::Quantity, "junk").unwrap();
        let ctx = ConversionContext::new(Some("2024-01-15".parse().unwrap()), dec!(5.1234));
        (store, ctx)
    }

    #[test]
    fn snapshot_round_trip() {
        let (store, ctx) = sample_state();
        let json = serde_json::to_string(&PersistedSnapshot::capture(&store, &ctx)).unwrap();
        let (loaded_store, loaded_ctx) = parse_import(&json).unwrap().into_state();

        assert_eq!(loaded_store, store);
        assert_eq!(loaded_ctx, ctx);
    }

    #[test]
    fn snapshot_wire_keys_are_camel_case() {
        let (store, ctx) = sample_state();
        let json = serde_json::to_value(PersistedSnapshot::capture(&store, &ctx)).unwrap();
        assert_eq!(json["targetDate"], "2024-01-15");
        assert_eq!(json["rows"][0]["indexName"], "widget");
        assert_eq!(json["rows"][0]["cnCode"], "1234AB");
        // The NaN marker survives as null
        assert!(json["rows"][1]["quantity"].is_null());
    }

    #[test]
    fn missing_fields_default() {
        let snapshot = parse_import("{}").unwrap();
        assert!(snapshot.rows.is_empty());
        assert_eq!(snapshot.target_date, "");
        assert_eq!(snapshot.rate, Decimal::ZERO);

        let (store, ctx) = snapshot.into_state();
        assert!(store.is_empty());
        assert_eq!(ctx.target_date, None);
        assert_eq!(ctx.rate, Decimal::ZERO);
    }

    #[test]
    fn legacy_snapshot_without_derived_cells() {
        let json = r#"{
            "rows": [
                {"id": 1, "indexName": "a", "quantity": 2, "price": 100, "cnCode": "1234"}
            ],
            "targetDate": "",
            "rate": 0
        }"#;
        let (store, ctx) = parse_import(json).unwrap().into_state();
        assert_eq!(store.rows()[0].price, NumberCell::Value(dec!(100)));
        assert_eq!(store.rows()[0].price_gb, NumberCell::Empty);
        assert_eq!(ctx.target_date, None);
    }

    #[test]
    fn invalid_json_is_an_import_error() {
        let err = parse_import("not json at all").unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
    }

    #[test]
    fn non_list_rows_is_an_import_error() {
        let err = parse_import(r#"{"rows": 42}"#).unwrap_err();
        assert!(matches!(err, ImportError::RowsNotAList));
    }
}
