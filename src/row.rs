//! Line-item rows and the tri-state numeric cell they are made of.

use clap::ValueEnum;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A numeric table cell as entered by the user.
///
/// Cells start out empty, become a number once valid input is supplied, and
/// become a not-a-number marker on non-numeric input. The marker is kept
/// rather than rejected so the row survives as-is; aggregation treats it as
/// zero and conversion skips it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NumberCell {
    #[default]
    Empty,
    Value(Decimal),
    NotANumber,
}

impl NumberCell {
    /// Parse raw field input. Blank input clears the cell back to empty.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return NumberCell::Empty;
        }
        match trimmed.parse::<Decimal>() {
            Ok(value) => NumberCell::Value(value),
            Err(_) => NumberCell::NotANumber,
        }
    }

    pub fn numeric(&self) -> Option<Decimal> {
        match self {
            NumberCell::Value(value) => Some(*value),
            NumberCell::Empty | NumberCell::NotANumber => None,
        }
    }

    /// Numeric value with empty and not-a-number contributing zero.
    pub fn or_zero(&self) -> Decimal {
        self.numeric().unwrap_or(Decimal::ZERO)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, NumberCell::Value(_))
    }

    /// Render as it was entered: blank for empty, `NaN` for the marker.
    pub fn input_display(&self) -> String {
        match self {
            NumberCell::Empty => String::new(),
            NumberCell::Value(value) => value.normalize().to_string(),
            NumberCell::NotANumber => "NaN".to_string(),
        }
    }

    /// Render a derived cell: two decimal places, `N/A` until computed.
    pub fn derived_display(&self) -> String {
        match self {
            NumberCell::Value(value) => format!("{:.2}", value.round_dp(2)),
            NumberCell::Empty | NumberCell::NotANumber => "N/A".to_string(),
        }
    }
}

// Wire format matches the browser-era snapshots: "" for empty, a JSON
// number for a value, null for NaN (which is what NaN serializes to).
impl Serialize for NumberCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NumberCell::Empty => serializer.serialize_str(""),
            NumberCell::Value(value) => rust_decimal::serde::float::serialize(value, serializer),
            NumberCell::NotANumber => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for NumberCell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Other(serde_json::Value),
        }

        let cell = match Option::<Raw>::deserialize(deserializer)? {
            None => NumberCell::NotANumber,
            Some(Raw::Number(n)) => Decimal::from_f64(n)
                .map(NumberCell::Value)
                .unwrap_or(NumberCell::NotANumber),
            Some(Raw::Text(s)) => NumberCell::parse(&s),
            Some(Raw::Other(_)) => NumberCell::NotANumber,
        };
        Ok(cell)
    }
}

impl JsonSchema for NumberCell {
    fn schema_name() -> String {
        "NumberCell".to_string()
    }

    fn json_schema(_gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        use schemars::schema::{InstanceType, SchemaObject};
        SchemaObject {
            instance_type: Some(
                vec![
                    InstanceType::Number,
                    InstanceType::String,
                    InstanceType::Null,
                ]
                .into(),
            ),
            ..Default::default()
        }
        .into()
    }
}

/// One shipment line item. `price_gb`, `line_value` and `line_value_gb` are
/// derived cells, empty until a conversion computes them and cleared again
/// whenever an input they depend on is edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    pub id: u32,
    pub index_name: String,
    pub quantity: NumberCell,
    pub price: NumberCell,
    #[serde(rename = "priceGB")]
    pub price_gb: NumberCell,
    pub line_value: NumberCell,
    #[serde(rename = "lineValueGB")]
    pub line_value_gb: NumberCell,
    pub cn_code: String,
}

impl Row {
    pub fn empty(id: u32) -> Self {
        Row {
            id,
            ..Default::default()
        }
    }
}

/// Editable row fields, as addressed by `cntab set --field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    IndexName,
    Quantity,
    Price,
    CnCode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_number_input() {
        assert_eq!(NumberCell::parse("12.50"), NumberCell::Value(dec!(12.50)));
        assert_eq!(NumberCell::parse(" 3 "), NumberCell::Value(dec!(3)));
        assert_eq!(NumberCell::parse(""), NumberCell::Empty);
        assert_eq!(NumberCell::parse("   "), NumberCell::Empty);
        assert_eq!(NumberCell::parse("abc"), NumberCell::NotANumber);
    }

    #[test]
    fn not_a_number_counts_as_zero() {
        assert_eq!(NumberCell::NotANumber.or_zero(), Decimal::ZERO);
        assert_eq!(NumberCell::Empty.or_zero(), Decimal::ZERO);
        assert_eq!(NumberCell::Value(dec!(7)).or_zero(), dec!(7));
    }

    #[test]
    fn cell_wire_format() {
        assert_eq!(serde_json::to_string(&NumberCell::Empty).unwrap(), "\"\"");
        assert_eq!(
            serde_json::to_string(&NumberCell::Value(dec!(2.5))).unwrap(),
            "2.5"
        );
        assert_eq!(
            serde_json::to_string(&NumberCell::NotANumber).unwrap(),
            "null"
        );

        assert_eq!(
            serde_json::from_str::<NumberCell>("\"\"").unwrap(),
            NumberCell::Empty
        );
        assert_eq!(
            serde_json::from_str::<NumberCell>("2.5").unwrap(),
            NumberCell::Value(dec!(2.5))
        );
        assert_eq!(
            serde_json::from_str::<NumberCell>("null").unwrap(),
            NumberCell::NotANumber
        );
        // Numeric strings from hand-edited files are accepted
        assert_eq!(
            serde_json::from_str::<NumberCell>("\"10\"").unwrap(),
            NumberCell::Value(dec!(10))
        );
    }

    #[test]
    fn row_defaults_fill_missing_fields() {
        // Older snapshots have no lineValue fields
        let row: Row = serde_json::from_str(
            r#"{"id":1,"indexName":"widget","quantity":2,"price":100,"cnCode":"1234AB"}"#,
        )
        .unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.quantity, NumberCell::Value(dec!(2)));
        assert_eq!(row.price_gb, NumberCell::Empty);
        assert_eq!(row.line_value, NumberCell::Empty);
        assert_eq!(row.line_value_gb, NumberCell::Empty);
    }
}
