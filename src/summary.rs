//! Pure aggregation over the row list: per-CN-group totals and whole-table
//! totals. Rebuilt wholesale on every call, never incrementally updated.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::row::Row;

/// CN codes report under their first four characters.
pub const GROUP_PREFIX_LEN: usize = 4;

/// Totals for one CN group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTotals {
    pub total_quantity: Decimal,
    pub total_line_value: Decimal,
    pub total_line_value_gb: Decimal,
}

/// Whole-table totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_price: Decimal,
    pub total_price_gb: Decimal,
    pub total_quantity: Decimal,
}

/// Group key for a CN code: the first four characters, the whole code when
/// shorter, the empty string when empty. Codes shorter than four characters
/// form their own groups rather than being rejected.
pub fn group_key(cn_code: &str) -> String {
    cn_code.chars().take(GROUP_PREFIX_LEN).collect()
}

/// Group rows by CN prefix and sum quantity and line values per group.
///
/// Line values are recomputed from the current price and quantity cells on
/// every call, so the result can never reflect a stale derived cell. Empty
/// and not-a-number cells contribute zero. The returned map carries no
/// ordering; sort the keys for deterministic output.
pub fn summarize(rows: &[Row]) -> HashMap<String, GroupTotals> {
    let mut groups: HashMap<String, GroupTotals> = HashMap::new();
    for row in rows {
        let totals = groups.entry(group_key(&row.cn_code)).or_default();
        let quantity = row.quantity.or_zero();
        totals.total_quantity += quantity;
        totals.total_line_value += row.price.or_zero() * quantity;
        totals.total_line_value_gb += row.price_gb.or_zero() * quantity;
    }
    groups
}

/// Table-wide sums of price, converted price and quantity.
pub fn totals(rows: &[Row]) -> Totals {
    let mut totals = Totals::default();
    for row in rows {
        totals.total_price += row.price.or_zero();
        totals.total_price_gb += row.price_gb.or_zero();
        totals.total_quantity += row.quantity.or_zero();
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::NumberCell;
    use rust_decimal_macros::dec;

    fn row(price: &str, quantity: &str, cn_code: &str) -> Row {
        let mut row = Row::empty(1);
        row.price = NumberCell::parse(price);
        row.quantity = NumberCell::parse(quantity);
        row.cn_code = cn_code.to_string();
        row
    }

    #[test]
    fn groups_by_four_character_prefix() {
        let rows = vec![row("100", "2", "1234AB"), row("50", "1", "12340000")];
        let groups = summarize(&rows);

        assert_eq!(groups.len(), 1);
        let g = &groups["1234"];
        assert_eq!(g.total_quantity, dec!(3));
        assert_eq!(g.total_line_value, dec!(250));
    }

    #[test]
    fn empty_code_forms_its_own_group() {
        let rows = vec![row("10", "1", ""), row("20", "1", "1234")];
        let groups = summarize(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[""].total_quantity, dec!(1));
        assert_eq!(groups["1234"].total_quantity, dec!(1));
    }

    #[test]
    fn short_code_groups_under_its_full_value() {
        let rows = vec![row("10", "1", "12"), row("20", "2", "12")];
        let groups = summarize(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["12"].total_quantity, dec!(3));
        // A short code and a 4-character code sharing the prefix stay apart
        let rows = vec![row("10", "1", "12"), row("20", "2", "1200")];
        assert_eq!(summarize(&rows).len(), 2);
    }

    #[test]
    fn group_quantities_sum_to_table_quantity() {
        let rows = vec![
            row("100", "2", "1234AB"),
            row("50", "3", "5678"),
            row("25", "", "1234"),
            row("10", "nope", "9999"),
        ];
        let groups = summarize(&rows);
        let group_sum: Decimal = groups.values().map(|g| g.total_quantity).sum();
        assert_eq!(group_sum, totals(&rows).total_quantity);
        assert_eq!(group_sum, dec!(5));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let rows = vec![row("100", "2", "1234AB"), row("50", "1", "5678")];
        assert_eq!(summarize(&rows), summarize(&rows));
    }

    #[test]
    fn non_numeric_quantity_contributes_zero() {
        let rows = vec![row("100", "lots", "1234")];
        let groups = summarize(&rows);
        assert_eq!(groups["1234"].total_quantity, Decimal::ZERO);
        assert_eq!(groups["1234"].total_line_value, Decimal::ZERO);
    }

    #[test]
    fn converted_line_values_use_converted_price() {
        let mut r = row("100", "2", "1234");
        r.price_gb = NumberCell::Value(dec!(20));
        let groups = summarize(&[r]);
        assert_eq!(groups["1234"].total_line_value_gb, dec!(40));
    }

    #[test]
    fn table_totals() {
        let mut rows = vec![row("100", "2", "1234"), row("50", "3", "5678")];
        rows[0].price_gb = NumberCell::Value(dec!(20));
        let t = totals(&rows);
        assert_eq!(t.total_price, dec!(150));
        assert_eq!(t.total_price_gb, dec!(20));
        assert_eq!(t.total_quantity, dec!(5));
    }
}
