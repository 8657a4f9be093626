//! NBP exchange-rate client and row conversion.
//!
//! Rates come from the NBP table A endpoint for GBP, one mid-rate per
//! business day. A failed or empty fetch is not an error: the context rate
//! goes to zero and conversion simply does not run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::row::{NumberCell, Row};

const NBP_RATES_URL: &str = "http://api.nbp.pl/api/exchangerates/rates/a/gbp";

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: Vec<RateEntry>,
}

#[derive(Debug, Deserialize)]
struct RateEntry {
    mid: Decimal,
}

/// A successfully fetched mid-rate, tagged with the date it was requested
/// for so a late response can be matched against the current target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuote {
    pub date: NaiveDate,
    pub mid: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFetch {
    Available(RateQuote),
    Unavailable { date: NaiveDate },
}

/// Fetch the GBP mid-rate for the given date.
///
/// Network failures, non-2xx responses (NBP answers 404 for dates without a
/// table, e.g. weekends) and bodies without rate entries all degrade to
/// `Unavailable`, logged for diagnostics only.
pub fn fetch_rate(date: NaiveDate) -> RateFetch {
    match request_mid(date) {
        Ok(Some(mid)) => {
            log::info!("gbp mid-rate for {} is {}", date, mid);
            RateFetch::Available(RateQuote { date, mid })
        }
        Ok(None) => {
            log::warn!("no rate entries for {}", date);
            RateFetch::Unavailable { date }
        }
        Err(err) => {
            log::error!("rate fetch for {} failed: {}", date, err);
            RateFetch::Unavailable { date }
        }
    }
}

fn request_mid(date: NaiveDate) -> anyhow::Result<Option<Decimal>> {
    let url = format!("{}/{}/", NBP_RATES_URL, date.format("%Y-%m-%d"));
    let response = ureq::get(&url).query("format", "json").call()?;
    let body: RatesResponse = response.into_json()?;
    Ok(body.rates.first().map(|entry| entry.mid))
}

/// The single active conversion state: which date a rate was requested for,
/// and the rate itself (zero until a fetch for that date succeeds).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionContext {
    pub target_date: Option<NaiveDate>,
    pub rate: Decimal,
}

impl ConversionContext {
    pub fn new(target_date: Option<NaiveDate>, rate: Decimal) -> Self {
        ConversionContext { target_date, rate }
    }

    /// Point the context at a new date. The previous rate is discarded up
    /// front; it belongs to the previous date whether or not the new fetch
    /// succeeds.
    pub fn request(&mut self, date: NaiveDate) {
        self.target_date = Some(date);
        self.rate = Decimal::ZERO;
    }

    /// Take the result of a fetch. A result for any date other than the
    /// current target is stale (the target moved while the request was in
    /// flight) and is dropped, whether it carried a rate or not.
    pub fn absorb(&mut self, fetch: RateFetch) {
        let fetched_for = match fetch {
            RateFetch::Available(quote) => quote.date,
            RateFetch::Unavailable { date } => date,
        };
        if self.target_date != Some(fetched_for) {
            log::warn!(
                "dropping stale rate result for {} (target date is now {:?})",
                fetched_for,
                self.target_date
            );
            return;
        }
        match fetch {
            RateFetch::Available(quote) => self.rate = quote.mid,
            RateFetch::Unavailable { .. } => self.rate = Decimal::ZERO,
        }
    }

    pub fn has_rate(&self) -> bool {
        self.rate > Decimal::ZERO
    }

    pub fn display(&self) -> String {
        if self.has_rate() {
            format!("Exchange Rate: {}", self.rate.normalize())
        } else {
            "Exchange Rate: N/A".to_string()
        }
    }
}

/// Derive the GB-currency cells for every row with a numeric price.
///
/// `price_gb = price / rate`, and the line values follow from the freshly
/// derived price so the two possible orderings (quantity x price_gb vs
/// quantity x price / rate) coincide. Rows without a numeric price, and the
/// whole table when the rate is zero, are left untouched rather than zeroed.
pub fn apply_rate(rows: &mut [Row], rate: Decimal) {
    if rate <= Decimal::ZERO {
        return;
    }
    for row in rows {
        let Some(price) = row.price.numeric() else {
            continue;
        };
        let price_gb = price / rate;
        row.price_gb = NumberCell::Value(price_gb);
        if let Some(quantity) = row.quantity.numeric() {
            row.line_value = NumberCell::Value(price * quantity);
            row.line_value_gb = NumberCell::Value(price_gb * quantity);
        }
    }
}
