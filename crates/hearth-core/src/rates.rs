//! Currency exchange rates
//!
//! Rates are fetched once per session from a public EUR-base endpoint and
//! held in [`CurrencyRates`]. Fetching is best-effort: any failure falls
//! back to a fixed EUR/INR rate so reports always render.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Currency;

/// Environment variable overriding the rate endpoint host
pub const RATES_HOST_ENV: &str = "HEARTH_RATES_HOST";

const DEFAULT_RATES_HOST: &str = "https://api.frankfurter.dev";

/// Fallback EUR→INR rate used when the endpoint is unreachable
pub const FALLBACK_INR_RATE: f64 = 90.0;

/// EUR-base exchange rates for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRates {
    /// Always 1.0 (EUR is the base)
    pub eur: f64,
    /// INR per EUR
    pub inr: f64,
}

impl CurrencyRates {
    pub fn fallback() -> Self {
        Self {
            eur: 1.0,
            inr: FALLBACK_INR_RATE,
        }
    }

    /// Convert an amount in `currency` to EUR
    pub fn to_eur(&self, amount: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Eur => amount,
            Currency::Inr => amount / self.inr,
        }
    }
}

#[derive(Deserialize)]
struct RatesResponse {
    rates: std::collections::HashMap<String, f64>,
}

/// Fetch current EUR-base rates from the configured endpoint
pub async fn fetch() -> Result<CurrencyRates> {
    let host =
        std::env::var(RATES_HOST_ENV).unwrap_or_else(|_| DEFAULT_RATES_HOST.to_string());
    let url = format!("{}/v1/latest?base=EUR&symbols=INR", host);

    debug!(url = %url, "Fetching exchange rates");
    let response: RatesResponse = reqwest::Client::new()
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let inr = response
        .rates
        .get("INR")
        .copied()
        .ok_or_else(|| Error::InvalidData("Rate response missing INR".to_string()))?;

    if !inr.is_finite() || inr <= 0.0 {
        return Err(Error::InvalidData(format!("Bad INR rate: {}", inr)));
    }

    Ok(CurrencyRates { eur: 1.0, inr })
}

/// Fetch rates, falling back to the fixed rate on any failure
///
/// Never returns an error; a fetch problem is logged and reports proceed
/// with the fallback rate.
pub async fn fetch_or_fallback() -> CurrencyRates {
    match fetch().await {
        Ok(rates) => rates,
        Err(e) => {
            warn!("Rate fetch failed, using fallback rates: {}", e);
            CurrencyRates::fallback()
        }
    }
}
