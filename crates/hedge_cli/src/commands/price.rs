//! Price command implementation
//!
//! Quotes the unit price, delta, and gamma of a single option leg.

use hedge_models::analytical::{AnalyticalError, BlackScholes, OptionKind};
use hedge_models::models::DAYS_PER_YEAR;
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::{CliError, Result};

/// Inputs for one quote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRequest {
    /// Call or put
    pub kind: OptionKind,
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Calendar days to expiry
    pub days: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
}

/// Single-leg quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegQuote {
    /// Call or put
    pub kind: OptionKind,
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Years to expiry
    pub expiry: f64,
    /// Unit price
    pub price: f64,
    /// Unit delta
    pub delta: f64,
    /// Unit gamma
    pub gamma: f64,
}

/// Compute the quote, validating every input
pub fn quote(request: &PriceRequest) -> Result<LegQuote> {
    if !(request.strike > 0.0 && request.strike.is_finite()) {
        return Err(AnalyticalError::InvalidStrike {
            strike: request.strike,
        }
        .into());
    }
    if !(request.days >= 0.0 && request.days.is_finite()) {
        return Err(CliError::invalid_argument(format!(
            "days must be non-negative, got {}",
            request.days
        )));
    }

    let model = BlackScholes::new(request.spot, request.rate, request.volatility)?;
    let expiry = request.days / DAYS_PER_YEAR;

    Ok(LegQuote {
        kind: request.kind,
        spot: request.spot,
        strike: request.strike,
        expiry,
        price: model.price(request.kind, request.strike, expiry),
        delta: model.delta(request.kind, request.strike, expiry),
        gamma: model.gamma(request.strike, expiry),
    })
}

/// Run the price command
pub fn run(request: &PriceRequest, format: OutputFormat) -> Result<()> {
    info!(
        kind = request.kind.name(),
        spot = request.spot,
        strike = request.strike,
        days = request.days,
        "Pricing leg"
    );

    let quote = quote(request)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
        OutputFormat::Table => print!("{}", render_table(&quote)),
    }
    Ok(())
}

fn render_table(quote: &LegQuote) -> String {
    format!(
        "\n┌────────────┬──────────────┐\n\
         │ {:<10} │ {:>12} │\n\
         ├────────────┼──────────────┤\n\
         │ Spot       │ {:>12.4} │\n\
         │ Strike     │ {:>12.4} │\n\
         │ Expiry (y) │ {:>12.6} │\n\
         │ Price      │ {:>12.4} │\n\
         │ Delta      │ {:>12.6} │\n\
         │ Gamma      │ {:>12.6} │\n\
         └────────────┴──────────────┘\n",
        "Leg",
        quote.kind.name(),
        quote.spot,
        quote.strike,
        quote.expiry,
        quote.price,
        quote.delta,
        quote.gamma,
    )
}
