//! Market state owned by the session loop.

use std::collections::VecDeque;

/// Realised price path and simulated clock.
///
/// The path keeps only the most recent `window` prices; pricing only ever
/// reads the latest one, so discarding older entries is safe.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    price_path: VecDeque<f64>,
    window: usize,
    elapsed_days: u32,
}

impl MarketState {
    /// Starts a path at `seed_price` with a rolling window of `window` prices.
    ///
    /// `window` must be at least one.
    pub fn new(seed_price: f64, window: usize) -> Self {
        debug_assert!(window > 0, "price window must hold at least one price");
        let mut price_path = VecDeque::with_capacity(window);
        price_path.push_back(seed_price);
        Self {
            price_path,
            window,
            elapsed_days: 0,
        }
    }

    /// Most recent price.
    pub fn latest_price(&self) -> f64 {
        // Never empty: seeded on construction and only trimmed after a push
        self.price_path.back().copied().unwrap_or(f64::NAN)
    }

    /// Days simulated so far.
    pub fn elapsed_days(&self) -> u32 {
        self.elapsed_days
    }

    /// Retained prices, oldest first.
    pub fn price_path(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.price_path.iter().copied()
    }

    /// Capacity of the rolling window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Advances the clock one day and appends the day's price.
    pub(crate) fn advance(&mut self, price: f64) {
        self.elapsed_days += 1;
        self.price_path.push_back(price);
        while self.price_path.len() > self.window {
            self.price_path.pop_front();
        }
    }
}
