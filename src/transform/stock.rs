//! Candidate construction from stock sizes and material prices.

use crate::error::Result;
use crate::model::{Candidate, Material, StockSize};

/// Build one candidate per stock size, net of `trim_margin`.
///
/// The unit price is the material's price for the stock label, else the stock's
/// own fixed price, else zero (not offered).
pub fn build_candidates(
    stock: &[StockSize],
    material: Option<&Material>,
    trim_margin: f64,
) -> Result<Vec<Candidate>> {
    stock
        .iter()
        .map(|size| {
            let price = material
                .and_then(|m| m.price_for(&size.label))
                .or(size.price)
                .unwrap_or(0.0);
            size.to_candidate(trim_margin, price)
        })
        .collect()
}
