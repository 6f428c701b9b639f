//! Power rating (OVR) calculation.
//!
//! OVR is the sum of three independently capped sub-scores, rounded and
//! clamped to `[MIN_OVR, MAX_OVR]`:
//!
//! | Component  | Formula                            | Cap |
//! |------------|------------------------------------|-----|
//! | price      | `price^1.15 * 0.45`                | 70  |
//! | market cap | `max(0, log10(cap) - 6) * 4`       | 20  |
//! | volume     | `(volume / 1e6)^0.5 * 2.6`         | 10  |

use super::card::CardStats;

pub const MIN_OVR: i64 = 10;
pub const MAX_OVR: i64 = 100;

const PRICE_CAP: f64 = 70.0;
const MARKET_CAP_CAP: f64 = 20.0;
const VOLUME_CAP: f64 = 10.0;

/// NaN, infinite and negative inputs all count as zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn price_score(price: f64) -> f64 {
    (price.powf(1.15) * 0.45).min(PRICE_CAP)
}

fn market_cap_score(market_cap: f64) -> f64 {
    if market_cap <= 0.0 {
        return 0.0;
    }
    ((market_cap.log10() - 6.0).max(0.0) * 4.0).min(MARKET_CAP_CAP)
}

fn volume_score(volume: f64) -> f64 {
    ((volume / 1e6).sqrt() * 2.6).min(VOLUME_CAP)
}

/// Compute a card's OVR from its market stats.
#[must_use]
pub fn calculate_ovr(stats: &CardStats) -> i64 {
    let price = sanitize(stats.price);
    let market_cap = sanitize(stats.market_cap);
    let volume = sanitize(stats.volume);

    let raw = price_score(price) + market_cap_score(market_cap) + volume_score(volume);
    let ovr = (raw.round() as i64).clamp(MIN_OVR, MAX_OVR);

    if !(MIN_OVR..=MAX_OVR).contains(&ovr) {
        tracing::warn!(ovr, ?stats, "OVR outside documented bounds after clamping");
    }

    ovr
}
