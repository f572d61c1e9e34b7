//! Indicator engine: pure transforms over price columns.
//!
//! Every function returns one value per input period. Periods without enough
//! trailing history hold `NaN` ("no value"); nothing here panics or errors on
//! short input. Conversion to `Option` happens at the snapshot boundary.

use statrs::statistics::Statistics;

use crate::config::IndicatorConfig;
use crate::domain::Candle;
use crate::models::{IndicatorValues, PivotLevels, PriceSeries};
use crate::utils::maths_utils::{defined, round_to};

/// Trailing arithmetic mean over `n` periods. The first `n - 1` periods are `NaN`.
pub fn sma(values: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if n == 0 || values.len() < n {
        return out;
    }
    for (offset, window) in values.windows(n).enumerate() {
        out[offset + n - 1] = window.iter().sum::<f64>() / n as f64;
    }
    out
}

/// Exponential moving average with smoothing `2 / (n + 1)`, seeded by the first value
/// (no bias adjustment). Periods before the window fills are reported as `NaN`.
pub fn ema(values: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if n == 0 || values.is_empty() {
        return out;
    }

    let alpha = 2.0 / (n as f64 + 1.0);
    let mut running = values[0];
    for (idx, &value) in values.iter().enumerate() {
        if idx > 0 {
            running = alpha * value + (1.0 - alpha) * running;
        }
        if idx + 1 >= n {
            out[idx] = running;
        }
    }
    out
}

/// Relative strength index from trailing means of gains and losses.
/// Zero average loss leaves the ratio undefined, so the period is `NaN` rather than 100.
pub fn rsi(values: &[f64], n: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    // The first period has no delta
    let deltas: Vec<f64> = std::iter::once(f64::NAN)
        .chain(values.windows(2).map(|w| w[1] - w[0]))
        .collect();
    let gains: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { d } else { (-d).max(0.0) })
        .collect();

    let avg_gain = sma(&gains, n);
    let avg_loss = sma(&losses, n);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            if loss == 0.0 || loss.is_nan() || gain.is_nan() {
                return f64::NAN;
            }
            let rs = gain / loss;
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}

/// Bollinger envelope around an `n`-period SMA
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Middle = sma(n); half-width = `k` × trailing sample standard deviation over the same window.
pub fn bollinger(values: &[f64], n: usize, k: f64) -> BollingerBands {
    let middle = sma(values, n);
    let mut upper = vec![f64::NAN; values.len()];
    let mut lower = vec![f64::NAN; values.len()];

    if n > 0 && values.len() >= n {
        for (offset, window) in values.windows(n).enumerate() {
            let idx = offset + n - 1;
            // Sample standard deviation (n - 1 denominator)
            let half_width = k * window.iter().std_dev();
            upper[idx] = middle[idx] + half_width;
            lower[idx] = middle[idx] - half_width;
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

/// Cumulative volume-weighted average of the typical price (h + l + c) / 3.
/// Accumulates from the first period supplied; pass the scope VWAP should reset over.
pub fn vwap(highs: &[f64], lows: &[f64], closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let mut cumulative_pv = 0.0;
    let mut cumulative_volume = 0.0;

    highs
        .iter()
        .zip(lows)
        .zip(closes)
        .zip(volumes)
        .map(|(((&high, &low), &close), &volume)| {
            let typical = (high + low + close) / 3.0;
            cumulative_pv += typical * volume;
            cumulative_volume += volume;
            if cumulative_volume == 0.0 {
                f64::NAN
            } else {
                cumulative_pv / cumulative_volume
            }
        })
        .collect()
}

/// Classic floor-trader pivots from one period's high/low/close, rounded to 2 decimals.
pub fn pivot_levels(candle: &Candle) -> PivotLevels {
    let pp = candle.typical_price();
    let range = candle.range();
    let (high, low) = (candle.high_price, candle.low_price);
    PivotLevels {
        pp: round_to(pp, 2),
        r1: round_to(2.0 * pp - low, 2),
        r2: round_to(pp + range, 2),
        s1: round_to(2.0 * pp - high, 2),
        s2: round_to(pp - range, 2),
    }
}

// ============================================================================
// IndicatorSet: every indicator column for one series
// ============================================================================

#[derive(Debug, Clone)]
pub struct IndicatorSet {
    /// One column per configured SMA window, in configuration order
    pub sma: Vec<(usize, Vec<f64>)>,
    /// One column per configured EMA window, in configuration order
    pub ema: Vec<(usize, Vec<f64>)>,
    pub vwap: Vec<f64>,
    pub bollinger: BollingerBands,
    pub rsi: Vec<f64>,
}

impl IndicatorSet {
    /// Computes on the series' columns; the series itself is left untouched.
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Self {
        let closes = &series.close_prices;
        IndicatorSet {
            sma: config
                .sma_windows
                .iter()
                .map(|&n| (n, sma(closes, n)))
                .collect(),
            ema: config
                .ema_windows
                .iter()
                .map(|&n| (n, ema(closes, n)))
                .collect(),
            vwap: vwap(
                &series.high_prices,
                &series.low_prices,
                closes,
                &series.volumes,
            ),
            bollinger: bollinger(closes, config.bollinger_window, config.bollinger_k),
            rsi: rsi(closes, config.rsi_window),
        }
    }

    /// Column of the `window`-period average, whatever order the windows were configured in
    fn window_at(columns: &[(usize, Vec<f64>)], window: usize, idx: usize) -> Option<f64> {
        columns
            .iter()
            .find(|(n, _)| *n == window)
            .and_then(|(_, column)| column.get(idx))
            .and_then(|&v| defined(v))
    }

    fn value_at(column: &[f64], idx: usize) -> Option<f64> {
        column.get(idx).and_then(|&v| defined(v))
    }

    /// The whole set evaluated at period `idx`. A label without a configured window is absent.
    pub fn values_at(&self, idx: usize) -> IndicatorValues {
        IndicatorValues {
            sma5: Self::window_at(&self.sma, 5, idx),
            sma9: Self::window_at(&self.sma, 9, idx),
            sma20: Self::window_at(&self.sma, 20, idx),
            sma50: Self::window_at(&self.sma, 50, idx),
            sma120: Self::window_at(&self.sma, 120, idx),
            sma200: Self::window_at(&self.sma, 200, idx),
            ema20: Self::window_at(&self.ema, 20, idx),
            ema50: Self::window_at(&self.ema, 50, idx),
            vwap: Self::value_at(&self.vwap, idx),
            bb_upper: Self::value_at(&self.bollinger.upper, idx),
            bb_middle: Self::value_at(&self.bollinger.middle, idx),
            bb_lower: Self::value_at(&self.bollinger.lower, idx),
            rsi14: Self::value_at(&self.rsi, idx),
        }
    }
}
