// src/infrastructure/analysis/indicators.rs
// Indicator math over close prices. Every function returns one value per
// input element, `None` inside the warm-up window.

/// Simple Moving Average (SMA)
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; prices.len()];
    if period == 0 || prices.len() < period {
        return result;
    }

    for (i, window) in prices.windows(period).enumerate() {
        result[i + period - 1] = Some(mean(window));
    }

    result
}

/// Exponential Moving Average (EMA), seeded with the SMA of the first
/// `period` values.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let k = 2.0 / (period + 1) as f64;
    let mut previous = mean(&values[..period]);
    result[period - 1] = Some(previous);

    for (i, &value) in values.iter().enumerate().skip(period) {
        previous = value * k + previous * (1.0 - k);
        result[i] = Some(previous);
    }

    result
}

/// Relative Strength Index (RSI) from the plain mean of the gains and losses
/// of the trailing `period` close-to-close changes.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; prices.len()];
    if period == 0 || prices.len() <= period {
        return result;
    }

    for t in period..prices.len() {
        let (gain, loss) = prices[t - period..=t]
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(gain, loss), change: f64| {
                (gain + change.max(0.0), loss + (-change).max(0.0))
            });

        let avg_gain = gain / period as f64;
        let avg_loss = loss / period as f64;

        // No losses in the window: saturate instead of dividing by zero
        result[t] = if avg_loss == 0.0 {
            Some(100.0)
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        };
    }

    result
}

/// MACD line and its signal line.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let fast_ema = calculate_ema(prices, fast_period);
    let slow_ema = calculate_ema(prices, slow_period);

    let macd_line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(fast, slow)| match (fast, slow) {
            (Some(fast), Some(slow)) => Some(fast - slow),
            _ => None,
        })
        .collect();

    // The defined part of the MACD line is a contiguous tail
    let defined: Vec<f64> = macd_line.iter().flatten().copied().collect();
    let offset = macd_line.len() - defined.len();

    let mut signal_line = vec![None; offset];
    signal_line.extend(calculate_ema(&defined, signal_period));

    (macd_line, signal_line)
}

/// Bollinger Bands as (upper, middle, lower), using the population standard
/// deviation of the window.
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev_multiplier: f64,
) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut upper_band = vec![None; prices.len()];
    let mut middle_band = vec![None; prices.len()];
    let mut lower_band = vec![None; prices.len()];
    if period == 0 || prices.len() < period {
        return (upper_band, middle_band, lower_band);
    }

    for (i, window) in prices.windows(period).enumerate() {
        let middle = mean(window);
        let variance = window.iter().map(|&x| (x - middle).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        let t = i + period - 1;
        upper_band[t] = Some(middle + std_dev_multiplier * std_dev);
        middle_band[t] = Some(middle);
        lower_band[t] = Some(middle - std_dev_multiplier * std_dev);
    }

    (upper_band, middle_band, lower_band)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta::indicators::{BollingerBands, SimpleMovingAverage};
    use ta::Next;

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + 10.0 * (i as f64 * 0.3).sin() + i as f64 * 0.1)
            .collect()
    }

    fn assert_approx(actual: f64, expected: f64, epsilon: f64, msg: &str) {
        assert!(
            (actual - expected).abs() < epsilon,
            "{}: expected {}, got {}",
            msg,
            expected,
            actual
        );
    }

    #[test]
    fn sma_matches_trailing_mean() {
        let prices = wave(80);
        let sma = calculate_sma(&prices, 20);

        assert!(sma[..19].iter().all(Option::is_none));
        for t in 19..prices.len() {
            let expected = prices[t - 19..=t].iter().sum::<f64>() / 20.0;
            assert_approx(sma[t].unwrap(), expected, 1e-9, "SMA_20");
        }
    }

    #[test]
    fn sma_agrees_with_ta_crate() {
        let prices = wave(60);
        let sma = calculate_sma(&prices, 20);
        let mut reference = SimpleMovingAverage::new(20).unwrap();

        for (t, &price) in prices.iter().enumerate() {
            let expected = reference.next(price);
            if t >= 19 {
                assert_approx(sma[t].unwrap(), expected, 1e-9, "SMA vs ta");
            }
        }
    }

    #[test]
    fn short_series_yields_only_undefined_values() {
        let prices = wave(10);
        assert!(calculate_sma(&prices, 20).iter().all(Option::is_none));
        assert!(calculate_rsi(&prices, 14).iter().all(Option::is_none));
        assert_eq!(calculate_sma(&prices, 20).len(), 10);
    }

    #[test]
    fn ema_is_seeded_with_sma() {
        let data = vec![22.27, 22.19, 22.08, 22.17, 22.18, 22.13, 22.23, 22.43];
        let ema = calculate_ema(&data, 5);

        assert!(ema[..4].iter().all(Option::is_none));
        let seed = (22.27 + 22.19 + 22.08 + 22.17 + 22.18) / 5.0;
        assert_approx(ema[4].unwrap(), seed, 1e-12, "EMA seed");

        let k = 2.0 / 6.0;
        let next = 22.13 * k + seed * (1.0 - k);
        assert_approx(ema[5].unwrap(), next, 1e-12, "EMA[5]");
    }

    #[test]
    fn ema_is_bit_reproducible() {
        let prices = wave(120);
        assert_eq!(calculate_ema(&prices, 12), calculate_ema(&prices, 12));
    }

    #[test]
    fn rsi_saturates_on_gains_only() {
        let prices: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
        let rsi = calculate_rsi(&prices, 14);

        assert!(rsi[..14].iter().all(Option::is_none));
        assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
    }

    #[test]
    fn rsi_is_zero_on_losses_only() {
        let prices: Vec<f64> = (0..30).map(|i| 80.0 - i as f64).collect();
        let rsi = calculate_rsi(&prices, 14);

        assert!(rsi[14..].iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn rsi_only_looks_at_trailing_window() {
        // A crash early on, then 14 straight gains
        let mut prices = vec![100.0, 60.0];
        prices.extend((1..=20).map(|i| 60.0 + i as f64));
        let rsi = calculate_rsi(&prices, 14);

        assert_eq!(*rsi.last().unwrap(), Some(100.0));
    }

    #[test]
    fn rsi_stays_in_range() {
        let prices = wave(200);
        for value in calculate_rsi(&prices, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
        }
    }

    #[test]
    fn macd_warm_up_windows() {
        let prices = wave(60);
        let (macd, signal) = calculate_macd(&prices, 12, 26, 9);

        assert_eq!(macd.len(), 60);
        assert_eq!(signal.len(), 60);
        assert!(macd[..25].iter().all(Option::is_none));
        assert!(macd[25..].iter().all(Option::is_some));
        assert!(signal[..33].iter().all(Option::is_none));
        assert!(signal[33..].iter().all(Option::is_some));
    }

    #[test]
    fn macd_signal_is_ema_of_macd() {
        let prices = wave(60);
        let (macd, signal) = calculate_macd(&prices, 12, 26, 9);
        let seed = macd[25..34].iter().flatten().sum::<f64>() / 9.0;

        assert_approx(signal[33].unwrap(), seed, 1e-12, "signal seed");
    }

    #[test]
    fn macd_without_slow_window_is_undefined() {
        let prices = wave(20);
        let (macd, signal) = calculate_macd(&prices, 12, 26, 9);

        assert!(macd.iter().all(Option::is_none));
        assert!(signal.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_bands_bracket_the_middle() {
        let prices = wave(100);
        let (upper, middle, lower) = calculate_bollinger_bands(&prices, 20, 2.0);
        let sma = calculate_sma(&prices, 20);

        for t in 0..prices.len() {
            match (upper[t], middle[t], lower[t]) {
                (Some(u), Some(m), Some(l)) => {
                    assert!(l <= m && m <= u);
                    assert_eq!(Some(m), sma[t]);
                }
                (None, None, None) => assert!(t < 19),
                other => panic!("bands partially defined at {}: {:?}", t, other),
            }
        }
    }

    #[test]
    fn bollinger_bands_agree_with_ta_crate() {
        let prices = wave(60);
        let (upper, _, lower) = calculate_bollinger_bands(&prices, 20, 2.0);
        let mut reference = BollingerBands::new(20, 2.0_f64).unwrap();

        for (t, &price) in prices.iter().enumerate() {
            let expected = reference.next(price);
            if t >= 19 {
                assert_approx(upper[t].unwrap(), expected.upper, 1e-6, "upper band");
                assert_approx(lower[t].unwrap(), expected.lower, 1e-6, "lower band");
            }
        }
    }

    #[test]
    fn flat_prices_collapse_the_bands() {
        let prices = vec![25.0; 30];
        let (upper, middle, lower) = calculate_bollinger_bands(&prices, 20, 2.0);

        assert_eq!(upper[29], Some(25.0));
        assert_eq!(middle[29], Some(25.0));
        assert_eq!(lower[29], Some(25.0));
    }
}
