/// Ordinary least-squares fit of prices against their index positions,
/// oldest first. Returns (slope, intercept), or None when fewer than two
/// samples leave the slope undefined.
pub fn linear_fit(prices: &[f64]) -> Option<(f64, f64)> {
    let n = prices.len();
    if n < 2 {
        return None;
    }

    let count = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, price) in prices.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += price;
        sum_xy += x * price;
        sum_x2 += x * x;
    }

    let slope = (count * sum_xy - sum_x * sum_y) / (count * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / count;

    Some((slope, intercept))
}

/// Project the next price by evaluating the fitted line one step past the
/// last sample. None when no fit exists, so callers can tell "no estimate"
/// apart from "estimate equals the current price".
pub fn project_next(prices: &[f64]) -> Option<f64> {
    linear_fit(prices).map(|(slope, intercept)| slope * prices.len() as f64 + intercept)
}

/// Projection with the caller's current price as the neutral fallback
pub fn project_or(prices: &[f64], current_price: f64) -> f64 {
    project_next(prices).unwrap_or(current_price)
}
