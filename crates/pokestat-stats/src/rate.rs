/// Computes `wins / total * 100`, returning `0.0` when `total` is zero.
///
/// # Examples
///
/// ```
/// use pokestat_stats::rate::win_rate_percent;
///
/// assert_eq!(win_rate_percent(3, 4), 75.0);
/// assert_eq!(win_rate_percent(0, 0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn win_rate_percent(wins: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}
