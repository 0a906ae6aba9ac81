//! Statistics helpers shared by the pokestat crates.
//!
//! This crate provides the small numeric toolbox the battle analysis is built on:
//!
//! - **Descriptive statistics**: min, max, mean, median, variance and standard deviation
//! - **Standardization**: zero-mean / unit-variance column scaling fit on a dataset
//! - **Win rates**: percentage helper that never divides by zero
//! - **Histogram generation**: equal-width binning of raw counts for display
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`scaler`]: Column standardization (`StandardScaler`)
//! - [`rate`]: Win-rate percentage computation
//! - [`histogram`]: Equal-width histograms for visualizing distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use pokestat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Standardizing feature columns
//!
//! ```
//! use pokestat_stats::scaler::StandardScaler;
//!
//! let columns = vec![vec![1.0, 2.0, 3.0], vec![10.0, 10.0, 10.0]];
//! let scaler = StandardScaler::fit(&columns);
//! let scaled = scaler.transform(&columns);
//! assert_eq!(scaled[0][1], 0.0);
//! assert_eq!(scaled[1], vec![0.0, 0.0, 0.0]);
//! ```
//!
//! ## Computing a win rate
//!
//! ```
//! use pokestat_stats::rate::win_rate_percent;
//!
//! assert_eq!(win_rate_percent(1, 4), 25.0);
//! assert_eq!(win_rate_percent(0, 0), 0.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use pokestat_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::equal_width(values, 5);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod rate;
pub mod scaler;
