//! Plain-text tables of the analysis report.

use pokestat_analysis::{
    attribute_profile::{AttributeMean, ProfileGroup, mean_of},
    entity_wins::EntityWins,
    importance::RankedFeature,
    type_win_rate::TypeWinRate,
    win_distribution::WinCount,
};
use pokestat_data::Attribute;
use pokestat_stats::{descriptive::DescriptiveStats, histogram::Histogram};

const BAR_WIDTH: usize = 40;

/// A bar of `value / max` times [`BAR_WIDTH`] block characters.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max).min(1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

fn print_separator(width: usize) {
    println!("  {}", "-".repeat(width));
}

fn print_empty() {
    println!("  (no data)");
}

pub(super) fn print_importance(ranking: &[RankedFeature]) {
    if ranking.is_empty() {
        print_empty();
        return;
    }
    println!("  {:<20} {:>10}", "Feature", "Importance");
    print_separator(31 + 1 + BAR_WIDTH);
    let max = ranking.iter().map(|row| row.importance).fold(0.0, f64::max);
    for row in ranking {
        println!(
            "  {:<20} {:>9.1}% {}",
            row.label,
            row.importance,
            bar(row.importance, max)
        );
    }
}

pub(super) fn print_type_win_rates(rows: &[TypeWinRate]) {
    if rows.is_empty() {
        print_empty();
        return;
    }
    println!(
        "  {:<12} {:>8} {:>8} {:>9}",
        "Type", "Battles", "Wins", "Win rate"
    );
    // type(12) + battles(8) + wins(8) + rate(9) + spaces(3)
    print_separator(40);
    for row in rows {
        println!(
            "  {:<12} {:>8} {:>8} {:>8.1}%",
            row.type_label, row.total, row.wins, row.win_rate
        );
    }
}

fn entity_name(row: &EntityWins) -> String {
    row.name.clone().unwrap_or_else(|| format!("#{}", row.id.0))
}

pub(super) fn print_top_winners(rows: &[EntityWins]) {
    if rows.is_empty() {
        print_empty();
        return;
    }
    println!(
        "  {:>4} {:>6} {:<24} {:>8} {:>8} {:>9}",
        "Rank", "ID", "Name", "Battles", "Wins", "Win rate"
    );
    // rank(4) + id(6) + name(24) + battles(8) + wins(8) + rate(9) + spaces(5)
    print_separator(64);
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "  {:>4} {:>6} {:<24} {:>8} {:>8} {:>8.1}%",
            rank + 1,
            row.id.0,
            entity_name(row),
            row.total,
            row.wins,
            row.win_rate
        );
    }
}

#[expect(clippy::cast_precision_loss)]
pub(super) fn print_win_histogram(counts: &[WinCount], histogram: &Histogram) {
    let Some(stats) = DescriptiveStats::new(counts.iter().map(|count| count.wins as f64)) else {
        print_empty();
        return;
    };
    println!(
        "  Winners: {}  Mean: {:.2}  Median: {:.1}  Min: {}  Max: {}  StdDev: {:.2}",
        stats.count, stats.mean, stats.median, stats.min, stats.max, stats.std_dev
    );
    println!("  {:<17} {:>8}", "Wins", "Entities");
    print_separator(26 + 1 + BAR_WIDTH);
    let bins = &histogram.bins;
    let max = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
    for bin in bins {
        println!(
            "  {:>8.1}-{:<8.1} {:>8} {}",
            bin.range.start,
            bin.range.end,
            bin.count,
            bar(bin.count as f64, max as f64)
        );
    }
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map_or_else(|| "-".to_string(), |mean| format!("{mean:.1}"))
}

pub(super) fn print_attribute_profile(rows: &[AttributeMean]) {
    if rows.is_empty() {
        print_empty();
        return;
    }
    print!("  {:<12}", "Attribute");
    for group in ProfileGroup::ALL {
        print!(" {:>14}", group.to_string());
    }
    println!();
    // attribute(12) + groups(3 * 15)
    print_separator(57);
    for attribute in Attribute::ALL {
        print!("  {:<12}", attribute.display_name());
        for group in ProfileGroup::ALL {
            print!(" {:>14}", format_mean(mean_of(rows, group, attribute)));
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use pokestat_data::EntityId;

    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
        assert!(bar(0.0, 10.0).is_empty());
        assert!(bar(3.0, 0.0).is_empty());
    }

    #[test]
    fn test_entity_name_falls_back_to_id() {
        let row = EntityWins {
            id: EntityId(999),
            name: None,
            total: 2,
            wins: 1,
            win_rate: 50.0,
        };
        assert_eq!(entity_name(&row), "#999");
    }

    #[test]
    fn test_format_mean() {
        assert_eq!(format_mean(Some(70.26)), "70.3");
        assert_eq!(format_mean(None), "-");
    }
}
