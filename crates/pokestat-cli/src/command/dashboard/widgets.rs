use pokestat_analysis::{
    attribute_profile::{AttributeMean, ProfileGroup, mean_of},
    entity_wins::EntityWins,
    importance::RankedFeature,
    type_win_rate::TypeWinRate,
};
use pokestat_data::Attribute;
use pokestat_stats::{descriptive::DescriptiveStats, histogram::Histogram};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    prelude::Direction,
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Bar, BarChart, Block, Paragraph, Row, Table, Widget},
};

fn section_block(title: String) -> Block<'static> {
    Block::bordered()
        .title(title)
        .merge_borders(MergeStrategy::Exact)
}

/// Draws `text` in place of an empty chart.
fn render_placeholder(block: Block<'_>, text: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .centered()
        .block(block)
        .render(area, buf);
}

/// Bar length in tenths of a percent, so one decimal survives.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_bar_value(percent: f64) -> u64 {
    (percent.max(0.0) * 10.0).round() as u64
}

pub struct ImportanceChart<'a> {
    pub ranking: &'a [RankedFeature],
    pub n_trees: usize,
}

impl Widget for ImportanceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = section_block(format!("Feature Importance ({} trees)", self.n_trees));
        if self.ranking.is_empty() {
            render_placeholder(block, "No battles to rank", area, buf);
            return;
        }
        let chart = BarChart::new(
            self.ranking
                .iter()
                .map(|row| {
                    Bar::with_label(row.label.clone(), percent_bar_value(row.importance))
                        .text_value(format!("{:.1}%", row.importance))
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Cyan))
        .bar_gap(1);
        Widget::render(chart, area, buf);
    }
}

pub struct TypeWinRateChart<'a> {
    pub rows: &'a [TypeWinRate],
}

impl Widget for TypeWinRateChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = section_block("Win Rate by Type".to_string());
        if self.rows.is_empty() {
            render_placeholder(block, "No battles", area, buf);
            return;
        }
        let chart = BarChart::new(
            self.rows
                .iter()
                .map(|row| {
                    Bar::with_label(row.type_label.clone(), percent_bar_value(row.win_rate))
                        .text_value(format!("{:.1}% ({}/{})", row.win_rate, row.wins, row.total))
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Green))
        .bar_gap(0);
        Widget::render(chart, area, buf);
    }
}

fn wins_text(row: &EntityWins) -> String {
    format!("{} wins / {} ({:.1}%)", row.wins, row.total, row.win_rate)
}

pub struct TopWinnersChart<'a> {
    pub rows: &'a [EntityWins],
}

impl Widget for TopWinnersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = section_block(format!("Top {} Winners", self.rows.len()));
        if self.rows.is_empty() {
            render_placeholder(block, "No battles", area, buf);
            return;
        }
        let chart = BarChart::new(
            self.rows
                .iter()
                .map(|row| {
                    let label = row.name.clone().unwrap_or_else(|| format!("#{}", row.id.0));
                    Bar::with_label(label, row.wins).text_value(wins_text(row))
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .direction(Direction::Horizontal)
        .bar_style(Style::default().fg(Color::Yellow))
        .bar_gap(0);
        Widget::render(chart, area, buf);
    }
}

pub struct WinDistributionChart<'a> {
    pub histogram: &'a Histogram,
    pub stats: Option<&'a DescriptiveStats>,
}

impl Widget for WinDistributionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = section_block("Win Count Distribution".to_string());
        let Some(stats) = self.stats else {
            render_placeholder(block, "No winners", area, buf);
            return;
        };

        let layout = Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]);
        let [stats_area, chart_area] = layout.areas(block.inner(area));

        let text = vec![
            Line::raw(format!("  Winners: {:>10}", stats.count)),
            Line::raw(format!("  Mean:    {:10.2}", stats.mean)),
            Line::raw(format!("  Median:  {:10.1}", stats.median)),
            Line::raw(format!("  Min:     {:10.0}", stats.min)),
            Line::raw(format!("  Max:     {:10.0}", stats.max)),
            Line::raw(format!("  StdDev:  {:10.2}", stats.std_dev)),
        ];
        let chart = BarChart::new(
            self.histogram
                .bins
                .iter()
                .map(|bin| {
                    Bar::with_label(
                        format!("{:6.1}-{:6.1}", bin.range.start, bin.range.end),
                        bin.count,
                    )
                    .text_value(format!("{}", bin.count))
                })
                .collect::<Vec<_>>(),
        )
        .direction(Direction::Horizontal)
        .bar_gap(0);

        Widget::render(block, area, buf);
        Widget::render(Paragraph::new(text), stats_area, buf);
        Widget::render(chart, chart_area, buf);
    }
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map_or_else(|| "-".to_string(), |mean| format!("{mean:>8.1}"))
}

pub struct AttributeProfileTable<'a> {
    pub rows: &'a [AttributeMean],
}

impl Widget for AttributeProfileTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = section_block("Mean Attributes".to_string());
        if self.rows.is_empty() {
            render_placeholder(block, "No entities", area, buf);
            return;
        }

        let mut header = vec!["Attribute".to_string()];
        header.extend(ProfileGroup::ALL.iter().map(ToString::to_string));
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let rows = Attribute::ALL.iter().map(|&attribute| {
            let mut cells = vec![attribute.display_name().to_string()];
            for group in ProfileGroup::ALL {
                cells.push(format_mean(mean_of(self.rows, group, attribute)));
            }
            Row::new(cells)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Length(14),
            ],
        )
        .header(Row::new(header).style(bold))
        .column_spacing(2)
        .block(block);
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bar_value() {
        assert_eq!(percent_bar_value(45.26), 453);
        assert_eq!(percent_bar_value(0.0), 0);
        assert_eq!(percent_bar_value(-1.0), 0);
    }

    #[test]
    fn test_table_cells() {
        assert_eq!(format_mean(Some(106.0)), "   106.0");
        assert_eq!(format_mean(None), "-");
        let row = EntityWins {
            id: pokestat_data::EntityId(25),
            name: Some("Pikachu".to_string()),
            total: 4,
            wins: 3,
            win_rate: 75.0,
        };
        assert_eq!(wins_text(&row), "3 wins / 4 (75.0%)");
    }
}
