use anyhow::Context;
use crossterm::event::{Event, KeyCode};
use pokestat_analysis::{
    cache::{AnalysisCache, DatasetFingerprint, Snapshot},
    report::{AnalysisConfig, AnalysisReport, clamp_top_n},
};
use pokestat_stats::{descriptive::DescriptiveStats, histogram::Histogram};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::Tabs,
};

use crate::{
    command::dashboard::widgets::{
        AttributeProfileTable, ImportanceChart, TopWinnersChart, TypeWinRateChart,
        WinDistributionChart,
    },
    config::DatasetArg,
    tui::App,
    util,
};

/// Dashboard sections, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Importance,
    TypeWinRates,
    TopWinners,
    WinDistribution,
    AttributeProfile,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Importance,
        Tab::TypeWinRates,
        Tab::TopWinners,
        Tab::WinDistribution,
        Tab::AttributeProfile,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Importance => "Importance",
            Tab::TypeWinRates => "Types",
            Tab::TopWinners => "Top Winners",
            Tab::WinDistribution => "Win Distribution",
            Tab::AttributeProfile => "Legendary Profile",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|&tab| tab == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        let index = self.index().checked_sub(1).unwrap_or(Tab::ALL.len() - 1);
        Tab::ALL[index]
    }
}

/// Everything drawn from one dataset snapshot.
#[derive(Debug)]
struct Loaded {
    fingerprint: DatasetFingerprint,
    report: AnalysisReport,
    histogram: Histogram,
    win_stats: Option<DescriptiveStats>,
}

impl Loaded {
    #[expect(clippy::cast_precision_loss)]
    fn compute(
        cache: &mut AnalysisCache,
        snapshot: &Snapshot,
        config: &AnalysisConfig,
    ) -> anyhow::Result<Self> {
        let report = AnalysisReport::compute(cache, snapshot, &config.forest)
            .context("Failed to rank feature importance")?;
        let histogram = report.win_histogram(config.histogram_bins);
        let win_stats =
            DescriptiveStats::new(report.win_distribution.iter().map(|row| row.wins as f64));
        Ok(Self {
            fingerprint: snapshot.fingerprint(),
            report,
            histogram,
            win_stats,
        })
    }
}

#[derive(Debug)]
pub struct DashboardApp {
    dataset: DatasetArg,
    config: AnalysisConfig,
    cache: AnalysisCache,
    loaded: Loaded,
    tab: Tab,
    top_n: usize,
    message: Option<String>,
    should_exit: bool,
}

impl DashboardApp {
    pub fn new(dataset: DatasetArg, config: AnalysisConfig) -> anyhow::Result<Self> {
        let snapshot = util::load_snapshot(&dataset)?;
        Self::from_snapshot(dataset, config, &snapshot)
    }

    fn from_snapshot(
        dataset: DatasetArg,
        config: AnalysisConfig,
        snapshot: &Snapshot,
    ) -> anyhow::Result<Self> {
        let mut cache = AnalysisCache::new();
        let loaded = Loaded::compute(&mut cache, snapshot, &config)?;
        let top_n = clamp_top_n(config.top_n, loaded.report.entity_wins.len());
        Ok(Self {
            dataset,
            config,
            cache,
            loaded,
            tab: Tab::Importance,
            top_n,
            message: None,
            should_exit: false,
        })
    }

    /// Re-reads both sources; a failed reload keeps the current tables.
    ///
    /// Memoized results of the previous snapshot are dropped once the new one
    /// is in place.
    fn reload(&mut self) {
        let result = util::load_snapshot(&self.dataset)
            .and_then(|snapshot| Loaded::compute(&mut self.cache, &snapshot, &self.config));
        match result {
            Ok(loaded) => {
                let changed = loaded.fingerprint != self.loaded.fingerprint;
                self.cache.retain_only(loaded.fingerprint);
                self.loaded = loaded;
                self.top_n = clamp_top_n(self.top_n, self.loaded.report.entity_wins.len());
                self.message = Some(if changed {
                    "Reloaded: dataset changed".to_string()
                } else {
                    "Reloaded: dataset unchanged".to_string()
                });
            }
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "reload failed");
                self.message = Some(format!("Reload failed: {error:#}"));
            }
        }
    }

    fn adjust_top_n(&mut self, increase: bool) {
        let requested = if increase {
            self.top_n + 1
        } else {
            self.top_n.saturating_sub(1)
        };
        self.top_n = clamp_top_n(requested, self.loaded.report.entity_wins.len());
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let report = &self.loaded.report;
        let stats = self.cache.stats();
        let fingerprint = self
            .loaded
            .fingerprint
            .to_string()
            .chars()
            .take(12)
            .collect::<String>();
        let mut status = format!(
            "{} entities | {} battles | dataset {fingerprint} | cache {} hits / {} misses",
            report.entities, report.battles, stats.hits, stats.misses
        );
        if let Some(message) = &self.message {
            status.push_str(" | ");
            status.push_str(message);
        }
        frame.render_widget(Text::from(status).centered(), area);
    }
}

impl App for DashboardApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                KeyCode::Right | KeyCode::Tab => self.tab = self.tab.next(),
                KeyCode::Left | KeyCode::BackTab => self.tab = self.tab.prev(),
                KeyCode::Char(c @ '1'..='5') => {
                    let index = c as usize - '1' as usize;
                    self.tab = Tab::ALL[index];
                }
                KeyCode::Char('+' | '=') => self.adjust_top_n(true),
                KeyCode::Char('-') => self.adjust_top_n(false),
                KeyCode::Char('r') => self.reload(),
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(
            Tab::ALL
                .iter()
                .enumerate()
                .map(|(i, tab)| format!("{}: {}", i + 1, tab.title())),
        )
        .select(self.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(tabs, tabs_area);

        let report = &self.loaded.report;
        match self.tab {
            Tab::Importance => frame.render_widget(
                ImportanceChart {
                    ranking: &report.importance,
                    n_trees: self.config.forest.n_trees,
                },
                main_area,
            ),
            Tab::TypeWinRates => frame.render_widget(
                TypeWinRateChart {
                    rows: &report.type_win_rates,
                },
                main_area,
            ),
            Tab::TopWinners => frame.render_widget(
                TopWinnersChart {
                    rows: report.top_winners(self.top_n),
                },
                main_area,
            ),
            Tab::WinDistribution => frame.render_widget(
                WinDistributionChart {
                    histogram: &self.loaded.histogram,
                    stats: self.loaded.win_stats.as_ref(),
                },
                main_area,
            ),
            Tab::AttributeProfile => frame.render_widget(
                AttributeProfileTable {
                    rows: &report.attribute_profile,
                },
                main_area,
            ),
        }

        self.draw_status(frame, status_area);

        let help_text = Text::from(format!(
            "←/→ or 1-5: Tab | +/-: Top-N ({}) | r: Reload | q/Esc: Quit",
            self.top_n
        ))
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crossterm::event::{KeyEvent, KeyModifiers};
    use pokestat_data::{
        BattleLog, BattleRecord, Entity, EntityCatalog, EntityId, Legendary, load::Dataset,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[expect(clippy::cast_precision_loss)]
    fn snapshot(n_entities: i64) -> Snapshot {
        let entities = (1..=n_entities)
            .map(|id| Entity {
                id: EntityId(id),
                name: format!("Mon{id}"),
                hp: 40.0 + id as f64,
                attack: 50.0,
                defense: 50.0,
                sp_attack: 50.0,
                sp_defense: 50.0,
                speed: 30.0 + 2.0 * id as f64,
                generation: 1,
                legendary: Legendary::Bool(id == n_entities),
                types: if id % 2 == 0 { "Fire".into() } else { "Water/Ice".into() },
            })
            .collect();
        // the faster entity always wins
        let battles = (1..n_entities)
            .flat_map(|a| ((a + 1)..=n_entities).map(move |b| (a, b)))
            .map(|(a, b)| BattleRecord::new(EntityId(a), EntityId(b), EntityId(b)))
            .collect::<BattleLog>();
        Snapshot::new(Dataset {
            catalog: EntityCatalog::new(entities).unwrap(),
            battles,
        })
    }

    fn app(n_entities: i64) -> DashboardApp {
        let config = AnalysisConfig {
            forest: pokestat_forest::ForestParams {
                n_trees: 5,
                ..Default::default()
            },
            ..AnalysisConfig::default()
        };
        let dataset = DatasetArg {
            pokemon_file: PathBuf::from("/nonexistent/pokemon.json"),
            combats_file: PathBuf::from("/nonexistent/combats.json"),
        };
        DashboardApp::from_snapshot(dataset, config, &snapshot(n_entities)).unwrap()
    }

    fn press(app: &mut DashboardApp, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn render(app: &DashboardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = app(8);
        assert_eq!(app.tab, Tab::Importance);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.tab, Tab::AttributeProfile);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tab, Tab::Importance);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::TopWinners);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.tab, Tab::TopWinners);
    }

    #[test]
    fn test_top_n_is_clamped() {
        let mut app = app(30);
        assert_eq!(app.top_n, 10);
        for _ in 0..40 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.top_n, 25);
        for _ in 0..40 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.top_n, 5);
    }

    #[test]
    fn test_top_n_with_few_entities() {
        let mut app = app(3);
        // entity 1 never wins but still has a row
        assert_eq!(app.top_n, 3);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.top_n, 3);
    }

    #[test]
    fn test_failed_reload_keeps_report() {
        let mut app = app(8);
        let before = app.loaded.report.clone();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.loaded.report, before);
        assert!(
            app.message
                .as_deref()
                .is_some_and(|message| message.starts_with("Reload failed"))
        );
    }

    #[test]
    fn test_reload_drops_previous_snapshot() {
        let previous = snapshot(8);
        let mut app = app(8);
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        app.dataset = DatasetArg {
            pokemon_file: data_dir.join("pokemon.json"),
            combats_file: data_dir.join("combats.json"),
        };
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.message.as_deref(), Some("Reloaded: dataset changed"));
        assert_ne!(app.loaded.fingerprint, previous.fingerprint());

        let misses = app.cache.stats().misses;
        app.cache.win_distribution(&previous);
        assert_eq!(app.cache.stats().misses, misses + 1);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.message.as_deref(), Some("Reloaded: dataset unchanged"));
        assert_eq!(app.cache.stats().misses, misses + 1);
    }

    #[test]
    fn test_quit() {
        let mut app = app(4);
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_every_tab_renders() {
        let mut app = app(12);
        let titles = [
            "Feature Importance",
            "Win Rate by Type",
            "Top 10 Winners",
            "Win Count Distribution",
            "Mean Attributes",
        ];
        for (i, title) in titles.iter().enumerate() {
            app.tab = Tab::ALL[i];
            let screen = render(&app);
            assert!(screen.contains(title), "tab {i} is missing {title:?}");
            assert!(screen.contains("12 entities"));
        }
    }
}
