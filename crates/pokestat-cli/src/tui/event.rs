use crossterm::event::Event as CrosstermEvent;

/// What the event loop hands to the runner.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// State changed since the last frame.
    Render,
    /// Input from the terminal.
    Crossterm(CrosstermEvent),
}
