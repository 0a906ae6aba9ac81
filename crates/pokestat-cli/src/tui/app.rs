use crossterm::event::Event;
use ratatui::Frame;

/// A full-screen application driven by [`Tui::run`](super::Tui::run).
pub trait App {
    /// Checked before every event; `true` restores the terminal and returns.
    fn should_exit(&self) -> bool;

    /// Reacts to key presses, resizes and other terminal input.
    fn handle_event(&mut self, event: &Event);

    /// Draws the whole screen from the current state.
    fn draw(&self, frame: &mut Frame);
}
