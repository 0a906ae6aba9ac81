use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Renders once at startup and after every terminal event, and otherwise
/// blocks on the terminal. The dashboard has no time-driven state, so there
/// are no tick events.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            dirty: true, // Initial render is required on startup
        }
    }

    /// Returns the next event.
    ///
    /// Blocks until a crossterm event occurs unless a render is pending.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
