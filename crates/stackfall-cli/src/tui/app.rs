use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Set the initial tick interval here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles key input, resize and other terminal events.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen; called only after a tick or a terminal event.
    fn draw(&self, frame: &mut Frame);

    /// Advances the app by one tick.
    ///
    /// May change or clear the tick interval through `tui`.
    fn update(&mut self, tui: &mut Tui);
}
