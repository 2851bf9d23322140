use crossterm::event::Event;
use ratatui::Frame;
use stackfall_engine::Game;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub(super) struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub(super) fn new(screen: PlayScreen) -> Self {
        Self { screen }
    }

    pub(super) fn into_game(self) -> Game {
        self.screen.into_game()
    }

    /// Points the runtime's tick at the screen's interval, stopping it while
    /// paused and for good once the game is over.
    fn sync_tick(&self, tui: &mut Tui) {
        let interval = self.screen.tick_interval();
        if tui.tick_interval() != interval {
            tui.set_tick_interval(interval);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick(tui);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
        self.sync_tick(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.screen.update();
        self.sync_tick(tui);
    }
}
