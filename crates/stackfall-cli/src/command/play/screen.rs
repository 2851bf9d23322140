use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};
use stackfall_engine::{Game, GameEvent};

use crate::view::{
    SessionState,
    widgets::{GameDisplay, style},
};

#[derive(Debug)]
pub(super) struct PlayScreen {
    game: Game,
    paused: bool,
    is_exiting: bool,
    status: Option<String>,
}

impl PlayScreen {
    pub(super) fn new(game: Game) -> Self {
        Self {
            game,
            paused: false,
            is_exiting: false,
            status: None,
        }
    }

    pub(super) fn into_game(self) -> Game {
        self.game
    }

    pub(super) fn session_state(&self) -> SessionState {
        if self.game.state().is_game_over() {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    pub(super) fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Interval the runtime should tick at; `None` while paused or once the
    /// engine has stopped its tick.
    pub(super) fn tick_interval(&self) -> Option<Duration> {
        if self.paused {
            return None;
        }
        self.game.tick_handle().interval()
    }

    pub(super) fn handle_event(&mut self, event: &Event) {
        let state = self.session_state();
        let Some(key) = event
            .as_key_event()
            .filter(|key| key.kind == KeyEventKind::Press)
        else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') if state.is_playing() => {
                _ = self.game.move_left();
            }
            KeyCode::Right | KeyCode::Char('l') if state.is_playing() => {
                _ = self.game.move_right();
            }
            KeyCode::Char('p') if !state.is_game_over() => self.paused = !self.paused,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub(super) fn update(&mut self) {
        if !self.session_state().is_playing() {
            return;
        }
        self.game.descend();

        let events: Vec<_> = self.game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::PieceLocked { lines_cleared: 0 } => {}
                GameEvent::PieceLocked { lines_cleared } => {
                    let noun = if lines_cleared == 1 { "line" } else { "lines" };
                    self.status = Some(format!("Cleared {lines_cleared} {noun}"));
                }
                GameEvent::GameOver => {
                    let stats = self.game.stats();
                    self.status = Some(format!(
                        "Game over: {} pieces, {} lines",
                        stats.locked_pieces(),
                        stats.lines_cleared()
                    ));
                }
            }
        }
    }

    pub(super) fn draw(&self, frame: &mut Frame) {
        let state = self.session_state();
        let help_text = match state {
            SessionState::Playing => "Controls: ← → / H L (Move) | P (Pause) | Q (Quit)",
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Q (Quit)",
        };
        let help = Text::styled(help_text, style::HELP).centered();
        let status = Text::styled(self.status.as_deref().unwrap_or_default(), style::DEFAULT)
            .centered();

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(GameDisplay::new(&self.game, state), main_area);
        frame.render_widget(status, status_area);
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use stackfall_engine::{
        Board, GameConfig, GameVariant, ShapeCatalog, ShapeDefinition, SpawnSeed,
    };

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen() -> PlayScreen {
        let config = GameConfig {
            seed: Some(SpawnSeed::from_u64(11)),
            ..GameConfig::for_variant(GameVariant::Simple)
        };
        PlayScreen::new(Game::new(&config).unwrap())
    }

    fn active_x(screen: &PlayScreen) -> i32 {
        screen.game.active().unwrap().position().x
    }

    #[test]
    fn test_arrow_and_vi_keys_move() {
        let mut screen = screen();
        let x = active_x(&screen);

        screen.handle_event(&key(KeyCode::Left));
        assert_eq!(active_x(&screen), x - 1);
        screen.handle_event(&key(KeyCode::Char('l')));
        screen.handle_event(&key(KeyCode::Right));
        assert_eq!(active_x(&screen), x + 1);
        screen.handle_event(&key(KeyCode::Char('h')));
        assert_eq!(active_x(&screen), x);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut screen = screen();
        let x = active_x(&screen);
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        screen.handle_event(&release);
        assert_eq!(active_x(&screen), x);
    }

    #[test]
    fn test_pause_freezes_moves_and_ticks() {
        let mut screen = screen();
        let x = active_x(&screen);

        screen.handle_event(&key(KeyCode::Char('p')));
        assert_eq!(screen.session_state(), SessionState::Paused);
        assert_eq!(screen.tick_interval(), None);

        screen.handle_event(&key(KeyCode::Left));
        screen.update();
        assert_eq!(active_x(&screen), x);
        assert_eq!(screen.game.stats().ticks(), 0);

        screen.handle_event(&key(KeyCode::Char('p')));
        assert_eq!(screen.session_state(), SessionState::Playing);
        screen.update();
        assert_eq!(screen.game.stats().ticks(), 1);
    }

    #[test]
    fn test_game_over_at_start() {
        let board = Board::from_pattern(&["##########", ".........."]).unwrap();
        let game = Game::with_board(&GameConfig::default(), ShapeCatalog::standard(), board)
            .unwrap();
        let mut screen = PlayScreen::new(game);

        assert_eq!(screen.session_state(), SessionState::GameOver);
        assert_eq!(screen.tick_interval(), None);

        screen.handle_event(&key(KeyCode::Char('p')));
        assert_eq!(screen.session_state(), SessionState::GameOver);

        screen.handle_event(&key(KeyCode::Char('q')));
        assert!(screen.is_exiting());
    }

    #[test]
    fn test_line_clear_sets_status() {
        let board = Board::from_pattern(&["....", "....", "##..", "##.."]).unwrap();
        let square = ShapeDefinition::from_rows("Square", &[&[1, 1], &[1, 1]]).unwrap();
        let catalog = ShapeCatalog::new([square]).unwrap();
        let config = GameConfig {
            spawn_column: 2,
            ..GameConfig::default()
        };
        let mut screen = PlayScreen::new(Game::with_board(&config, catalog, board).unwrap());

        screen.update();
        screen.update();
        assert_eq!(screen.status, None);
        screen.update();
        assert_eq!(screen.status.as_deref(), Some("Cleared 2 lines"));
    }
}
