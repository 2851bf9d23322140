use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Block as BlockWidget, Clear, Widget},
};
use stackfall_engine::Game;

use crate::view::{
    SessionState,
    widgets::{BoardDisplay, StatsDisplay, color, style},
};

/// Whole play screen: stats on the left, the board in the middle, and the
/// next-shape preview on the right when the variant has one.
///
/// The board border and a centered banner reflect the session state.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    game: &'a Game,
    state: SessionState,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a Game, state: SessionState) -> Self {
        Self { game, state }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.state {
            SessionState::Playing => Style::new().fg(color::WHITE),
            SessionState::Paused => Style::new().fg(color::YELLOW),
            SessionState::GameOver => Style::new().fg(color::RED),
        };
        let panel = |title: &'static str| {
            BlockWidget::bordered()
                .title(title)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(self.game.board())
            .active(self.game.active())
            .block(panel("BOARD"));
        let stats = StatsDisplay::new(self.game).block(panel("STATS"));
        let preview = self.game.preview();
        let preview = preview.as_ref().map(|grid| {
            BoardDisplay::new(grid)
                .filled_style(style::ACTIVE)
                .show_dots(false)
                .block(panel("NEXT"))
        });
        let preview_width = preview.as_ref().map_or(0, BoardDisplay::width);

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(preview_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        if let Some(preview) = preview {
            let [preview_area] =
                Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);
            preview.render(preview_area, buf);
        }

        let banner = match self.state {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED_BANNER)),
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER_BANNER)),
        };
        if let Some((text, style)) = banner {
            let block = BlockWidget::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
