use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use stackfall_engine::{Board, Shape};

use crate::view::widgets::{CellDisplay, style};

/// Renders a board grid.
///
/// Cells covered by the falling shape are drawn with [`style::ACTIVE`], other
/// filled cells with the filled style.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active: Option<&'a Shape>,
    filled_style: Style,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active: None,
            filled_style: style::LOCKED,
            show_dots: true,
            block: None,
        }
    }

    pub fn active(self, shape: Option<&'a Shape>) -> Self {
        Self {
            active: shape,
            ..self
        }
    }

    pub fn filled_style(self, filled_style: Style) -> Self {
        Self {
            filled_style,
            ..self
        }
    }

    pub fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::to_u16(self.board.column_count())
            .saturating_mul(CellDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::to_u16(self.board.row_count())
            .saturating_mul(CellDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    /// Board coordinates `(row, col)` of the falling shape's cells.
    fn active_cells(&self) -> Vec<(usize, usize)> {
        self.active
            .into_iter()
            .flat_map(Shape::occupied_positions)
            .filter_map(|(x, y)| Some((usize::try_from(y).ok()?, usize::try_from(x).ok()?)))
            .collect()
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let active_cells = self.active_cells();
        let horizontal = Layout::horizontal(
            (0..self.board.column_count()).map(|_| Constraint::Length(CellDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical(
            (0..self.board.row_count()).map(|_| Constraint::Length(CellDisplay::height())),
        );

        let row_areas = vertical.split(area);
        for (row, (row_area, cells)) in iter::zip(row_areas.iter(), self.board.rows()).enumerate() {
            let cell_areas = horizontal.split(*row_area);
            for (col, (cell_area, filled)) in iter::zip(cell_areas.iter(), cells).enumerate() {
                let cell = if !filled {
                    CellDisplay::empty(self.show_dots)
                } else if active_cells.contains(&(row, col)) {
                    CellDisplay::filled(style::ACTIVE)
                } else {
                    CellDisplay::filled(self.filled_style)
                };
                cell.render(*cell_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::style::Color;
    use stackfall_engine::{ShapeDefinition, ShapePosition};

    use super::*;
    use crate::view::widgets::color;

    fn bg_at(buf: &Buffer, x: u16, y: u16) -> Color {
        buf[(x, y)].bg
    }

    #[test]
    fn test_size_includes_block_border() {
        let board = Board::new(20, 10);
        let plain = BoardDisplay::new(&board);
        assert_eq!((plain.width(), plain.height()), (20, 20));

        let bordered = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!((bordered.width(), bordered.height()), (22, 22));
    }

    #[test]
    fn test_render_marks_active_and_locked_cells() {
        let mut board = Board::from_pattern(&["...", "#.."]).unwrap();
        let dot = Arc::new(ShapeDefinition::from_rows("Dot", &[&[1]]).unwrap());
        let shape = Shape::new(dot, ShapePosition::new(2, 0));
        board.place(&shape);

        let display = BoardDisplay::new(&board).active(Some(&shape));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        assert_eq!(bg_at(&buf, 0, 0), color::BLACK);
        assert_eq!(bg_at(&buf, 4, 0), color::CYAN);
        assert_eq!(bg_at(&buf, 5, 0), color::CYAN);
        assert_eq!(bg_at(&buf, 0, 1), color::BLUE);
        assert_eq!(bg_at(&buf, 1, 1), color::BLUE);
        assert_eq!(bg_at(&buf, 2, 1), color::BLACK);
    }

    #[test]
    fn test_shape_above_board_is_ignored() {
        let board = Board::new(2, 2);
        let dot = Arc::new(ShapeDefinition::from_rows("Dot", &[&[1]]).unwrap());
        let shape = Shape::new(dot, ShapePosition::new(0, -1));
        let display = BoardDisplay::new(&board).active(Some(&shape));
        assert!(display.active_cells().is_empty());
    }
}
