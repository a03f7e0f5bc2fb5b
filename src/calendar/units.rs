use crate::theme::{grid::FOCUSED_STYLE, grid::SELECTED_STYLE, BASE_STYLE, DISABLED_STYLE};
use rangepick::config::WritingDirection;
use rangepick::grid::GridCell;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};
use time::Date;

/// Width of a single unit's cell in columns
const CELL_WIDTH: u16 = 8;

/// Maximum number of rows of units displayed at once
const MAX_ROWS: u16 = 6;

/// An overlay listing the months of a year or a span of years, three per
/// row, scrolled so that the focused unit is visible
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnitGrid<'a> {
    cells: &'a [GridCell<Date>],
    title: &'a str,
    row_width: usize,
    direction: WritingDirection,
}

impl<'a> UnitGrid<'a> {
    pub(crate) fn new(
        cells: &'a [GridCell<Date>],
        title: &'a str,
        row_width: usize,
        direction: WritingDirection,
    ) -> UnitGrid<'a> {
        UnitGrid {
            cells,
            title,
            row_width: row_width.max(1),
            direction,
        }
    }

    fn cell_style(cell: &GridCell<Date>) -> Style {
        if cell.focused {
            FOCUSED_STYLE
        } else if cell.selected {
            SELECTED_STYLE
        } else if cell.disabled {
            DISABLED_STYLE
        } else {
            BASE_STYLE
        }
    }
}

impl Widget for UnitGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.cells.chunks(self.row_width).collect::<Vec<_>>();
        let focused_row = self
            .cells
            .iter()
            .position(|c| c.focused)
            .map_or(0, |i| i / self.row_width);
        let visible = rows.len().min(usize::from(MAX_ROWS));
        let first_row = focused_row
            .saturating_sub(visible / 2)
            .min(rows.len() - visible);
        let width = u16::try_from(self.row_width)
            .unwrap_or(1)
            .saturating_mul(CELL_WIDTH)
            .saturating_add(2);
        let height = u16::try_from(visible).unwrap_or(MAX_ROWS).saturating_add(2);
        let [grid_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [grid_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(grid_area);
        Clear.render(grid_area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(grid_area);
        block.render(grid_area, buf);
        for (y, row) in std::iter::zip(inner.y.., rows.iter().skip(first_row).take(visible)) {
            for (i, cell) in std::iter::zip(0u16.., row.iter()) {
                let slot = match self.direction {
                    WritingDirection::Ltr => i,
                    WritingDirection::Rtl => u16::try_from(self.row_width)
                        .unwrap_or(1)
                        .saturating_sub(1)
                        .saturating_sub(i),
                };
                let rect = Rect {
                    x: inner.x.saturating_add(slot.saturating_mul(CELL_WIDTH)),
                    y,
                    width: CELL_WIDTH,
                    height: 1,
                }
                .intersection(inner);
                Paragraph::new(Line::styled(cell.label.as_str(), Self::cell_style(cell)))
                    .alignment(Alignment::Center)
                    .render(rect, buf);
            }
        }
    }
}
