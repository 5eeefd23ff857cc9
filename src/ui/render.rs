use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

use crate::game::{Snapshot, Tint};
use crate::ui::{centered, Scene};
use crate::{CELL_W, MIN_VIEW_H, MIN_VIEW_W, PANEL_W};

const BOARD_BORDER: u16 = 1;
const SCORE_PADDING: u16 = 1;
const BORDER_FADE: u8 = 50;
const HOLD_LABEL_POS: (u16, u16) = (2, 8);
const HOLD_PREVIEW_POS: (u16, u16) = (2, 10);
pub const FONT_COLOR: Color = Color::Rgb(200, 0, 0);
const HOLD_LABEL_COLOR: Color = Color::Rgb(225, 225, 225);
// Black plus the bevel fade.
const BACKGROUND: Color = Color::Rgb(BORDER_FADE, BORDER_FADE, BORDER_FADE);

/// Where the board lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub scale: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl BoardGeometry {
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            self.x + col as u16 * self.cell_w,
            self.y + row as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Fits a `cols` x `rows` board into `area`, keeping the left column free for the panel.
/// The scale is the smaller of the horizontal and vertical fit, never below 1.
pub fn fit_board(area: Rect, cols: usize, rows: usize) -> BoardGeometry {
    let cols = cols.max(1) as u16;
    let rows = rows.max(1) as u16;
    let avail_w = area.width.saturating_sub(BOARD_BORDER * 2 + PANEL_W);
    let avail_h = area.height.saturating_sub(BOARD_BORDER * 2);

    let horiz = avail_w / (cols * CELL_W as u16);
    let vert = avail_h / rows;
    let scale = horiz.min(vert).max(1);

    let cell_w = scale * CELL_W as u16;
    let cell_h = scale;
    let width = cols * cell_w;
    let height = rows * cell_h;

    BoardGeometry {
        scale,
        cell_w,
        cell_h,
        x: area.x + BOARD_BORDER + PANEL_W + avail_w.saturating_sub(width) / 2,
        y: area.y + BOARD_BORDER + avail_h.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn tint_color(tint: Tint) -> (u8, u8, u8) {
    match tint {
        Tint::Cyan => (0, 255, 255),
        Tint::Yellow => (255, 255, 0),
        Tint::Magenta => (255, 0, 255),
        Tint::Green => (0, 255, 0),
        Tint::Red => (255, 0, 0),
        Tint::Blue => (0, 0, 255),
        Tint::Orange => (255, 140, 0),
    }
}

/// Bevel colour: the fill darkened by a fixed offset.
pub fn border_color((r, g, b): (u8, u8, u8)) -> (u8, u8, u8) {
    (
        r.saturating_sub(BORDER_FADE),
        g.saturating_sub(BORDER_FADE),
        b.saturating_sub(BORDER_FADE),
    )
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn draw_game(frame: &mut Frame, scene: &Scene) -> BoardGeometry {
    let area = frame.size();
    let geometry = fit_board(area, scene.snapshot.width, scene.snapshot.height);

    if area.width < MIN_VIEW_W || area.height < MIN_VIEW_H {
        let msg = Paragraph::new(format!("RESIZE TERMINAL (min {}x{})", MIN_VIEW_W, MIN_VIEW_H))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("TUFFY TETRIS"));
        frame.render_widget(msg, area);
        return geometry;
    }

    frame.render_widget(
        BoardWidget {
            snapshot: &scene.snapshot,
            geometry,
        },
        area,
    );
    frame.render_widget(
        PanelWidget {
            snapshot: &scene.snapshot,
            countdown: scene.countdown.as_deref(),
        },
        area,
    );

    if scene.game_over {
        draw_banner(frame, area, "GAME OVER");
    } else if scene.paused {
        draw_banner(frame, area, "PAUSED");
    }
    geometry
}

pub fn draw_banner(frame: &mut Frame, area: Rect, text: &str) {
    let popup = centered(area, text.len() as u16 + 6, 3);
    let banner = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(FONT_COLOR)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, popup);
}

struct BoardWidget<'a> {
    snapshot: &'a Snapshot,
    geometry: BoardGeometry,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(BACKGROUND));

        let board = self.geometry.rect();
        let outline = Rect::new(
            board.x.saturating_sub(BOARD_BORDER),
            board.y.saturating_sub(BOARD_BORDER),
            board.width + BOARD_BORDER * 2,
            board.height + BOARD_BORDER * 2,
        )
        .intersection(area);
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray).bg(Color::Black))
            .render(outline, buf);
        buf.set_style(board.intersection(area), Style::default().bg(Color::Black));

        for row in 0..self.snapshot.height {
            for col in 0..self.snapshot.width {
                if let Some(tint) = self.snapshot.tile(col, row) {
                    draw_box(buf, self.geometry.cell_rect(col, row), tint);
                }
            }
        }
    }
}

struct PanelWidget<'a> {
    snapshot: &'a Snapshot,
    countdown: Option<&'a str>,
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let score_style = Style::default().fg(FONT_COLOR).add_modifier(Modifier::BOLD);
        let x = area.x + BOARD_BORDER;
        let mut y = area.y + BOARD_BORDER;

        put_text(buf, x, y, &format!("{:06}", self.snapshot.score), score_style);
        y += 1 + SCORE_PADDING;
        put_text(buf, x, y, &format!("LEVEL {:02}", self.snapshot.level), score_style);
        if let Some(clock) = self.countdown {
            y += 1 + SCORE_PADDING;
            put_text(buf, x, y, clock, score_style);
        }

        put_text(
            buf,
            area.x + HOLD_LABEL_POS.0,
            area.y + HOLD_LABEL_POS.1,
            "HOLD",
            Style::default().fg(HOLD_LABEL_COLOR).add_modifier(Modifier::BOLD),
        );
        if let Some(hold) = &self.snapshot.hold {
            let origin_x = area.x + HOLD_PREVIEW_POS.0;
            let origin_y = area.y + HOLD_PREVIEW_POS.1;
            for &(dx, dy) in &hold.cells {
                let rect = Rect::new(
                    origin_x + dx.max(0) as u16 * CELL_W as u16,
                    origin_y + dy.max(0) as u16,
                    CELL_W as u16,
                    1,
                );
                draw_box(buf, rect, hold.tint);
            }
        }
    }
}

/// Outer rectangle in the border colour with an inset fill. Cells too small
/// to inset get the fill with bracket glyphs in the border colour.
fn draw_box(buf: &mut Buffer, rect: Rect, tint: Tint) {
    let fill = tint_color(tint);
    let border = border_color(fill);
    let rect = rect.intersection(buf.area);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    if rect.width >= 3 && rect.height >= 3 {
        buf.set_style(rect, Style::default().bg(rgb(border)));
        let inner = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2);
        buf.set_style(inner, Style::default().bg(rgb(fill)));
    } else {
        buf.set_style(rect, Style::default().fg(rgb(border)).bg(rgb(fill)));
        if rect.width >= 2 {
            for y in rect.top()..rect.bottom() {
                buf.get_mut(rect.left(), y).set_symbol("[");
                buf.get_mut(rect.right() - 1, y).set_symbol("]");
            }
        }
    }
}

pub(crate) fn put_text(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    if x < buf.area.right() && y < buf.area.bottom() {
        buf.set_string(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::HoldPreview;
    use crate::ui::tests::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn scene() -> Scene {
        let mut snapshot = Snapshot::empty(10, 20);
        snapshot.cells[19 * 10] = Some(Tint::Red);
        snapshot.score = 120;
        snapshot.level = 3;
        Scene {
            snapshot,
            game_over: false,
            paused: false,
            countdown: None,
        }
    }

    #[test]
    fn board_fits_smaller_scale() {
        // 80x24: vertical fit 1, horizontal fit 2 -> scale 1.
        let g = fit_board(Rect::new(0, 0, 80, 24), 10, 20);
        assert_eq!(g.scale, 1);
        assert_eq!((g.cell_w, g.cell_h), (2, 1));
        assert_eq!(g.height, 20);
        assert!(g.x >= BOARD_BORDER + PANEL_W);

        let g = fit_board(Rect::new(0, 0, 200, 64), 10, 20);
        assert_eq!(g.scale, 3);
        assert_eq!((g.width, g.height), (60, 60));
        assert_eq!(g.y, 1 + (62 - 60) / 2);
    }

    #[test]
    fn bevel_border_is_fill_minus_fade() {
        assert_eq!(border_color((255, 140, 0)), (205, 90, 0));
        assert_eq!(border_color(tint_color(Tint::Blue)), (0, 0, 205));
    }

    #[test]
    fn frame_shows_hud_and_cells() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut geometry = None;
        terminal
            .draw(|frame| geometry = Some(draw_game(frame, &scene())))
            .unwrap();
        let geometry = geometry.unwrap();
        let buf = terminal.backend().buffer();
        let text = buffer_text(buf);

        assert!(text.contains("000120"));
        assert!(text.contains("LEVEL 03"));
        assert!(text.contains("HOLD"));
        assert!(!text.contains("GAME OVER"));

        let cell = geometry.cell_rect(0, 19);
        assert_eq!(buf.get(cell.x, cell.y).bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf.get(cell.x, cell.y).fg, Color::Rgb(205, 0, 0));
        assert_eq!(buf.get(cell.x, cell.y).symbol(), "[");
        let empty = geometry.cell_rect(5, 5);
        assert_eq!(buf.get(empty.x, empty.y).bg, Color::Black);
    }

    #[test]
    fn large_cells_get_inset_fill() {
        let mut terminal = Terminal::new(TestBackend::new(200, 64)).unwrap();
        let mut geometry = None;
        terminal
            .draw(|frame| geometry = Some(draw_game(frame, &scene())))
            .unwrap();
        let geometry = geometry.unwrap();
        let buf = terminal.backend().buffer();
        let cell = geometry.cell_rect(0, 19);
        assert_eq!(buf.get(cell.x, cell.y).bg, Color::Rgb(205, 0, 0));
        assert_eq!(buf.get(cell.x + 1, cell.y + 1).bg, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn overlays_and_hold_preview() {
        let mut scene = scene();
        scene.game_over = true;
        scene.countdown = Some("00:42".to_string());
        scene.snapshot.hold = Some(HoldPreview {
            cells: vec![(0, 0), (1, 0)],
            tint: Tint::Green,
        });
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| {
            draw_game(frame, &scene);
        })
        .unwrap();
        let buf = terminal.backend().buffer();
        let text = buffer_text(buf);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("00:42"));
        assert_eq!(
            buf.get(HOLD_PREVIEW_POS.0 + CELL_W as u16, HOLD_PREVIEW_POS.1).bg,
            Color::Rgb(0, 255, 0)
        );
    }

    #[test]
    fn tiny_terminal_asks_for_resize() {
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal.draw(|frame| {
            draw_game(frame, &scene());
        })
        .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("RESIZE"));
    }
}
