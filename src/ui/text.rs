use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::game::Snapshot;
use crate::ui::render::BoardGeometry;
use crate::ui::{centered, Scene};
use crate::{CELL_W, PANEL_W};

/// Plain-glyph board: walls, heavy floor, `[]` per filled cell.
pub fn draw_game(frame: &mut Frame, scene: &Scene) -> BoardGeometry {
    let snapshot = &scene.snapshot;
    let play_w = snapshot.width * CELL_W + 2;
    let play_h = snapshot.height + 2;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PANEL_W),
            Constraint::Length(play_w as u16),
            Constraint::Min(0),
        ])
        .split(frame.size());
    let play_rect = cols[1];

    frame.render_widget(Paragraph::new(hud_lines(scene)), cols[0]);

    let lines: Vec<Line> = playfield_rows(snapshot, play_w, play_h)
        .into_iter()
        .map(Line::raw)
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), play_rect);

    let banner = if scene.game_over {
        Some("GAME OVER")
    } else if scene.paused {
        Some("PAUSED")
    } else {
        None
    };
    if let Some(text) = banner {
        let overlay_w = (play_w as u16).saturating_sub(4).max(8);
        let popup = centered(play_rect, overlay_w, 3);
        let overlay = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(overlay, popup);
    }

    BoardGeometry {
        scale: 1,
        cell_w: CELL_W as u16,
        cell_h: 1,
        x: play_rect.x + 1,
        y: play_rect.y + 1,
        width: ((snapshot.width * CELL_W) as u16).min(play_rect.width.saturating_sub(2)),
        height: (snapshot.height as u16).min(play_rect.height.saturating_sub(2)),
    }
}

fn hud_lines(scene: &Scene) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(format!("{:06}", scene.snapshot.score)),
        Line::raw(""),
        Line::raw(format!("LEVEL {:02}", scene.snapshot.level)),
    ];
    if let Some(clock) = &scene.countdown {
        lines.push(Line::raw(""));
        lines.push(Line::raw(clock.clone()));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("HOLD"));
    if let Some(hold) = &scene.snapshot.hold {
        let mut grid = vec![vec![' '; 4 * CELL_W]; 4];
        for &(dx, dy) in &hold.cells {
            let (gx, gy) = (dx.max(0) as usize * CELL_W, dy.max(0) as usize);
            if gy < grid.len() && gx + 1 < grid[gy].len() {
                grid[gy][gx] = '[';
                grid[gy][gx + 1] = ']';
            }
        }
        lines.extend(grid.into_iter().map(|row| Line::raw(row.into_iter().collect::<String>())));
    }
    lines
}

fn playfield_rows(snapshot: &Snapshot, play_w: usize, play_h: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; play_w]; play_h];

    // Border: top/ceiling, sides, heavy floor.
    grid[0][0] = '┌';
    grid[0][play_w - 1] = '┐';
    for x in 1..play_w - 1 {
        grid[0][x] = '─';
    }
    for y in 1..play_h - 1 {
        grid[y][0] = '│';
        grid[y][play_w - 1] = '│';
    }
    grid[play_h - 1][0] = '└';
    grid[play_h - 1][play_w - 1] = '┘';
    for x in 1..play_w - 1 {
        grid[play_h - 1][x] = '═';
    }

    for y in 0..snapshot.height {
        for x in 0..snapshot.width {
            if snapshot.tile(x, y).is_some() {
                let gx = 1 + x * CELL_W;
                let gy = 1 + y;
                grid[gy][gx] = '[';
                grid[gy][gx + 1] = ']';
            }
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}
