use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::leaderboard::LeaderboardEntry;
use crate::session::GameMode;
use crate::LEADERBOARD_SIZE;

const TITLE_COLOR: Color = Color::Rgb(0xb6, 0x8f, 0x40);

fn cabinet(frame: &mut Frame, title: &str) -> Rect {
    let area = frame.size();
    let block = Block::default()
        .title(title.to_string())
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn title_line(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
    )
}

pub fn draw_menu(frame: &mut Frame) {
    let inner = cabinet(frame, "TUFFY TETRIS");
    let lines = vec![
        title_line("TUFFY TETRIS"),
        Line::raw(""),
        Line::raw("[1] Survival"),
        Line::raw("[2] Sprint (60s)"),
        Line::raw("[Esc] Quit"),
        Line::raw(""),
        Line::raw("←/→ move   ↓ soft drop   space hard drop"),
        Line::raw("↑/s rotate   a rotate back   h hold   p pause"),
    ];
    let area = vertical_middle(inner, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn draw_name_entry(frame: &mut Frame, name: &str, score: u64) {
    let inner = cabinet(frame, "GAME OVER");
    let lines = vec![
        title_line("Enter a username to save score"),
        Line::raw(""),
        Line::raw(format!("SCORE {:06}", score)),
        Line::raw(""),
        Line::styled(
            format!("> {name}_"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("[Enter] save   [Backspace] delete"),
    ];
    let area = vertical_middle(inner, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn draw_leaderboard(frame: &mut Frame, mode: GameMode, entries: &[LeaderboardEntry]) {
    let inner = cabinet(frame, mode.label());
    let mut lines = vec![title_line("Highscores"), Line::raw("")];
    for (rank, entry) in entries.iter().take(LEADERBOARD_SIZE).enumerate() {
        lines.push(Line::raw(format!("{}. {}  {}", rank + 1, entry.name, entry.score)));
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw("Press [ENTER] to return to Main Menu"));
    let area = vertical_middle(inner, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn vertical_middle(area: Rect, height: u16) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area)[1]
}
