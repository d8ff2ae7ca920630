#![allow(
    // Board coordinates are small and non-negative once inside the loops
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, MATRIX_SIZE};
use crate::snapshot::Snapshot;

// Each cell is 2 characters wide and 1 tall so blocks look roughly square
const CELL_WIDTH: u16 = 2;
const BOARD_AREA_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
const BOARD_AREA_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const PREVIEW_AREA_WIDTH: u16 = MATRIX_SIZE as u16 * CELL_WIDTH + 2;
const PREVIEW_AREA_HEIGHT: u16 = MATRIX_SIZE as u16 + 2;
const SIDE_PANEL_WIDTH: u16 = 20;
const TITLE_HEIGHT: u16 = 2;

pub const MIN_WIDTH: u16 = BOARD_AREA_WIDTH + 2 * SIDE_PANEL_WIDTH;
pub const MIN_HEIGHT: u16 = BOARD_AREA_HEIGHT + TITLE_HEIGHT;

const BLOCK_SYMBOL: &str = "█";
const GRID_SYMBOL: &str = "·";

pub fn render(f: &mut Frame, app: &App) {
    let snapshot = app.game.snapshot();
    render_snapshot(f, &snapshot, app.config.display.show_grid);
}

pub fn render_snapshot(f: &mut Frame, snapshot: &Snapshot, show_grid: bool) {
    let area = f.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Tetris"));
        f.render_widget(warning_text, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(BOARD_AREA_HEIGHT),
            Constraint::Fill(1),
        ])
        .split(area);

    let title = Paragraph::new("TETRIS")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .constraints([
            Constraint::Length(SIDE_PANEL_WIDTH),
            Constraint::Length(BOARD_AREA_WIDTH),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .split(rows[1]);

    render_stats(f, snapshot, columns[0]);
    render_board(f, snapshot, show_grid, columns[1]);
    render_next_piece(f, snapshot, columns[2]);

    if snapshot.game_over {
        render_game_over(f, snapshot, area);
    }
}

fn render_stats(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let stats = format!(
        "Score : {}\nLevel : {}\n\n\
        ←/→ : Move\n\
        ↑ : Rotate\n\
        ↓ : Soft drop\n\
        Space : Hard drop\n\
        Esc : Quit",
        snapshot.score, snapshot.level,
    );

    let info = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(info, area);
}

fn render_board(f: &mut Frame, snapshot: &Snapshot, show_grid: bool, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let cell_x = inner_area.left() + x as u16 * CELL_WIDTH;
            let cell_y = inner_area.top() + y as u16;

            match snapshot.color_at(x as i32, y as i32) {
                Some(color) => draw_cell(f, cell_x, cell_y, BLOCK_SYMBOL, color),
                None if show_grid => draw_grid_dot(f, cell_x, cell_y),
                None => {}
            }
        }
    }
}

pub fn render_next_piece(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let preview_area = Rect {
        x: area.x + 2,
        y: area.y,
        width: PREVIEW_AREA_WIDTH.min(area.width.saturating_sub(2)),
        height: PREVIEW_AREA_HEIGHT.min(area.height),
    };

    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(preview_area);
    f.render_widget(block, preview_area);

    for (row, line) in snapshot.next_matrix.iter().enumerate() {
        for (col, &filled) in line.iter().enumerate() {
            if !filled {
                continue;
            }
            let cell_x = inner_area.left() + col as u16 * CELL_WIDTH;
            let cell_y = inner_area.top() + row as u16;
            if cell_x < inner_area.right() && cell_y < inner_area.bottom() {
                draw_cell(f, cell_x, cell_y, BLOCK_SYMBOL, snapshot.next_color);
            }
        }
    }
}

fn render_game_over(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let popup = centered_rect(70, 40, area);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Your Score : {}", snapshot.score)),
        Line::from("Press ENTER to restart, ESC to quit"),
    ];

    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, popup);
}

fn draw_cell(f: &mut Frame, x: u16, y: u16, symbol: &str, color: Color) {
    for dx in 0..CELL_WIDTH {
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
        }
    }
}

fn draw_grid_dot(f: &mut Frame, x: u16, y: u16) {
    if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
        cell.set_symbol(GRID_SYMBOL);
        cell.set_fg(Color::DarkGray);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
