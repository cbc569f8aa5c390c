#![allow(
    // Board coordinates are validated before narrowing to terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::components::{Board, Position, Shape};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::session::{GameSession, Phase};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const BOARD_AREA_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_AREA_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const MIN_INFO_WIDTH: u16 = 22;
pub const MIN_WIDTH: u16 = BOARD_AREA_WIDTH + MIN_INFO_WIDTH;
pub const MIN_HEIGHT: u16 = BOARD_AREA_HEIGHT + 2; // title line plus its border

const BLOCK_SYMBOL: &str = "█";
const GHOST_SYMBOL: &str = "░";

pub fn render(f: &mut Frame, session: &GameSession) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Tetris"));
        f.render_widget(warning, centered_rect(80, 50, area));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_AREA_WIDTH),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(area);

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                 // Title
            Constraint::Length(BOARD_AREA_HEIGHT), // Board
            Constraint::Min(0),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(5), // Stats
            Constraint::Length(5), // Next piece
            Constraint::Min(4),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("TETRIS")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, session, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let stats = format!(
        "Score: {}\nHigh score: {}\nLines: {}\nLevel: {}",
        session.score(),
        session.high_score(),
        session.lines_cleared(),
        session.level(),
    );
    f.render_widget(Paragraph::new(stats), info_layout[1]);

    render_next_tetromino(f, session, info_layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        A/D: Move left/right\n\
        W: Rotate\n\
        S: Soft drop\n\
        Space: Hard drop\n\
        P: Pause\n\
        Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);
}

fn render_game_board(f: &mut Frame, session: &GameSession, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let buf = f.buffer_mut();
    draw_locked_cells(buf, inner_area, session.board());

    let active = session.active();
    let color = active.kind.get_color();

    // Ghost first so the live piece paints over any overlap
    let ghost = session.ghost_position();
    draw_shape(buf, inner_area, &active.shape, ghost, GHOST_SYMBOL, color);
    draw_shape(buf, inner_area, &active.shape, active.position, BLOCK_SYMBOL, color);

    match session.phase() {
        Phase::Paused => render_overlay(f, inner_area, "PAUSED\nP to resume", Color::Yellow),
        Phase::GameOver => render_overlay(
            f,
            inner_area,
            "GAME OVER\nR: restart\nQ: quit",
            Color::Red,
        ),
        Phase::Falling => {}
    }
}

fn draw_locked_cells(buf: &mut Buffer, inner_area: Rect, board: &Board) {
    for y in 0..BOARD_HEIGHT {
        let Some(row) = board.row(y) else { continue };
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                paint_cell(buf, inner_area, x as i32, y as i32, BLOCK_SYMBOL, kind.get_color());
            }
        }
    }
}

fn draw_shape(
    buf: &mut Buffer,
    inner_area: Rect,
    shape: &Shape,
    anchor: Position,
    symbol: &str,
    color: Color,
) {
    for (col, row) in shape.cells() {
        paint_cell(buf, inner_area, anchor.x + col, anchor.y + row, symbol, color);
    }
}

// Paints one board cell; coordinates above or outside the board are skipped
fn paint_cell(buf: &mut Buffer, inner_area: Rect, x: i32, y: i32, symbol: &str, color: Color) {
    if !Board::in_bounds(x, y) {
        return;
    }

    let cell_x = inner_area.left() + x as u16 * CELL_WIDTH;
    let cell_y = inner_area.top() + y as u16;
    if cell_y >= inner_area.bottom() {
        return;
    }

    for dx in 0..CELL_WIDTH {
        if cell_x + dx >= inner_area.right() {
            break;
        }
        if let Some(cell) = buf.cell_mut((cell_x + dx, cell_y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn render_overlay(f: &mut Frame, inner_area: Rect, text: &str, color: Color) {
    let height = text.lines().count() as u16 + 2;
    let overlay_area = Rect {
        x: inner_area.x + 1,
        y: inner_area.y + inner_area.height.saturating_sub(height) / 2,
        width: inner_area.width.saturating_sub(2),
        height: height.min(inner_area.height),
    };

    let overlay = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, overlay_area);
    f.render_widget(overlay, overlay_area);
}

pub fn render_next_tetromino(f: &mut Frame, session: &GameSession, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let next = session.next();
    let color = next.kind.get_color();
    let buf = f.buffer_mut();

    // Canonical masks leave their top row blank, so skip it in the preview
    for (col, row) in next.shape.cells() {
        let Some(row) = (row as u16).checked_sub(1) else {
            continue;
        };
        let x = inner_area.left() + 1 + col as u16 * CELL_WIDTH;
        let y = inner_area.top() + row;
        if y >= inner_area.bottom() {
            continue;
        }
        for dx in 0..CELL_WIDTH {
            if x + dx >= inner_area.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_symbol(BLOCK_SYMBOL);
                cell.set_fg(color);
            }
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
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
