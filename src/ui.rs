#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_SIZE};
use crate::shapes::TetrominoType;
use crate::systems::Phase;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;

#[must_use]
pub fn tetromino_color(kind: TetrominoType) -> Color {
    match kind {
        TetrominoType::I => Color::Cyan,
        TetrominoType::J => Color::Blue,
        TetrominoType::L => Color::LightYellow,
        TetrominoType::O => Color::Yellow,
        TetrominoType::S => Color::Green,
        TetrominoType::T => Color::Magenta,
        TetrominoType::Z => Color::Red,
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let board_width = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
    let board_height = BOARD_HEIGHT as u16 + 2;
    let min_info_width = 22u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 2;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Blockfall"));
        f.render_widget(warning_text, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                       // Title
            Constraint::Length(PREVIEW_SIZE as u16 + 2), // Next piece
            Constraint::Length(4),                       // Score
            Constraint::Length(3),                       // Status
            Constraint::Min(5),                          // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("BLOCKFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    render_next_preview(f, app, info_layout[1]);

    let engine = app.engine();
    let phase = app.phase();
    // The live counter drops back to zero once the game is over
    let shown_score = if phase == Phase::GameOver { 0 } else { engine.score() };
    let stats = Paragraph::new(format!(
        "Score: {shown_score}\nLines: {}",
        engine.lines_cleared()
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[2]);

    let status = match phase {
        Phase::Idle => Paragraph::new("Press Enter to start").style(Style::default().fg(Color::Green)),
        Phase::Paused => Paragraph::new("PAUSED\nPress P to resume").style(Style::default().fg(Color::Yellow)),
        Phase::GameOver => Paragraph::new("GAME OVER!\nPress Enter to restart")
            .style(Style::default().fg(Color::Red)),
        Phase::Running => Paragraph::new(""),
    };
    f.render_widget(status.wrap(Wrap { trim: true }), info_layout[3]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↑: Rotate\n\
        ↓: Move down\n\
        Space: Drop\n\
        Enter: Start  P: Pause\n\
        R: Restart  Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[4]);
}

fn paint_cell(buf: &mut Buffer, area: Rect, row: i32, col: i32, symbol: &str, color: Color) {
    if row < 0 || col < 0 {
        return;
    }
    let x = area.left() + col as u16 * CELL_WIDTH;
    let y = area.top() + row as u16;
    if y >= area.bottom() {
        return;
    }
    for dx in 0..CELL_WIDTH {
        if x + dx >= area.right() {
            break;
        }
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn render_game_board(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let engine = app.engine();

    let buf = f.buffer_mut();
    for (row, cells) in engine.board().rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(kind) = cell {
                paint_cell(buf, inner_area, row as i32, col as i32, "█", tetromino_color(*kind));
            }
        }
    }

    if app.phase() == Phase::GameOver {
        let final_score = app.session().final_score.unwrap_or_default();
        let game_over = Paragraph::new(format!("GAME OVER\nScore: {final_score}"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        let overlay = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2 - 1,
            width: inner_area.width,
            height: 2,
        };
        f.render_widget(game_over, overlay);
        return;
    }

    let active = engine.active();
    let color = tetromino_color(active.tetromino_type);
    let buf = f.buffer_mut();

    // Ghost first so the falling piece covers it where they overlap
    if app.show_ghost {
        for (row, col) in active.cells_at(active.ghost_position()) {
            paint_cell(buf, inner_area, row, col, "░", color);
        }
    }
    for (row, col) in active.cells_at(active.position) {
        paint_cell(buf, inner_area, row, col, "█", color);
    }
}

fn render_next_preview(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let next = app.engine().next();
    let matrix = next.shape().matrix(0);
    let buf = f.buffer_mut();
    for (row, col) in matrix.cells() {
        if row < PREVIEW_SIZE && col < PREVIEW_SIZE {
            paint_cell(buf, inner_area, row as i32, col as i32, "█", tetromino_color(next));
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
