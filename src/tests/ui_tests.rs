#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::ops::Range;
    use std::time::Duration;

    use crate::app::App;
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::shapes::TetrominoType;
    use crate::systems::{Command, Phase};
    use crate::tests::test_utils::{fill_row_except, piece_at};
    use crate::ui::{self, centered_rect, tetromino_color};
    use ratatui::{backend::TestBackend, buffer::Cell, layout::Rect, prelude::*};

    // Board block starts on row 2, under the title; its inner area is one
    // cell in from the border.
    const BOARD_X: u16 = 1;
    const BOARD_Y: u16 = 3;
    const BOARD_COLS: Range<u16> = 1..21;
    // Info panel sits right of the 22-column board block
    const INFO_COLS: Range<u16> = 22..60;
    const PREVIEW_X: u16 = 23;
    const PREVIEW_Y: u16 = 3;

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn seeded_app() -> App {
        App::new(&Config {
            seed: Some(21),
            ..Config::default()
        })
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = create_test_terminal(60, 26);
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer, y: u16, xs: Range<u16>) -> String {
        xs.map(|x| buffer.cell((x, y)).unwrap().symbol()).collect()
    }

    fn all_lines(buffer: &Buffer, xs: &Range<u16>) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| text(buffer, y, xs.clone()))
            .collect()
    }

    /// Left half of the two-column cell for board `(row, col)`.
    fn board_cell(buffer: &Buffer, row: u16, col: u16) -> &Cell {
        buffer.cell((BOARD_X + col * 2, BOARD_Y + row)).unwrap()
    }

    fn board_has_ghost(buffer: &Buffer) -> bool {
        all_lines(buffer, &BOARD_COLS)
            .iter()
            .any(|line| line.contains('░'))
    }

    fn set_active(app: &mut App, kind: TetrominoType, rotation: usize, row: i32, col: i32) {
        app.world
            .resource_mut::<Engine>()
            .set_active(piece_at(kind, rotation, row, col));
    }

    fn game_over_app() -> App {
        let mut app = seeded_app();
        app.push(Command::Start);
        app.update(Duration::ZERO);
        {
            let mut engine = app.world.resource_mut::<Engine>();
            engine.set_next(TetrominoType::T);
            engine.set_active(piece_at(TetrominoType::O, 0, 18, 0));
            for row in 0..2 {
                fill_row_except(engine.board_mut(), row, &[0, 1, 9], TetrominoType::Z);
            }
        }
        app.update(Duration::from_millis(700));
        assert_eq!(app.phase(), Phase::GameOver);
        app
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25); // (100 - 50) / 2
        assert_eq!(centered.y, 30); // (100 - 40) / 2
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let app = seeded_app();
        let mut terminal = create_test_terminal(80, 20);
        terminal.draw(|f| ui::render(f, &app)).unwrap();

        let lines = all_lines(terminal.backend().buffer(), &(0..80));
        assert!(lines.iter().any(|line| line.contains("Terminal too small!")));
        assert!(!lines.iter().any(|line| line.contains("BLOCKFALL")));
    }

    #[test]
    fn test_active_piece_and_ghost() {
        let mut app = seeded_app();
        set_active(&mut app, TetrominoType::T, 0, 0, 4);
        let buffer = draw(&app);
        let color = tetromino_color(TetrominoType::T);

        for (row, col) in [(0, 5), (1, 4), (1, 5), (1, 6)] {
            let cell = board_cell(&buffer, row, col);
            assert_eq!(cell.symbol(), "█");
            assert_eq!(cell.fg, color);
        }
        for (row, col) in [(18, 5), (19, 4), (19, 5), (19, 6)] {
            let cell = board_cell(&buffer, row, col);
            assert_eq!(cell.symbol(), "░");
            assert_eq!(cell.fg, color);
        }
        assert_eq!(board_cell(&buffer, 10, 5).symbol(), " ");
    }

    #[test]
    fn test_active_piece_covers_ghost() {
        let mut app = seeded_app();
        // Already resting on the floor, so the ghost sits under the piece
        set_active(&mut app, TetrominoType::O, 0, 18, 0);
        let buffer = draw(&app);

        for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            assert_eq!(board_cell(&buffer, row, col).symbol(), "█");
        }
        assert!(!board_has_ghost(&buffer));
    }

    #[test]
    fn test_ghost_hidden_when_disabled() {
        let mut app = seeded_app();
        app.show_ghost = false;
        set_active(&mut app, TetrominoType::L, 0, 0, 4);
        let buffer = draw(&app);

        assert!(!board_has_ghost(&buffer));
        assert_eq!(board_cell(&buffer, 1, 4).symbol(), "█");
    }

    #[test]
    fn test_cells_above_board_are_not_painted() {
        let mut app = seeded_app();
        // Vertical I in column 2 spanning rows -2..=1
        set_active(&mut app, TetrominoType::I, 1, -2, 0);
        let buffer = draw(&app);

        assert_eq!(board_cell(&buffer, 0, 2).symbol(), "█");
        assert_eq!(board_cell(&buffer, 1, 2).symbol(), "█");
        // Board border and title rule stay intact
        let x = BOARD_X + 2 * 2;
        assert_eq!(buffer.cell((x, BOARD_Y - 1)).unwrap().symbol(), "─");
        assert_eq!(buffer.cell((x, BOARD_Y - 2)).unwrap().symbol(), "─");
    }

    #[test]
    fn test_next_preview() {
        let mut app = seeded_app();
        app.world
            .resource_mut::<Engine>()
            .set_next(TetrominoType::I);
        let buffer = draw(&app);

        // Spawn matrix of I fills its second row
        assert_eq!(text(&buffer, PREVIEW_Y + 1, PREVIEW_X..PREVIEW_X + 8), "████████");
        for row in [0, 2, 3] {
            assert_eq!(
                text(&buffer, PREVIEW_Y + row, PREVIEW_X..PREVIEW_X + 8),
                " ".repeat(8)
            );
        }
        // Four inner rows, then the bottom border
        assert_eq!(
            buffer.cell((PREVIEW_X - 1, PREVIEW_Y + 4)).unwrap().symbol(),
            "└"
        );
        let color = tetromino_color(TetrominoType::I);
        assert_eq!(buffer.cell((PREVIEW_X, PREVIEW_Y + 1)).unwrap().fg, color);
    }

    #[test]
    fn test_score_panel_while_playing() {
        let mut app = seeded_app();
        app.push(Command::Start);
        app.push(Command::Drop);
        app.update(Duration::ZERO);
        let buffer = draw(&app);

        let info = all_lines(&buffer, &INFO_COLS);
        assert!(info.iter().any(|line| line.trim_end() == "Score: 10"));
        assert!(info.iter().any(|line| line.trim_end() == "Lines: 0"));
    }

    #[test]
    fn test_game_over_overlay() {
        let app = game_over_app();
        let buffer = draw(&app);

        let board = all_lines(&buffer, &BOARD_COLS);
        assert!(board.iter().any(|line| line.contains("GAME OVER")));
        assert!(board.iter().any(|line| line.contains("Score: 10")));

        // The live counter reads zero once the game has ended
        let info = all_lines(&buffer, &INFO_COLS);
        assert!(info.iter().any(|line| line.trim_end() == "Score: 0"));
        assert!(!info.iter().any(|line| line.contains("Score: 10")));
    }

    #[test]
    fn test_game_over_hides_falling_piece() {
        let app = game_over_app();
        let buffer = draw(&app);

        // The blocked T would sit on top of settled Z cells
        let z = tetromino_color(TetrominoType::Z);
        for (row, col) in [(0, 5), (1, 4), (1, 5), (1, 6)] {
            assert_eq!(board_cell(&buffer, row, col).fg, z);
        }
        assert!(!board_has_ghost(&buffer));
    }
}
