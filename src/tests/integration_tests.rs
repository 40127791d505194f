#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::app::App;
    use crate::config::Config;
    use crate::systems::{Command, Phase};

    fn play_until_game_over(app: &mut App) -> u32 {
        let mut last_score = 0;
        // Dropping every piece at spawn stacks the middle columns, so no row
        // can ever complete and the stack reaches the top quickly.
        for _ in 0..200 {
            if app.phase() == Phase::GameOver {
                break;
            }
            last_score = app.engine().score();
            app.push(Command::Drop);
            app.update(Duration::ZERO);
        }
        assert!(app.engine().score() >= last_score);
        app.engine().score()
    }

    #[test]
    fn test_full_game_cycle() {
        let mut app = App::new(&Config {
            seed: Some(11),
            ..Config::default()
        });
        app.push(Command::Start);
        app.update(Duration::ZERO);

        let score = play_until_game_over(&mut app);

        assert_eq!(app.phase(), Phase::GameOver);
        assert_eq!(app.engine().lines_cleared(), 0);
        assert_eq!(app.session().final_score, Some(score));
        assert!(score > 0);

        app.push(Command::Start);
        app.update(Duration::ZERO);

        assert_eq!(app.phase(), Phase::Running);
        assert_eq!(app.engine().score(), 0);
        assert_eq!(app.session().final_score, None);

        app.push(Command::Quit);
        app.update(Duration::ZERO);
        assert!(app.should_quit);
    }

    #[test]
    fn test_gravity_alone_ends_game() {
        let mut app = App::new(&Config {
            seed: Some(8),
            gravity_interval_ms: 10,
            ..Config::default()
        });
        app.push(Command::Start);
        app.update(Duration::ZERO);

        for _ in 0..10_000 {
            if app.phase() == Phase::GameOver {
                break;
            }
            app.update(Duration::from_millis(10));
        }

        assert_eq!(app.phase(), Phase::GameOver);
        assert!(app.engine().score() > 0);
    }
}
