//! Frog Crossing entry point
//!
//! Folds the merged clock/keyboard stream through the reducer and hands every
//! new state to the terminal presenter.

use std::io;

use frog_crossing::input::{Command, EventSource};
use frog_crossing::sim::{GameState, reduce};
use frog_crossing::terminal::{self, TerminalPresenter};
use frog_crossing::view::Presenter;
use frog_crossing::{HighScores, Settings};

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Frog Crossing starting...");

    let settings = Settings::load();
    let mut out = io::stdout();
    terminal::enter(&mut out)?;

    let res = run(&settings);

    terminal::leave(&mut out);
    res
}

fn run(settings: &Settings) -> io::Result<()> {
    let (tw, th) = crossterm::terminal::size()?;
    let mut presenter = TerminalPresenter::new(io::stdout(), tw, th);
    let mut source = EventSource::new(settings);
    let mut scores = HighScores::new();
    let mut state = GameState::initial();

    log::info!(
        "Clock every {:?}, hop {}",
        settings.tick_interval(),
        settings.move_step()
    );
    presenter.present(&state)?;

    loop {
        match source.next_command()? {
            Command::Quit => {
                log::info!("Quit at tick {}", state.elapsed_ticks);
                return Ok(());
            }
            Command::Resize(w, h) => presenter.resize(w, h),
            Command::Game(event) => {
                let next = reduce(&state, &event);
                if next.is_game_over && !state.is_game_over {
                    if let Some(rank) = scores.record(&next) {
                        log::info!("Run recorded at rank {}", rank);
                    }
                }
                state = next;
            }
        }

        let best = settings.show_session_best.then(|| scores.best_with(&state));
        presenter.set_session_best(best);
        presenter.present(&state)?;
    }
}
