use std::io;
use std::panic;
use std::thread;

use grid_snake::config::GridSize;
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::game_loop;
use grid_snake::input::InputDecoder;
use grid_snake::terminal_runtime::{KeyboardBytes, TerminalSession, cleanup_terminal_best_effort};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    init_tracing();
    install_panic_hook();

    let mut state = GameState::new(GridSize::BOARD)?;

    run(&mut state)?;

    println!(
        "Final score: {}  High score: {}",
        state.score, state.high_score
    );
    Ok(())
}

fn run(state: &mut GameState) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputDecoder::new(KeyboardBytes::default());

    game_loop::run(state, &mut input, &mut session, thread::sleep)
}

/// Logs go to stderr; redirect it (`2>snake.log`) when raising `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
