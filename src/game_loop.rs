use std::io;
use std::time::Duration;

use tracing::debug;

use crate::config::GAME_OVER_POLL_INTERVAL;
use crate::game::{GameState, Phase};
use crate::input::{ByteSource, InputDecoder};
use crate::renderer::{self, Display};

/// Drives the game until a quit command arrives.
///
/// Each playing tick decodes one command, advances the state, redraws the
/// full frame and then hands `state.tick_interval()` to `sleep`. After a
/// game over the loop only polls for restart or quit, sleeping
/// [`GAME_OVER_POLL_INTERVAL`] between polls.
pub fn run<S, D, F>(
    state: &mut GameState,
    input: &mut InputDecoder<S>,
    display: &mut D,
    mut sleep: F,
) -> io::Result<()>
where
    S: ByteSource,
    D: Display + ?Sized,
    F: FnMut(Duration),
{
    display.present(&renderer::compose(state))?;

    while state.is_running() {
        let command = input.next_command()?;

        match state.phase {
            Phase::Playing => {
                state.step(command);
                if !state.is_running() {
                    break;
                }
                display.present(&renderer::compose(state))?;
                sleep(state.tick_interval());
            }
            Phase::GameOverWaiting => {
                state.apply_command(command);
                if !state.is_running() {
                    break;
                }
                sleep(GAME_OVER_POLL_INTERVAL);
            }
            Phase::Terminated => break,
        }
    }

    debug!(
        score = state.score,
        high_score = state.high_score,
        "game loop finished"
    );
    Ok(())
}
