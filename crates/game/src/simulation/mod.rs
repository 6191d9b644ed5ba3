mod command;
mod tick;

pub use command::apply_intent;
pub use tick::{TickOutcome, advance, evaluate_game_over, resolve_collisions, run_tick};
