mod intent;
mod keys;

pub use intent::Intent;
pub use keys::{MenuOption, map_game_key, map_menu_key, map_restart_key};
