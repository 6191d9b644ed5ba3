use std::time::Duration;

use crate::model::{Hitbox, PlayerId};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Rows between the bottom edge of the arena and the bottom player's spawn row.
pub const BOTTOM_SPAWN_OFFSET: u16 = 4;
pub const TOP_SPAWN_ROW: u16 = 2;

/// Tuning shared by the entity constructors and the simulation.
///
/// Built once at startup and handed to whatever needs it; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub player_speed: f64,
    pub player_hitbox: Hitbox,
    pub player_health: i32,

    pub bullet_speed: f64,
    pub bullet_hitbox: Hitbox,

    pub player_one_sprite: Vec<String>,
    pub player_two_sprite: Vec<String>,
    pub bullet_sprite: Vec<String>,

    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 2.0,
            player_hitbox: Hitbox::new(5, 3),
            player_health: 3,

            bullet_speed: 1.0,
            bullet_hitbox: Hitbox::new(1, 1),

            player_one_sprite: sprite(&[r" /^\ ", r" |'| ", r" /-\ "]),
            player_two_sprite: sprite(&[r" \_/ ", r" |'| ", r" / \ "]),
            bullet_sprite: sprite(&["^"]),

            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl GameConfig {
    pub fn sprite_for(&self, id: PlayerId) -> &[String] {
        match id {
            PlayerId::One => &self.player_one_sprite,
            PlayerId::Two => &self.player_two_sprite,
        }
    }
}

fn sprite(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| row.to_string()).collect()
}
