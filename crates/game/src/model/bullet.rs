use serde::{Deserialize, Serialize};

use super::{Hitbox, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub hitbox: Hitbox,
    /// Rows per tick. Positive travels down the screen, negative travels up.
    pub velocity: f64,
    pub owner: PlayerId,
}

impl Bullet {
    pub fn is_within_rows(&self, arena_height: u16) -> bool {
        self.y >= -1.0 && self.y <= f64::from(arena_height) + 1.0
    }
}
