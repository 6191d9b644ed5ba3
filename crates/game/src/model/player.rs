use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: u16,
    pub height: u16,
}

impl Hitbox {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Stable identity of one of the two duelists. Encoded on the wire as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.into()
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        match id {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(format!("invalid player identity {}", other)),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub hitbox: Hitbox,
    pub health: i32,
    pub alive: bool,
    pub speed: f64,
    pub sprite: Vec<String>,
}

impl Player {
    /// Largest x that keeps the whole hitbox inside an arena `arena_width` cells wide.
    pub fn max_x(&self, arena_width: u16) -> f64 {
        (f64::from(arena_width) - f64::from(self.hitbox.width)).max(0.0)
    }

    pub fn center_x(&self) -> f64 {
        self.x + f64::from(self.hitbox.width) / 2.0
    }

    pub fn is_in_top_half(&self, arena_height: u16) -> bool {
        self.y < f64::from(arena_height) / 2.0
    }

    /// Inclusive bounds test of a point against the hitbox rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x
            && x <= self.x + f64::from(self.hitbox.width)
            && y >= self.y
            && y <= self.y + f64::from(self.hitbox.height)
    }

    pub fn take_hit(&mut self) {
        self.health -= 1;
        if self.health <= 0 {
            self.alive = false;
        }
    }
}
