use serde::{Deserialize, Serialize};

use super::{Bullet, Player, PlayerId};
use crate::config::{BOTTOM_SPAWN_OFFSET, GameConfig, TOP_SPAWN_ROW};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Always `[identity 1, identity 2]`.
    pub players: [Player; 2],
    pub bullets: Vec<Bullet>,
    pub width: u16,
    pub height: u16,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl MatchState {
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Winner as its wire number, `0` meaning nobody won.
    pub fn winner_number(&self) -> u8 {
        self.winner.map(PlayerId::number).unwrap_or(0)
    }

    pub fn has_canonical_order(&self) -> bool {
        self.players[0].id == PlayerId::One && self.players[1].id == PlayerId::Two
    }
}

/// Both peers run this independently and must agree on the layout, so the
/// placement only depends on the arguments.
pub fn new_match(is_host: bool, width: u16, height: u16, config: &GameConfig) -> MatchState {
    let bottom = f64::from(height) - f64::from(BOTTOM_SPAWN_OFFSET);
    let top = f64::from(TOP_SPAWN_ROW);
    let (one_y, two_y) = if is_host { (bottom, top) } else { (top, bottom) };

    let quarter = f64::from(width) / 4.0;
    let spawn = |id: PlayerId, x: f64, y: f64| Player {
        id,
        x,
        y,
        hitbox: config.player_hitbox,
        health: config.player_health,
        alive: true,
        speed: config.player_speed,
        sprite: config.sprite_for(id).to_vec(),
    };

    MatchState {
        players: [
            spawn(PlayerId::One, quarter, one_y),
            spawn(PlayerId::Two, quarter * 3.0, two_y),
        ],
        bullets: Vec::new(),
        width,
        height,
        game_over: false,
        winner: None,
    }
}
