use crate::config::GameConfig;
use crate::input::Intent;
use crate::model::{Bullet, MatchState, PlayerId};

/// Applies one intent from `id` to the match. Movement is left unclamped
/// until the next [`advance`](super::advance).
pub fn apply_intent(state: &mut MatchState, id: PlayerId, intent: Intent, config: &GameConfig) {
    let height = state.height;
    let player = state.player_mut(id);
    if !player.alive {
        return;
    }

    match intent {
        Intent::MoveLeft => player.x -= player.speed,
        Intent::MoveRight => player.x += player.speed,
        Intent::Shoot => {
            let (y, velocity) = if player.is_in_top_half(height) {
                (player.y + f64::from(player.hitbox.height), config.bullet_speed)
            } else {
                (player.y - 1.0, -config.bullet_speed)
            };

            let bullet = Bullet {
                x: player.center_x() - 0.5,
                y,
                hitbox: config.bullet_hitbox,
                velocity,
                owner: player.id,
            };
            state.bullets.push(bullet);
        }
        Intent::Quit => {}
    }
}
