use crate::model::MatchState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub culled: usize,
    pub hits: usize,
    pub finished: bool,
}

/// Clamps living players back into the arena and moves every bullet one step,
/// dropping bullets that left the arena.
pub fn advance(state: &mut MatchState) -> usize {
    let width = state.width;
    for player in state.players.iter_mut().filter(|p| p.alive) {
        player.x = player.x.clamp(0.0, player.max_x(width));
    }

    let height = state.height;
    let before = state.bullets.len();
    state.bullets.retain_mut(|bullet| {
        bullet.y += bullet.velocity;
        bullet.is_within_rows(height)
    });
    before - state.bullets.len()
}

/// Each bullet damages at most one living non-owner, checked in identity
/// order. Bullets that hit are removed.
pub fn resolve_collisions(state: &mut MatchState) -> usize {
    let players = &mut state.players;
    let before = state.bullets.len();

    state.bullets.retain(|bullet| {
        let target = players
            .iter_mut()
            .find(|p| p.alive && p.id != bullet.owner && p.contains(bullet.x, bullet.y));

        match target {
            Some(player) => {
                player.take_hit();
                false
            }
            None => true,
        }
    });

    before - state.bullets.len()
}

/// Returns true on the transition into game over.
pub fn evaluate_game_over(state: &mut MatchState) -> bool {
    if state.game_over {
        return false;
    }

    let mut alive = state.players.iter().filter(|p| p.alive).map(|p| p.id);
    let survivor = alive.next();
    if alive.next().is_some() {
        return false;
    }

    state.game_over = true;
    state.winner = survivor;
    true
}

/// One authoritative step: movement, then combat, then the win check.
pub fn run_tick(state: &mut MatchState) -> TickOutcome {
    let culled = advance(state);
    let hits = resolve_collisions(state);
    let finished = evaluate_game_over(state);
    TickOutcome {
        culled,
        hits,
        finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::model::{Bullet, Hitbox, PlayerId, new_match};

    fn state() -> MatchState {
        new_match(true, 80, 24, &GameConfig::default())
    }

    fn bullet(x: f64, y: f64, velocity: f64, owner: PlayerId) -> Bullet {
        Bullet {
            x,
            y,
            hitbox: Hitbox::new(1, 1),
            velocity,
            owner,
        }
    }

    #[test]
    fn advance_clamps_players() {
        let mut state = state();
        state.player_mut(PlayerId::One).x = -7.0;
        state.player_mut(PlayerId::Two).x = 500.0;
        advance(&mut state);
        assert_eq!(state.player(PlayerId::One).x, 0.0);
        assert_eq!(state.player(PlayerId::Two).x, 75.0);
    }

    #[test]
    fn advance_skips_dead_players() {
        let mut state = state();
        let player = state.player_mut(PlayerId::One);
        player.alive = false;
        player.x = -3.0;
        advance(&mut state);
        assert_eq!(state.player(PlayerId::One).x, -3.0);
    }

    #[test]
    fn advance_moves_and_culls_bullets() {
        let mut state = state();
        state.bullets.push(bullet(1.0, 10.0, 1.0, PlayerId::One));
        state.bullets.push(bullet(1.0, 0.0, -1.0, PlayerId::One));
        state.bullets.push(bullet(1.0, -0.5, -1.0, PlayerId::One));
        state.bullets.push(bullet(1.0, 24.0, 1.0, PlayerId::Two));
        state.bullets.push(bullet(1.0, 24.5, 1.0, PlayerId::Two));

        let culled = advance(&mut state);
        assert_eq!(culled, 2);
        let ys: Vec<f64> = state.bullets.iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![11.0, -1.0, 25.0]);
    }

    #[test]
    fn hit_removes_bullet_and_damages_once() {
        let mut state = state();
        let target = state.player(PlayerId::Two).clone();
        state
            .bullets
            .push(bullet(target.x + 1.0, target.y + 1.0, 1.0, PlayerId::One));

        assert_eq!(resolve_collisions(&mut state), 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player(PlayerId::Two).health, target.health - 1);
        assert_eq!(
            state.player(PlayerId::One).health,
            GameConfig::default().player_health
        );
    }

    #[test]
    fn owner_is_never_hit() {
        let mut state = state();
        let owner = state.player(PlayerId::One).clone();
        state
            .bullets
            .push(bullet(owner.x + 1.0, owner.y + 1.0, -1.0, PlayerId::One));

        assert_eq!(resolve_collisions(&mut state), 0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.player(PlayerId::One).health, owner.health);
    }

    #[test]
    fn multiple_bullets_stack_damage_in_one_pass() {
        let mut state = state();
        let target = state.player(PlayerId::Two).clone();
        state
            .bullets
            .push(bullet(target.x, target.y, 1.0, PlayerId::One));
        state
            .bullets
            .push(bullet(target.x + 2.0, target.y, 1.0, PlayerId::One));

        assert_eq!(resolve_collisions(&mut state), 2);
        assert_eq!(state.player(PlayerId::Two).health, target.health - 2);
    }

    #[test]
    fn dead_players_absorb_nothing() {
        let mut state = state();
        let target = state.player(PlayerId::Two).clone();
        for _ in 0..5 {
            state
                .bullets
                .push(bullet(target.x + 1.0, target.y + 1.0, 1.0, PlayerId::One));
        }

        assert_eq!(resolve_collisions(&mut state), 3);
        let player = state.player(PlayerId::Two);
        assert_eq!(player.health, 0);
        assert!(!player.alive);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn game_over_with_single_survivor() {
        let mut state = state();
        assert!(!evaluate_game_over(&mut state));
        assert!(!state.game_over);

        state.player_mut(PlayerId::One).alive = false;
        assert!(evaluate_game_over(&mut state));
        assert!(state.game_over);
        assert_eq!(state.winner, Some(PlayerId::Two));
        assert_eq!(state.winner_number(), 2);
    }

    #[test]
    fn game_over_draw_keeps_winner_empty() {
        let mut state = state();
        for player in state.players.iter_mut() {
            player.alive = false;
        }
        assert!(evaluate_game_over(&mut state));
        assert!(state.game_over);
        assert_eq!(state.winner_number(), 0);
    }

    #[test]
    fn game_over_is_sticky() {
        let mut state = state();
        state.player_mut(PlayerId::Two).alive = false;
        evaluate_game_over(&mut state);

        state.player_mut(PlayerId::Two).alive = true;
        state.player_mut(PlayerId::One).alive = false;
        assert!(!evaluate_game_over(&mut state));
        assert!(state.game_over);
        assert_eq!(state.winner, Some(PlayerId::One));
    }

    #[test]
    fn run_tick_moves_before_resolving() {
        let mut state = state();
        let target = state.player(PlayerId::Two).clone();
        let below = target.y + f64::from(target.hitbox.height) + 1.0;
        state
            .bullets
            .push(bullet(target.x + 1.0, below, -1.0, PlayerId::One));

        let outcome = run_tick(&mut state);
        assert_eq!(outcome.hits, 1);
        assert!(!outcome.finished);
        assert!(state.bullets.is_empty());
    }
}
