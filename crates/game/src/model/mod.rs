mod bullet;
mod player;
mod state;

pub use bullet::Bullet;
pub use player::{Hitbox, Player, PlayerId};
pub use state::{MatchState, new_match};
