pub mod config;
pub mod input;
pub mod model;
pub mod net;
pub mod session;
pub mod simulation;

pub use config::{DEFAULT_PORT, DEFAULT_TICK_INTERVAL, GameConfig};
pub use input::{Intent, MenuOption, map_game_key, map_menu_key, map_restart_key};
pub use model::{Bullet, Hitbox, MatchState, Player, PlayerId, new_match};
pub use net::{
    Connection, FrameReader, FrameWriter, HostListener, ProtocolError, TransportError,
    decode_intent, decode_snapshot, encode_intent, encode_snapshot, local_ipv4, resolve_host,
};
pub use session::{EndReason, Renderer, SessionEnd, SessionError, run_client, run_host};
pub use simulation::{
    TickOutcome, advance, apply_intent, evaluate_game_over, resolve_collisions, run_tick,
};
