mod client;
mod host;

use std::io;

use crate::model::{MatchState, PlayerId};

pub use client::run_client;
pub use host::run_host;

/// Draws a match. The session calls this after every tick on the host and
/// after every received snapshot on the client.
pub trait Renderer {
    fn render(&mut self, state: &MatchState) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    GameOver { winner: Option<PlayerId> },
    LocalQuit,
    PeerQuit,
    Disconnected,
}

impl EndReason {
    pub fn describe(&self) -> String {
        match self {
            EndReason::GameOver { winner: Some(id) } => format!("Player {} Wins!", id),
            EndReason::GameOver { winner: None } => "GAME OVER".to_string(),
            EndReason::LocalQuit => "You left the match".to_string(),
            EndReason::PeerQuit => "Opponent left the match".to_string(),
            EndReason::Disconnected => "Connection lost".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionEnd {
    pub reason: EndReason,
    pub state: MatchState,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("render failed: {0}")]
    Render(#[from] io::Error),
}
