use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use super::{EndReason, Renderer, SessionEnd, SessionError};
use crate::config::GameConfig;
use crate::input::Intent;
use crate::model::{PlayerId, new_match};
use crate::net::{CHANNEL_CAPACITY, Connection, spawn_intent_reader};
use crate::simulation::{apply_intent, run_tick};

/// Runs the authoritative match. The local player is identity 1, the peer is
/// identity 2. Intents are applied as they arrive; every tick advances the
/// simulation, broadcasts a snapshot and renders.
pub async fn run_host<R: Renderer>(
    connection: Connection,
    width: u16,
    height: u16,
    config: &GameConfig,
    mut local: mpsc::Receiver<Intent>,
    renderer: &mut R,
) -> Result<SessionEnd, SessionError> {
    let peer = connection.peer_addr();
    let (reader, mut writer) = connection.into_split();
    let (remote_tx, mut remote) = mpsc::channel(CHANNEL_CAPACITY);
    let reader_task = spawn_intent_reader(reader, remote_tx);

    let mut state = new_match(true, width, height, config);
    let mut ticker = time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    log::info!("Hosting {}x{} match against {}", width, height, peer);

    let ended: Result<EndReason, SessionError> = loop {
        tokio::select! {
            intent = local.recv() => match intent {
                Some(Intent::Quit) | None => break Ok(EndReason::LocalQuit),
                Some(intent) => apply_intent(&mut state, PlayerId::One, intent, config),
            },
            intent = remote.recv() => match intent {
                Some(Intent::Quit) | None => break Ok(EndReason::PeerQuit),
                Some(intent) => {
                    log::debug!("Peer intent {}", intent);
                    apply_intent(&mut state, PlayerId::Two, intent, config);
                }
            },
            _ = ticker.tick() => {
                tick += 1;
                let outcome = run_tick(&mut state);
                if outcome.hits > 0 {
                    log::debug!(
                        "Tick {}: {} hit(s), health {} / {}",
                        tick,
                        outcome.hits,
                        state.players[0].health,
                        state.players[1].health
                    );
                }

                let sent = writer.send_snapshot(&state).await;
                if let Err(e) = renderer.render(&state) {
                    break Err(e.into());
                }
                if let Err(e) = sent {
                    log::warn!("Snapshot broadcast failed: {}", e);
                    break Ok(EndReason::Disconnected);
                }
                if state.game_over {
                    break Ok(EndReason::GameOver {
                        winner: state.winner,
                    });
                }
            }
        }
    };

    reader_task.abort();
    writer.shutdown().await;

    let reason = ended?;
    log::info!("Host session ended after {} ticks: {:?}", tick, reason);
    Ok(SessionEnd { reason, state })
}
