use tokio::sync::mpsc;

use super::{EndReason, Renderer, SessionEnd, SessionError};
use crate::config::GameConfig;
use crate::input::Intent;
use crate::model::new_match;
use crate::net::{CHANNEL_CAPACITY, Connection, spawn_snapshot_reader};

/// Mirrors the host. Local intents are forwarded and never applied here;
/// each snapshot replaces the local view wholesale.
pub async fn run_client<R: Renderer>(
    connection: Connection,
    width: u16,
    height: u16,
    config: &GameConfig,
    mut local: mpsc::Receiver<Intent>,
    renderer: &mut R,
) -> Result<SessionEnd, SessionError> {
    let host = connection.peer_addr();
    let (reader, mut writer) = connection.into_split();
    let (snapshot_tx, mut snapshots) = mpsc::channel(CHANNEL_CAPACITY);
    let reader_task = spawn_snapshot_reader(reader, snapshot_tx);

    let mut state = new_match(false, width, height, config);
    let mut received: u64 = 0;

    log::info!("Joined match hosted by {}", host);

    let ended: Result<EndReason, SessionError> = match renderer.render(&state) {
        Err(e) => Err(e.into()),
        Ok(()) => loop {
            tokio::select! {
                intent = local.recv() => match intent {
                    Some(Intent::Quit) | None => {
                        if let Err(e) = writer.send_intent(Intent::Quit).await {
                            log::debug!("Could not tell host we quit: {}", e);
                        }
                        break Ok(EndReason::LocalQuit);
                    }
                    Some(intent) => {
                        if let Err(e) = writer.send_intent(intent).await {
                            log::warn!("Sending intent failed: {}", e);
                            break Ok(EndReason::Disconnected);
                        }
                    }
                },
                snapshot = snapshots.recv() => match snapshot {
                    Some(snapshot) => {
                        received += 1;
                        state = snapshot;
                        if let Err(e) = renderer.render(&state) {
                            break Err(e.into());
                        }
                    }
                    None if state.game_over => {
                        break Ok(EndReason::GameOver {
                            winner: state.winner,
                        });
                    }
                    None => break Ok(EndReason::Disconnected),
                },
            }
        },
    };

    reader_task.abort();
    writer.shutdown().await;

    let reason = ended?;
    log::info!(
        "Client session ended after {} snapshots: {:?}",
        received,
        reason
    );
    Ok(SessionEnd { reason, state })
}
