use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::protocol::{decode_intent, decode_snapshot};
use super::transport::FrameReader;
use crate::input::Intent;
use crate::model::MatchState;

pub const CHANNEL_CAPACITY: usize = 64;

/// Host side. Forwards the peer's intents; any failure to read ends with a
/// single `Quit`.
pub fn spawn_intent_reader(mut reader: FrameReader, tx: mpsc::Sender<Intent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let intent = match reader.next_frame().await {
                Ok(Some(line)) => match decode_intent(&line) {
                    Ok(intent) => intent,
                    Err(e) => {
                        log::warn!("Ignoring frame from peer: {}", e);
                        continue;
                    }
                },
                Ok(None) => {
                    log::info!("Peer closed the connection");
                    Intent::Quit
                }
                Err(e) => {
                    log::warn!("Lost peer: {}", e);
                    Intent::Quit
                }
            };

            if tx.send(intent).await.is_err() || intent == Intent::Quit {
                break;
            }
        }
    })
}

/// Client side. Forwards every decoded snapshot; the channel closes on end of
/// stream, a read error or a snapshot that does not decode.
pub fn spawn_snapshot_reader(
    mut reader: FrameReader,
    tx: mpsc::Sender<MatchState>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let line = match reader.next_frame().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    log::info!("Host closed the connection");
                    break;
                }
                Err(e) => {
                    log::warn!("Lost host: {}", e);
                    break;
                }
            };

            let state = match decode_snapshot(&line) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("Dropping session on bad snapshot: {}", e);
                    break;
                }
            };

            if tx.send(state).await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::model::new_match;
    use crate::net::{Connection, HostListener, MAX_FRAME_LEN, encode_snapshot};
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    async fn pair() -> (TcpStream, FrameReader) {
        let listener = HostListener::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = listener.local_addr();
        let accept = tokio::spawn(listener.accept());
        let raw = TcpStream::connect(addr).await.unwrap();
        let connection: Connection = accept.await.unwrap().unwrap();
        let (reader, _writer) = connection.into_split();
        (raw, reader)
    }

    #[tokio::test]
    async fn unknown_tokens_are_skipped_and_eof_quits() {
        let (mut raw, reader) = pair().await;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = spawn_intent_reader(reader, tx);

        raw.write_all(b"shoot\nwiggle\nmove_right\n").await.unwrap();
        raw.shutdown().await.unwrap();

        assert_eq!(rx.recv().await, Some(Intent::Shoot));
        assert_eq!(rx.recv().await, Some(Intent::MoveRight));
        assert_eq!(rx.recv().await, Some(Intent::Quit));
        assert_eq!(rx.recv().await, None);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn invalid_utf8_counts_as_quit() {
        let (mut raw, reader) = pair().await;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        spawn_intent_reader(reader, tx);

        raw.write_all(&[0xff, 0xfe, b'\n']).await.unwrap();
        assert_eq!(rx.recv().await, Some(Intent::Quit));
    }

    #[tokio::test]
    async fn endless_line_from_peer_counts_as_quit() {
        let (mut raw, reader) = pair().await;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        spawn_intent_reader(reader, tx);

        let flood = tokio::spawn(async move {
            raw.write_all(b"move_left\n").await?;
            raw.write_all("x".repeat(MAX_FRAME_LEN * 4).as_bytes()).await?;
            raw.write_all(b"\nshoot\n").await
        });

        assert_eq!(rx.recv().await, Some(Intent::MoveLeft));
        assert_eq!(rx.recv().await, Some(Intent::Quit));
        assert_eq!(rx.recv().await, None);
        flood.abort();
    }

    #[tokio::test]
    async fn endless_line_from_host_closes_channel() {
        let (mut raw, reader) = pair().await;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        spawn_snapshot_reader(reader, tx);

        let flood = tokio::spawn(async move {
            raw.write_all("{".repeat(MAX_FRAME_LEN * 4).as_bytes()).await
        });

        assert_eq!(rx.recv().await, None);
        flood.abort();
    }

    #[tokio::test]
    async fn bad_snapshot_closes_channel() {
        let (mut raw, reader) = pair().await;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        spawn_snapshot_reader(reader, tx);

        let state = new_match(true, 80, 24, &GameConfig::default());
        raw.write_all(encode_snapshot(&state).unwrap().as_bytes())
            .await
            .unwrap();
        raw.write_all(b"{\"garbage\":true}\n").await.unwrap();

        assert_eq!(rx.recv().await, Some(state));
        assert_eq!(rx.recv().await, None);
    }
}
