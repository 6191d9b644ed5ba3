use crate::input::Intent;
use crate::model::MatchState;

pub const FRAME_DELIMITER: u8 = b'\n';
/// Longest frame payload accepted in either direction, delimiter excluded.
pub const MAX_FRAME_LEN: usize = 256 * 1024;
/// Unknown tokens are cut to this many characters before they reach an error.
const TOKEN_PREVIEW_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("snapshot serialization failed: {0}")]
    Encode(serde_json::Error),
    #[error("snapshot deserialization failed: {0}")]
    Decode(serde_json::Error),
    #[error("frame payload contains a newline")]
    EmbeddedNewline,
    #[error("frame of {len} bytes exceeds the frame size limit")]
    FrameTooLong { len: usize },
    #[error("unknown intent token {0:?}")]
    UnknownIntent(String),
    #[error("snapshot players are not in identity order")]
    PlayerOrder,
}

fn frame(payload: &str) -> Result<String, ProtocolError> {
    if payload.bytes().any(|b| b == FRAME_DELIMITER) {
        return Err(ProtocolError::EmbeddedNewline);
    }
    if payload.len() > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLong { len: payload.len() });
    }
    let mut framed = String::with_capacity(payload.len() + 1);
    framed.push_str(payload);
    framed.push(FRAME_DELIMITER as char);
    Ok(framed)
}

fn unframe(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Serializes the whole match as one newline-terminated frame.
pub fn encode_snapshot(state: &MatchState) -> Result<String, ProtocolError> {
    let json = serde_json::to_string(state).map_err(ProtocolError::Encode)?;
    frame(&json)
}

pub fn decode_snapshot(line: &str) -> Result<MatchState, ProtocolError> {
    let state: MatchState =
        serde_json::from_str(unframe(line)).map_err(ProtocolError::Decode)?;
    if !state.has_canonical_order() {
        return Err(ProtocolError::PlayerOrder);
    }
    Ok(state)
}

pub fn encode_intent(intent: Intent) -> String {
    let mut framed = String::from(intent.as_str());
    framed.push(FRAME_DELIMITER as char);
    framed
}

pub fn decode_intent(line: &str) -> Result<Intent, ProtocolError> {
    line.trim().parse().map_err(|e| match e {
        ProtocolError::UnknownIntent(token) => {
            ProtocolError::UnknownIntent(token.chars().take(TOKEN_PREVIEW_LEN).collect())
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::model::{Bullet, Hitbox, PlayerId, new_match};

    fn busy_match() -> MatchState {
        let mut state = new_match(true, 80, 24, &GameConfig::default());
        state.players[0].x = 10.123456789012345;
        state.players[0].y = 0.1 + 0.2;
        state.players[1].x = std::f64::consts::PI * 7.0;
        state.players[1].health = 1;
        state.bullets.push(Bullet {
            x: 1.0 / 3.0,
            y: -0.999999999999,
            hitbox: Hitbox::new(1, 1),
            velocity: -1.0,
            owner: PlayerId::One,
        });
        state.bullets.push(Bullet {
            x: 42.5,
            y: 1e-12,
            hitbox: Hitbox::new(1, 1),
            velocity: 1.0,
            owner: PlayerId::Two,
        });
        state
    }

    #[test]
    fn snapshot_round_trip_is_exact() {
        let state = busy_match();
        let line = encode_snapshot(&state).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let decoded = decode_snapshot(&line).unwrap();
        assert_eq!(decoded.players.len(), 2);
        assert_eq!(decoded.bullets.len(), 2);
        assert_eq!(decoded.players[0].x.to_bits(), state.players[0].x.to_bits());
        assert_eq!(decoded.players[0].y.to_bits(), state.players[0].y.to_bits());
        assert_eq!(decoded.players[1].x.to_bits(), state.players[1].x.to_bits());
        assert_eq!(decoded.bullets[0].x.to_bits(), state.bullets[0].x.to_bits());
        assert_eq!(decoded.bullets[0].y.to_bits(), state.bullets[0].y.to_bits());
        assert_eq!(decoded, state);
    }

    #[test]
    fn game_over_fields_survive() {
        let mut state = busy_match();
        state.game_over = true;
        state.winner = Some(PlayerId::Two);
        state.players[0].alive = false;

        let decoded = decode_snapshot(&encode_snapshot(&state).unwrap()).unwrap();
        assert!(decoded.game_over);
        assert_eq!(decoded.winner_number(), 2);
        assert!(!decoded.players[0].alive);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        assert!(matches!(
            decode_snapshot("{\"players\":[]}\n"),
            Err(ProtocolError::Decode(_))
        ));
        assert!(matches!(
            decode_snapshot("not json\n"),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn swapped_players_are_rejected() {
        let mut state = busy_match();
        state.players.swap(0, 1);
        let line = encode_snapshot(&state).unwrap();
        assert!(matches!(
            decode_snapshot(&line),
            Err(ProtocolError::PlayerOrder)
        ));
    }

    #[test]
    fn intent_frames() {
        assert_eq!(encode_intent(Intent::Shoot), "shoot\n");
        assert_eq!(decode_intent("move_left\n").unwrap(), Intent::MoveLeft);
        assert_eq!(decode_intent("  quit\r\n").unwrap(), Intent::Quit);
        assert!(matches!(
            decode_intent("dance\n"),
            Err(ProtocolError::UnknownIntent(token)) if token == "dance"
        ));
    }

    #[test]
    fn framing_refuses_embedded_newline() {
        assert!(matches!(frame("a\nb"), Err(ProtocolError::EmbeddedNewline)));
    }

    #[test]
    fn framing_refuses_oversized_payload() {
        assert!(frame(&"x".repeat(MAX_FRAME_LEN)).is_ok());
        assert!(matches!(
            frame(&"x".repeat(MAX_FRAME_LEN + 1)),
            Err(ProtocolError::FrameTooLong { len }) if len == MAX_FRAME_LEN + 1
        ));
    }

    #[test]
    fn unknown_token_is_shortened() {
        let token = "z".repeat(10_000);
        match decode_intent(&token) {
            Err(ProtocolError::UnknownIntent(kept)) => {
                assert_eq!(kept.len(), TOKEN_PREVIEW_LEN);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
