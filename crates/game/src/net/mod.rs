mod protocol;
mod transport;
mod worker;

pub use protocol::{
    FRAME_DELIMITER, MAX_FRAME_LEN, ProtocolError, decode_intent, decode_snapshot, encode_intent,
    encode_snapshot,
};
pub use transport::{
    Connection, FrameReader, FrameWriter, HostListener, TransportError, local_ipv4, resolve_host,
};
pub use worker::{CHANNEL_CAPACITY, spawn_intent_reader, spawn_snapshot_reader};
