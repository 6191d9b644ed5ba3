use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use super::protocol::{MAX_FRAME_LEN, ProtocolError, encode_intent, encode_snapshot};
use crate::input::Intent;
use crate::model::MatchState;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to listen on {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("failed to accept connection: {0}")]
    Accept(io::Error),
    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("read failed: {0}")]
    Read(io::Error),
    #[error("write failed: {0}")]
    Write(io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// First non-loopback IPv4 address in interface enumeration order. Hosts with
/// several interfaces may advertise an address the peer cannot reach.
pub fn local_ipv4() -> Option<Ipv4Addr> {
    let interfaces = match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            log::warn!("Interface enumeration failed: {}", e);
            return None;
        }
    };

    interfaces
        .into_iter()
        .filter(|iface| !iface.is_loopback())
        .find_map(|iface| match iface.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
}

/// Turns operator input into a dialable `host:port`.
pub fn resolve_host(input: &str, default_port: u16) -> String {
    let input = input.trim();
    if input.is_empty() {
        return format!("localhost:{}", default_port);
    }
    if input.parse::<SocketAddr>().is_ok() {
        return input.to_string();
    }
    match input.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.parse::<u16>().is_ok() => {
            input.to_string()
        }
        _ if input.contains(':') => format!("[{}]:{}", input, default_port),
        _ => format!("{}:{}", input, default_port),
    }
}

/// A bound room waiting for its single opponent.
#[derive(Debug)]
pub struct HostListener {
    listener: TcpListener,
    local_addr: SocketAddr,
    advertised_ip: IpAddr,
}

impl HostListener {
    pub async fn bind(addr: SocketAddr) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| TransportError::Bind { addr, source })?;

        let advertised_ip = local_ipv4()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        log::info!(
            "Listening on {} (advertising {})",
            local_addr,
            advertised_ip
        );

        Ok(Self {
            listener,
            local_addr,
            advertised_ip,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    pub fn advertised_ip(&self) -> IpAddr {
        self.advertised_ip
    }

    /// Waits for one peer. The listening socket closes once this returns.
    pub async fn accept(self) -> Result<Connection, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::Accept)?;
        log::info!("Accepted peer {}", peer);
        Ok(Connection::from_stream(stream, peer))
    }
}

#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        let connect_err = |source: io::Error| TransportError::Connect {
            addr: addr.to_string(),
            source,
        };
        let stream = TcpStream::connect(addr).await.map_err(connect_err)?;
        let peer = stream.peer_addr().map_err(connect_err)?;
        log::info!("Connected to {}", peer);
        Ok(Self::from_stream(stream, peer))
    }

    fn from_stream(stream: TcpStream, peer: SocketAddr) -> Self {
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("Could not disable Nagle for {}: {}", peer, e);
        }
        Self { stream, peer }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn into_split(self) -> (FrameReader, FrameWriter) {
        let (read, write) = self.stream.into_split();
        (
            FrameReader {
                reader: BufReader::new(read),
                line: String::new(),
            },
            FrameWriter { half: write },
        )
    }
}

#[derive(Debug)]
pub struct FrameReader {
    reader: BufReader<OwnedReadHalf>,
    line: String,
}

impl FrameReader {
    /// Next newline-terminated frame, `None` once the peer closed the stream.
    ///
    /// At most [`MAX_FRAME_LEN`] payload bytes plus a `\r\n` terminator are
    /// buffered; anything longer is a [`ProtocolError::FrameTooLong`].
    pub async fn next_frame(&mut self) -> Result<Option<String>, TransportError> {
        let limit = MAX_FRAME_LEN + 2;
        self.line.clear();
        let read = (&mut self.reader)
            .take(limit as u64)
            .read_line(&mut self.line)
            .await
            .map_err(TransportError::Read)?;
        if read == 0 {
            return Ok(None);
        }

        let payload = self.line.trim_end_matches(['\n', '\r']).len();
        let truncated = read == limit && !self.line.ends_with('\n');
        if truncated || payload > MAX_FRAME_LEN {
            self.line.clear();
            return Err(ProtocolError::FrameTooLong { len: read }.into());
        }
        Ok(Some(std::mem::take(&mut self.line)))
    }
}

#[derive(Debug)]
pub struct FrameWriter {
    half: OwnedWriteHalf,
}

impl FrameWriter {
    pub async fn send_snapshot(&mut self, state: &MatchState) -> Result<(), TransportError> {
        let frame = encode_snapshot(state)?;
        self.write_frame(&frame).await
    }

    pub async fn send_intent(&mut self, intent: Intent) -> Result<(), TransportError> {
        self.write_frame(&encode_intent(intent)).await
    }

    async fn write_frame(&mut self, frame: &str) -> Result<(), TransportError> {
        self.half
            .write_all(frame.as_bytes())
            .await
            .map_err(TransportError::Write)
    }

    /// Closes our side; the peer observes end of stream.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.half.shutdown().await {
            log::debug!("Shutdown after session failed: {}", e);
        }
    }
}
