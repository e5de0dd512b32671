use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::TalkError;

/// Largest datagram payload: one text line, newline included.
pub const MAX_DATAGRAM_LEN: usize = 1024;

/// An unreliable datagram channel with a fixed remote endpoint.
///
/// `recv_timeout` returns `Ok(None)` when nothing arrived within the
/// timeout, so poll loops can re-check termination flags without treating
/// the timeout as an error.
pub trait Transport: Send + Sync {
    fn send(&self, payload: &[u8]) -> io::Result<usize>;

    fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>>;
}

/// UDP socket bound to a local port and connected to the remote peer.
///
/// Connecting fixes the destination for `send` and makes the kernel drop
/// datagrams from any other source. Send and receive are independent kernel
/// operations on the same descriptor, so the sender and receiver roles can
/// share this handle without extra locking.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    local_addr: SocketAddr,
    remote_addr: SocketAddr,
}

impl UdpTransport {
    pub fn connect(local_port: u16, remote_host: &str, remote_port: u16) -> Result<Self, TalkError> {
        let socket = UdpSocket::bind(("0.0.0.0", local_port)).map_err(|source| TalkError::Bind {
            port: local_port,
            source,
        })?;

        let remote_addr = (remote_host, remote_port)
            .to_socket_addrs()
            .map_err(|source| TalkError::Resolve {
                host: remote_host.to_string(),
                port: remote_port,
                source,
            })?
            .next()
            .ok_or_else(|| TalkError::Resolve {
                host: remote_host.to_string(),
                port: remote_port,
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses resolved"),
            })?;

        socket
            .connect(remote_addr)
            .map_err(|source| TalkError::Resolve {
                host: remote_host.to_string(),
                port: remote_port,
                source,
            })?;

        let local_addr = socket.local_addr().map_err(|source| TalkError::Bind {
            port: local_port,
            source,
        })?;

        Ok(Self {
            socket,
            local_addr,
            remote_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }
}

impl Transport for UdpTransport {
    fn send(&self, payload: &[u8]) -> io::Result<usize> {
        self.socket.send(payload)
    }

    fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        self.socket.set_read_timeout(Some(timeout))?;
        match self.socket.recv(buf) {
            Ok(len) => Ok(Some(len)),
            Err(ref e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::TimedOut =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recv_timeout_elapses_without_traffic() {
        let transport = UdpTransport::connect(0, "127.0.0.1", 9).unwrap();
        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        let got = transport
            .recv_timeout(&mut buf, Duration::from_millis(50))
            .unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_loopback_send_and_receive() {
        let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
        let peer_port = peer.local_addr().unwrap().port();

        let transport = UdpTransport::connect(0, "127.0.0.1", peer_port).unwrap();

        transport.send(b"ping\n").unwrap();
        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        let (len, from) = peer.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"ping\n");

        peer.send_to(b"pong\n", from).unwrap();
        let got = transport
            .recv_timeout(&mut buf, Duration::from_secs(1))
            .unwrap();
        assert_eq!(got, Some(5));
        assert_eq!(&buf[..5], b"pong\n");
    }
}
