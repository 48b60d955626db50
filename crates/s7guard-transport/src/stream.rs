use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use crate::error::{Result, TransportError};

/// A connected controller stream implementing `Read` and `Write`.
///
/// Built by the connection layer once the handshake has completed. The
/// session guard owns it while attached and mirrors its configured timeouts
/// onto it.
pub struct PlcStream {
    tcp: TcpStream,
}

impl Read for PlcStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.tcp.read(buf)
    }
}

impl Write for PlcStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tcp.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.tcp.flush()
    }
}

impl From<TcpStream> for PlcStream {
    fn from(tcp: TcpStream) -> Self {
        Self::from_tcp(tcp)
    }
}

impl PlcStream {
    /// Wrap an already connected TCP stream.
    pub fn from_tcp(tcp: TcpStream) -> Self {
        Self { tcp }
    }

    /// Set read timeout on the underlying stream.
    ///
    /// `Some(Duration::ZERO)` is treated as "no timeout" rather than an error.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        let timeout = timeout.filter(|t| !t.is_zero());
        self.tcp.set_read_timeout(timeout)?;
        Ok(())
    }

    /// Set write timeout on the underlying stream.
    ///
    /// `Some(Duration::ZERO)` is treated as "no timeout" rather than an error.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        let timeout = timeout.filter(|t| !t.is_zero());
        self.tcp.set_write_timeout(timeout)?;
        Ok(())
    }

    /// Read timeout currently applied to the underlying stream.
    pub fn read_timeout(&self) -> Result<Option<Duration>> {
        Ok(self.tcp.read_timeout()?)
    }

    /// Write timeout currently applied to the underlying stream.
    pub fn write_timeout(&self) -> Result<Option<Duration>> {
        Ok(self.tcp.write_timeout()?)
    }

    /// Address of the connected controller.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.tcp.peer_addr()?)
    }

    /// Try to clone this stream (creates a new file descriptor).
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self::from_tcp(self.tcp.try_clone()?))
    }

    /// Shut down both halves of the stream.
    ///
    /// Returns [`TransportError::Shutdown`] if the peer already closed it.
    pub fn shutdown(&self) -> Result<()> {
        match self.tcp.shutdown(Shutdown::Both) {
            Ok(()) => {
                tracing::debug!("controller stream shut down");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotConnected => Err(TransportError::Shutdown),
            Err(err) => Err(TransportError::Io(err)),
        }
    }
}

impl std::fmt::Debug for PlcStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlcStream")
            .field("type", &"tcp")
            .field("peer", &self.tcp.peer_addr().ok())
            .finish()
    }
}
