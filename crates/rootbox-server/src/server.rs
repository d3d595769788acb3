//! TCP server: accepts connections and runs the per-connection request
//! loop.
//!
//! Each connection gets its own task; the shared [`FsOps`] carries no
//! mutable state beyond the immutable root, so no synchronization is
//! needed between them.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use rootbox_core::{FsOps, RootDir};
use rootbox_types::{ErrorKind, Request, Response};

use crate::handlers;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub root: RootDir,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, root: RootDir) -> Self {
        Self { bind_addr, root }
    }

    /// Config bound to localhost on an ephemeral port (for testing).
    pub fn ephemeral(root: RootDir) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            root,
        }
    }
}

/// The file service listener.
pub struct FileServer {
    listener: TcpListener,
    ops: Arc<FsOps>,
}

impl FileServer {
    /// Bind the listener.
    ///
    /// The bound address is available from [`FileServer::local_addr`],
    /// which matters when port 0 was requested.
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr))?;

        tracing::info!(
            addr = %listener.local_addr()?,
            root = %config.root,
            "listener bound"
        );

        Ok(Self {
            listener,
            ops: Arc::new(FsOps::new(config.root)),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the surrounding task is dropped.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            tracing::debug!(%peer, "accepted connection");

            let ops = Arc::clone(&self.ops);
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, ops).await {
                    tracing::error!(%peer, error = %e, "connection ended with error");
                }
            });
        }
    }
}

/// Read newline-delimited JSON requests and write one response per line.
async fn serve_connection(stream: TcpStream, ops: Arc<FsOps>) -> anyhow::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handlers::handle(&ops, request).await,
            Err(e) => Response::Err {
                kind: ErrorKind::Io,
                message: format!("malformed request: {}", e),
            },
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        write_half.write_all(&payload).await?;
    }

    Ok(())
}
