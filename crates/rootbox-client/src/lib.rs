//! # rootbox-client
//!
//! Typed client for the rootbox wire protocol: one TCP connection,
//! sequential request/response pairs, one JSON object per line in each
//! direction. Exists mostly for the server's integration tests, but is a
//! perfectly usable library client.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use rootbox_types::{ErrorKind, ItemCollection, Request, Response, WriteSpec};

/// Client error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent something that is not a valid response.
    #[error("malformed response: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The server closed the connection before answering.
    #[error("connection closed by server")]
    ConnectionClosed,

    /// The server answered with an error response.
    #[error("server error ({kind:?}): {message}")]
    Server { kind: ErrorKind, message: String },
}

/// A connected client.
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    /// Connect to a rootbox server.
    pub async fn connect(addr: SocketAddr) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }

    /// Send one request and wait for its response.
    pub async fn call(&mut self, request: &Request) -> Result<Response, ClientError> {
        let mut payload = serde_json::to_vec(request)?;
        payload.push(b'\n');
        self.writer.write_all(&payload).await?;

        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        Ok(serde_json::from_str(&line)?)
    }

    /// List a directory or read a file.
    pub async fn list(&mut self, path: Option<&str>) -> Result<ItemCollection, ClientError> {
        self.expect_ok(Request::List {
            path: path.map(str::to_string),
        })
        .await
    }

    /// Append to (or create) a file; the response is the re-read file.
    pub async fn write(
        &mut self,
        path: Option<&str>,
        item: WriteSpec,
    ) -> Result<ItemCollection, ClientError> {
        self.expect_ok(Request::Write {
            path: path.map(str::to_string),
            item,
        })
        .await
    }

    /// Create a subdirectory; the response lists the fresh directory.
    pub async fn make_dir(
        &mut self,
        path: Option<&str>,
        name: &str,
    ) -> Result<ItemCollection, ClientError> {
        self.expect_ok(Request::MakeDir {
            path: path.map(str::to_string),
            name: name.to_string(),
        })
        .await
    }

    /// Remove an empty subdirectory; the response is its final listing.
    pub async fn remove_dir(
        &mut self,
        path: Option<&str>,
        name: &str,
    ) -> Result<ItemCollection, ClientError> {
        self.expect_ok(Request::RemoveDir {
            path: path.map(str::to_string),
            name: name.to_string(),
        })
        .await
    }

    /// Remove a file; the response carries its last content.
    pub async fn remove_file(
        &mut self,
        path: Option<&str>,
        name: &str,
    ) -> Result<ItemCollection, ClientError> {
        self.expect_ok(Request::RemoveFile {
            path: path.map(str::to_string),
            name: name.to_string(),
        })
        .await
    }

    async fn expect_ok(&mut self, request: Request) -> Result<ItemCollection, ClientError> {
        match self.call(&request).await? {
            Response::Ok(collection) => Ok(collection),
            Response::Err { kind, message } => Err(ClientError::Server { kind, message }),
        }
    }
}
