//! rootbox server binary
//!
//! Serves a single root directory over a line-delimited JSON protocol.
//!
//! ## Usage
//!
//! ```bash
//! rootbox-server [--port PORT] [--root DIR]
//! ```
//!
//! When `--root` is omitted, the directory is read from a prompt on stdin.

use std::io::{self, Write as _};
use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rootbox_core::RootDir;
use rootbox_server::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_PORT, FILES_ROOT};
use rootbox_server::{FileServer, ServerConfig};

fn print_usage() {
    eprintln!(
        r#"rootbox-server - serve one directory over a JSON/TCP API

USAGE:
    rootbox-server [OPTIONS]

OPTIONS:
    --port <PORT>    Listen port (default: {port})
    --root <DIR>     Root directory, resolved beneath {files_root}
                     (prompted for on stdin when omitted)
    --help, -h       Show this help
"#,
        port = DEFAULT_PORT,
        files_root = FILES_ROOT
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut port = DEFAULT_PORT;
    let mut root_arg: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "--port" => {
                let Some(value) = args.get(i + 1).and_then(|s| s.parse::<u16>().ok()) else {
                    eprintln!("--port requires a port number");
                    return ExitCode::FAILURE;
                };
                port = value;
                i += 2;
            }
            "--root" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("--root requires a directory");
                    return ExitCode::FAILURE;
                };
                root_arg = Some(value.clone());
                i += 2;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let dir = match root_arg {
        Some(dir) => dir,
        None => match prompt_root() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Failed to read root directory: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    // The operator-supplied directory is itself confined beneath the
    // compiled-in files root, through the same resolver callers go through.
    let base = RootDir::new(FILES_ROOT);
    let root = RootDir::new(base.resolve(dir.trim()).as_str());

    let bind_addr: SocketAddr = match format!("{}:{}", DEFAULT_BIND_ADDRESS, port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid bind address: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting rootbox server on {}", bind_addr);

    let config = ServerConfig::new(bind_addr, root);
    let server = match FileServer::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to bind: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn prompt_root() -> io::Result<String> {
    print!("Welcome. Please specify a root directory: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
