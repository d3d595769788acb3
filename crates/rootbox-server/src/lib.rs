//! rootbox server library
//!
//! TCP + line-delimited JSON server for the rootbox file service.

pub mod constants;
pub mod handlers;
pub mod server;

pub use server::{FileServer, ServerConfig};
