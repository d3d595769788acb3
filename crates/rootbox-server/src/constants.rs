//! Server configuration constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address (all interfaces; the service carries no secrets
/// beyond what the root directory itself holds).
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Base directory the operator-supplied root is resolved beneath.
pub const FILES_ROOT: &str = "/files";
