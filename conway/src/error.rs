// error.rs - Error types for the simulation core

use thiserror::Error;

/// Outcome of a rendezvous operation that did not complete. Both variants
/// are cooperative stop signals raised during shutdown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeError {
    /// Shutdown was requested while the handshake was pending.
    #[error("handshake interrupted by shutdown")]
    Interrupted,

    /// The render side has hung up for good.
    #[error("handshake closed")]
    Closed,
}

/// Invalid simulation settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("tick period must be non-zero")]
    ZeroTick,

    #[error("hex overlay radius must be at least 1, got {0}")]
    HexRadius(f32),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Failure of the update task itself (not of the handshake).
#[derive(Error, Debug)]
pub enum UpdateLoopError {
    #[error("handshake worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
