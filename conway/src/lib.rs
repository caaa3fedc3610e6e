//! Conway's Game of Life with a render/update handshake.
//!
//! A timer-driven update task and a host-driven render hook take turns on a
//! zero-capacity rendezvous: one generation is computed, painted, and
//! acknowledged before the next one starts.

pub mod canvas;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod grid;
pub mod handshake;
pub mod host;
pub mod patterns;
pub mod surface;
pub mod world;

pub use canvas::Canvas;
pub use config::Settings;
pub use coordinator::{Coordinator, Phase, Renderer, Stats};
pub use error::{ConfigError, HandshakeError, UpdateLoopError};
pub use host::{Flow, Game, Screen};
pub use surface::{HexGrid, RenderSurface, Scene};
pub use world::World;
