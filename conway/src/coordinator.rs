//! Update loop, render hook and the shutdown protocol tying them together.
//!
//! The update task ticks on a tokio interval. Each tick computes one
//! generation and then performs the update side of the handshake: deposit
//! "ready", wait for the render acknowledgement. The render side runs inside
//! the host's draw callback and does the mirror image. A shutdown request
//! sets the phase and interrupts the rendezvous, so neither side can stay
//! blocked; the render side closes the rendezvous on its final call.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, error, info};
use parking_lot::{Mutex, MutexGuard};
use tokio::sync::Notify;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

use crate::config::Settings;
use crate::error::{ConfigError, HandshakeError, UpdateLoopError};
use crate::handshake::Rendezvous;
use crate::host::{Flow, Game, Screen};
use crate::surface::{HexGrid, RenderSurface, TRANSPARENT, WHITE};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Running = 0,
    ShuttingDown = 1,
    Stopped = 2,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Phase::Running,
            1 => Phase::ShuttingDown,
            _ => Phase::Stopped,
        }
    }
}

/// Generations computed versus frames acknowledged. The two never differ by
/// more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub generations: u64,
    pub frames: u64,
}

pub struct Coordinator {
    // Only ever touched by one side at a time; the handshake serializes them.
    world: Mutex<World>,
    rendezvous: Rendezvous,
    phase: AtomicU8,
    wake: Notify,
    tick: Duration,
    auto_shutdown: Option<Duration>,
    generations: AtomicU64,
    frames: AtomicU64,
}

impl Coordinator {
    pub fn new(world: World, tick: Duration, auto_shutdown: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            world: Mutex::new(world),
            rendezvous: Rendezvous::new(),
            phase: AtomicU8::new(Phase::Running as u8),
            wake: Notify::new(),
            tick,
            auto_shutdown,
            generations: AtomicU64::new(0),
            frames: AtomicU64::new(0),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Arc<Self>, ConfigError> {
        let world = settings.seed_world()?;
        info!(
            "world {}x{} seeded with {} live cells",
            world.width(),
            world.height(),
            world.population()
        );
        Ok(Self::new(world, settings.tick, settings.auto_shutdown))
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.phase() != Phase::Running
    }

    /// Asks both sides to stop. Safe to call any number of times, from any
    /// thread.
    pub fn request_shutdown(&self) {
        let requested = self
            .phase
            .compare_exchange(
                Phase::Running as u8,
                Phase::ShuttingDown as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if requested {
            info!("shutdown requested");
        }
        self.rendezvous.interrupt();
        self.wake.notify_one();
    }

    pub fn stats(&self) -> Stats {
        Stats {
            generations: self.generations.load(Ordering::SeqCst),
            frames: self.frames.load(Ordering::SeqCst),
        }
    }

    pub fn world(&self) -> MutexGuard<'_, World> {
        self.world.lock()
    }

    pub fn is_handshake_closed(&self) -> bool {
        self.rendezvous.is_closed()
    }

    /// Starts the update task on `runtime`.
    pub fn spawn(self: &Arc<Self>, runtime: &tokio::runtime::Handle) -> JoinHandle<Result<(), UpdateLoopError>> {
        runtime.spawn(Arc::clone(self).run())
    }

    /// The update task. Returns once shutdown has been observed.
    pub async fn run(self: Arc<Self>) -> Result<(), UpdateLoopError> {
        info!("update loop started, tick {:?}", self.tick);

        let mut ticker = time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let deadline = self.auto_shutdown;
        let auto_shutdown = async move {
            match deadline {
                Some(after) => time::sleep(after).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(auto_shutdown);
        let mut auto_fired = false;

        let result = loop {
            if self.is_shutdown_requested() {
                break Ok(());
            }

            tokio::select! {
                _ = &mut auto_shutdown, if !auto_fired => {
                    auto_fired = true;
                    info!("auto-shutdown timer elapsed");
                    self.request_shutdown();
                    continue;
                }
                _ = self.wake.notified() => continue,
                _ = ticker.tick() => {}
            }

            {
                let mut world = self.world.lock();
                world.update();
                debug!("generation {} population {}", world.generation(), world.population());
            }
            self.generations.fetch_add(1, Ordering::SeqCst);

            let this = Arc::clone(&self);
            match task::spawn_blocking(move || this.exchange()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    debug!("update side leaving handshake: {e}");
                    break Ok(());
                }
                Err(e) => {
                    error!("handshake worker failed: {e}");
                    self.request_shutdown();
                    break Err(UpdateLoopError::from(e));
                }
            }
        };

        self.phase.store(Phase::Stopped as u8, Ordering::SeqCst);
        info!("update loop stopped after {} generations", self.generations.load(Ordering::SeqCst));
        result
    }

    /// Update side of the handshake: announce a generation, then wait for
    /// the render side to acknowledge it.
    fn exchange(&self) -> Result<(), HandshakeError> {
        self.rendezvous.send()?;
        self.rendezvous.recv()
    }

    /// Render side bound to `surface`. It is the only party that closes the
    /// rendezvous.
    pub fn renderer<S: RenderSurface>(self: &Arc<Self>, surface: S, hex_grid: HexGrid) -> Renderer<S> {
        Renderer { coordinator: Arc::clone(self), surface, hex_grid, finished: false }
    }
}

/// Host-driven half of the coordinator. Lives on the host's render thread
/// together with the surface it paints.
pub struct Renderer<S> {
    coordinator: Arc<Coordinator>,
    surface: S,
    hex_grid: HexGrid,
    finished: bool,
}

impl<S: RenderSurface> Renderer<S> {
    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    fn compose(&mut self) {
        self.surface.clear(TRANSPARENT);
        self.surface.hex_grid(&self.hex_grid);
        self.surface.set_fill(WHITE);
        self.coordinator.world().paint(&mut self.surface);
    }

    /// Final call: nothing on this side touches the rendezvous afterwards.
    fn finish(&mut self) -> Flow {
        if !self.finished {
            self.finished = true;
            if self.coordinator.rendezvous.close() {
                info!("render loop finished, handshake closed");
            }
        }
        Flow::Stop
    }
}

impl<S: RenderSurface> Game for Renderer<S> {
    fn update(&mut self) -> Flow {
        if self.coordinator.is_shutdown_requested() {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn draw(&mut self, screen: &mut dyn Screen) -> Flow {
        if self.finished || self.coordinator.is_shutdown_requested() {
            return self.finish();
        }
        if let Err(e) = self.coordinator.rendezvous.recv() {
            debug!("render side skipping frame: {e}");
            return self.finish();
        }

        self.compose();
        screen.present(&self.surface.scene());
        // Counted before the acknowledgement: generations <= frames + 1.
        self.coordinator.frames.fetch_add(1, Ordering::SeqCst);

        match self.coordinator.rendezvous.send() {
            Ok(()) => Flow::Continue,
            Err(e) => {
                debug!("render side leaving handshake: {e}");
                self.finish()
            }
        }
    }

    fn layout(&self, _outside_width: f32, _outside_height: f32) -> (usize, usize) {
        self.surface.size()
    }
}
