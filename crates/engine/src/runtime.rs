//! Engine service runtime.
//!
//! Runs an [`Engine`] on a single tokio task. Input sources push commands into
//! a bounded queue; the task applies them one at a time between frame ticks and
//! publishes a fresh [`GameSnapshot`] after every mutation. Readers only ever
//! see whole snapshots, never a half-applied lock.
//!
//! The frame loop is a task the host registers with [`spawn`] and tears down
//! with [`EngineHandle::shutdown`].

use std::time::Duration;

use anyhow::{anyhow, Context};
use rand::RngCore;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::clock::Clock;
use crate::core::GameSnapshot;
use crate::engine::Engine;
use crate::types::{Command, TICK_MS};

/// Service configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Frame interval of the built-in ticker; `None` means the host sends ticks itself
    pub frame_ms: Option<u64>,
    /// Capacity of the inbound queue
    pub max_pending_commands: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            frame_ms: Some(TICK_MS as u64),
            max_pending_commands: 64,
        }
    }
}

impl ServiceConfig {
    /// Host-driven ticks only
    pub fn manual() -> Self {
        Self {
            frame_ms: None,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let frame_ms = match env::var("DROP_STACK_FRAME_MS") {
            Ok(v) if v.trim() == "0" => None,
            Ok(v) => v.trim().parse().ok().or(defaults.frame_ms),
            Err(_) => defaults.frame_ms,
        };
        let max_pending_commands = env::var("DROP_STACK_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            frame_ms,
            max_pending_commands,
        }
    }
}

#[derive(Debug)]
enum Inbound {
    Command(Command),
    Tick(u32),
    Shutdown,
}

/// Handle to a running engine service
#[derive(Debug)]
pub struct EngineHandle {
    tx: mpsc::Sender<Inbound>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<()>,
}

/// Start the service on the current tokio runtime
pub fn spawn<C, R>(engine: Engine<C, R>, config: ServiceConfig) -> EngineHandle
where
    C: Clock + Send + 'static,
    R: RngCore + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (snap_tx, snapshots) = watch::channel(engine.snapshot());
    let task = tokio::spawn(run(engine, rx, snap_tx, config.frame_ms));

    EngineHandle {
        tx,
        snapshots,
        task,
    }
}

impl EngineHandle {
    /// Queue a command, waiting for room if the queue is full
    pub async fn send(&self, command: Command) -> anyhow::Result<()> {
        self.tx
            .send(Inbound::Command(command))
            .await
            .map_err(|_| anyhow!("engine service stopped"))
    }

    /// Queue a command without waiting; fails if the queue is full or closed
    pub fn try_send(&self, command: Command) -> anyhow::Result<()> {
        self.tx
            .try_send(Inbound::Command(command))
            .map_err(|e| anyhow!("engine service rejected {}: {}", command.as_str(), e))
    }

    /// Queue an explicit frame tick (for hosts that drive time themselves)
    pub async fn tick(&self, delta_ms: u32) -> anyhow::Result<()> {
        self.tx
            .send(Inbound::Tick(delta_ms))
            .await
            .map_err(|_| anyhow!("engine service stopped"))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the frame loop and drop the engine.
    ///
    /// Commands queued before the shutdown request are still applied.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        // A closed queue means the task is already gone; joining reports why.
        let _ = self.tx.send(Inbound::Shutdown).await;
        self.task.await.context("engine service task failed")
    }
}

async fn next_frame(frames: &mut Option<Interval>) -> Instant {
    match frames {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}

#[instrument(skip_all, fields(frame_ms = ?frame_ms))]
async fn run<C: Clock, R: RngCore>(
    mut engine: Engine<C, R>,
    mut rx: mpsc::Receiver<Inbound>,
    snapshots: watch::Sender<GameSnapshot>,
    frame_ms: Option<u64>,
) {
    let mut frames = frame_ms.map(|ms| {
        let mut interval = tokio::time::interval(Duration::from_millis(ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let mut last_frame = Instant::now();

    debug!("engine service started");
    loop {
        tokio::select! {
            // Drain queued input before the next frame.
            biased;
            msg = rx.recv() => match msg {
                Some(Inbound::Command(command)) => engine.command(command),
                Some(Inbound::Tick(delta_ms)) => engine.tick(delta_ms),
                Some(Inbound::Shutdown) | None => break,
            },
            now = next_frame(&mut frames) => {
                let elapsed = now.saturating_duration_since(last_frame);
                last_frame = now;
                engine.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
            }
        }
        snapshots.send_modify(|snap| engine.snapshot_into(snap));
    }
    info!(score = engine.state().score(), "engine service stopped");
}
