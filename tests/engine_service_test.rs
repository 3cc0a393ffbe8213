//! Engine service: commands and frames applied by a single tokio task.

use std::time::Duration;

use drop_stack::core::EngineConfig;
use drop_stack::engine::{spawn, Clock, Engine, ManualClock, ServiceConfig};
use drop_stack::types::{Command, Phase, NOTICE_DURATION_MS};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine(config: EngineConfig, clock: ManualClock) -> Engine<ManualClock> {
    Engine::with_clock(config, clock).unwrap()
}

#[tokio::test]
async fn host_driven_ticks_apply_gravity() -> anyhow::Result<()> {
    init_tracing();
    let config = EngineConfig::default().with_seed(21);
    let handle = spawn(engine(config, ManualClock::new(0)), ServiceConfig::manual());
    let mut rx = handle.subscribe();

    handle.send(Command::Start).await?;
    rx.changed().await?;
    let y0 = rx.borrow_and_update().active.map(|p| p.y);
    assert!(y0.is_some());

    handle.tick(519).await?;
    rx.changed().await?;
    assert_eq!(rx.borrow_and_update().active.map(|p| p.y), y0);

    handle.tick(1).await?;
    rx.changed().await?;
    assert_eq!(
        rx.borrow_and_update().active.map(|p| p.y),
        y0.map(|y| y + 1)
    );

    handle.shutdown().await
}

#[tokio::test]
async fn frame_loop_drops_pieces_without_input() -> anyhow::Result<()> {
    init_tracing();
    let config = EngineConfig {
        drop_interval_ms: 10,
        ..EngineConfig::default().with_seed(22)
    };
    let service = ServiceConfig {
        frame_ms: Some(5),
        ..ServiceConfig::default()
    };
    let handle = spawn(engine(config, ManualClock::new(0)), service);
    let mut rx = handle.subscribe();

    handle.send(Command::Start).await?;
    let y0 = loop {
        rx.changed().await?;
        if let Some(active) = rx.borrow_and_update().active {
            break active.y;
        }
    };

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            rx.changed().await?;
            let snap = rx.borrow_and_update();
            if snap.active.is_some_and(|p| p.y > y0) {
                return anyhow::Ok(());
            }
        }
    })
    .await??;

    handle.shutdown().await
}

#[tokio::test]
async fn exit_publishes_notice_deadline() -> anyhow::Result<()> {
    let clock = ManualClock::new(1_000);
    let config = EngineConfig::default().with_seed(23);
    let handle = spawn(engine(config, clock.clone()), ServiceConfig::manual());
    let mut rx = handle.subscribe();

    handle.send(Command::Start).await?;
    rx.changed().await?;
    clock.advance(500);
    handle.send(Command::Exit).await?;
    rx.changed().await?;

    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.active.is_none());
    assert_eq!(snap.notice_active_until, Some(1_500 + NOTICE_DURATION_MS));
    assert!(snap.notice_visible(clock.now_ms()));

    handle.shutdown().await
}

#[tokio::test]
async fn queued_commands_survive_shutdown_request() -> anyhow::Result<()> {
    let config = EngineConfig::default().with_seed(24);
    let handle = spawn(engine(config, ManualClock::new(0)), ServiceConfig::manual());
    let rx = handle.subscribe();

    handle.try_send(Command::Start)?;
    handle.try_send(Command::MoveLeft)?;
    handle.shutdown().await?;

    let snap = rx.borrow().clone();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.episode_id, 1);
    Ok(())
}
