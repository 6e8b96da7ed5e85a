//! Boundary between network tasks and the simulation loop
//!
//! The loop that owns [`Game`] holds the [`Synchronizer`]; every network task
//! holds a clone of [`RemoteHandle`]. Commands flow in through a bounded mpsc
//! queue that the loop drains at the start of each tick, so the game has a
//! single writer and key flags are never observed half-updated. Snapshots
//! flow out through a `watch` channel: the loop overwrites the latest value
//! and never waits on a subscriber.

use log::{debug, warn};
use shared::{Actor, Game, InputSource, RemoteInput, Snapshot, TickOutcome};
use tokio::sync::{mpsc, watch};

/// Work handed from network tasks to the simulation loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    Remote(RemoteInput),
    /// Clear the remote flags of a paddle whose controller left
    Release { actor: Actor },
}

/// Simulation-side end of the boundary
pub struct Synchronizer {
    command_rx: mpsc::Receiver<GameCommand>,
    snapshot_tx: watch::Sender<Snapshot>,
    published: u64,
}

/// Network-side end of the boundary
#[derive(Clone)]
pub struct RemoteHandle {
    command_tx: mpsc::Sender<GameCommand>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

/// Creates both ends, seeding subscribers with `initial`.
pub fn channel(initial: Snapshot, capacity: usize) -> (Synchronizer, RemoteHandle) {
    let (command_tx, command_rx) = mpsc::channel(capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);

    (
        Synchronizer {
            command_rx,
            snapshot_tx,
            published: 0,
        },
        RemoteHandle {
            command_tx,
            snapshot_rx,
        },
    )
}

impl Synchronizer {
    /// Applies every queued command to the game. Never blocks.
    pub fn apply_pending(&mut self, game: &mut Game) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                GameCommand::Remote(input) => game.apply_remote_input(&input),
                GameCommand::Release { actor } => {
                    debug!("Releasing remote keys for {:?}", actor);
                    game.release(actor.side());
                }
            }
            applied += 1;
        }
        applied
    }

    /// Replaces the latest snapshot. Subscribers that have not caught up
    /// simply skip the older one.
    pub fn publish(&mut self, snapshot: Snapshot) {
        self.snapshot_tx.send_replace(snapshot);
        self.published += 1;
    }

    /// One full tick: drain remote commands, advance the game, publish if
    /// the tick was played or changed state.
    ///
    /// `previous` in the returned outcome is the state before any remote
    /// command was applied, so a remote restart counts as a change.
    pub fn step(&mut self, game: &mut Game, input: &impl InputSource) -> TickOutcome {
        let before = game.state();
        self.apply_pending(game);
        let mut outcome = game.update(input);
        outcome.previous = before;
        if outcome.should_publish() {
            self.publish(game.snapshot());
        }
        outcome
    }

    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn subscriber_count(&self) -> usize {
        self.snapshot_tx.receiver_count()
    }
}

impl RemoteHandle {
    /// Queues a command for the next tick. Fails only once the simulation
    /// loop has shut down.
    pub async fn send(&self, command: GameCommand) -> bool {
        match self.command_tx.send(command).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Simulation loop is gone, dropping {:?}", e.0);
                false
            }
        }
    }

    /// A fresh receiver positioned at the current snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        let mut rx = self.snapshot_rx.clone();
        rx.mark_changed();
        rx
    }

    pub fn latest(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GameConfig, GameState, LocalInput, Side, Target};

    fn setup() -> (Game, Synchronizer, RemoteHandle) {
        let game = Game::new(GameConfig::default());
        let (sync, handle) = channel(game.snapshot(), 16);
        (game, sync, handle)
    }

    #[tokio::test]
    async fn test_commands_applied_on_next_step() {
        let (mut game, mut sync, handle) = setup();

        assert!(handle.send(GameCommand::Remote(RemoteInput::Start)).await);
        assert_eq!(game.state(), GameState::Idle);

        let outcome = sync.step(&mut game, &LocalInput::default());
        assert_eq!(outcome.previous, GameState::Idle);
        assert_eq!(outcome.state, GameState::Playing);
        assert_eq!(handle.latest().status, GameState::Playing);
        assert_eq!(sync.published(), 1);
    }

    #[tokio::test]
    async fn test_remote_restart_publishes_idle() {
        let config = GameConfig {
            max_score: 1,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        let (mut sync, handle) = channel(game.snapshot(), 16);

        handle.send(GameCommand::Remote(RemoteInput::Start)).await;
        let mut ticks = 0;
        while game.state() != GameState::Finished {
            sync.step(&mut game, &LocalInput::default());
            ticks += 1;
            assert!(ticks < 10_000, "match never finished");
        }
        assert_eq!(handle.latest().status, GameState::Finished);

        let published = sync.published();
        handle.send(GameCommand::Remote(RemoteInput::Start)).await;
        let outcome = sync.step(&mut game, &LocalInput::default());

        assert_eq!(outcome.previous, GameState::Finished);
        assert_eq!(outcome.state, GameState::Idle);
        assert_eq!(sync.published(), published + 1);
        let latest = handle.latest();
        assert_eq!(latest.status, GameState::Idle);
        assert_eq!(latest.score_text(), "0 - 0");
    }

    #[tokio::test]
    async fn test_idle_ticks_publish_nothing() {
        let (mut game, mut sync, handle) = setup();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        for _ in 0..10 {
            sync.step(&mut game, &LocalInput::default());
        }

        assert_eq!(sync.published(), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_slow_subscriber_sees_latest_only() {
        let (mut game, mut sync, handle) = setup();
        let mut rx = handle.subscribe();
        handle.send(GameCommand::Remote(RemoteInput::Start)).await;

        for _ in 0..5 {
            sync.step(&mut game, &LocalInput::default());
        }

        assert_eq!(sync.published(), 5);
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen, game.snapshot());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_release_clears_flags() {
        let (mut game, mut sync, handle) = setup();
        handle
            .send(GameCommand::Remote(RemoteInput::Keydown {
                actor: Actor::P1,
                target: Target::Down,
            }))
            .await;
        sync.apply_pending(&mut game);
        assert!(game.paddle(Side::Left).pressed.down);

        handle.send(GameCommand::Release { actor: Actor::P1 }).await;
        assert_eq!(sync.apply_pending(&mut game), 1);
        assert!(game.paddle(Side::Left).pressed.is_idle());
    }

    #[test]
    fn test_subscribe_starts_marked_changed() {
        let (_game, sync, handle) = setup();
        let rx = handle.subscribe();
        assert!(rx.has_changed().unwrap());
        assert!(sync.subscriber_count() >= 2);
    }

    #[test]
    fn test_send_after_loop_shutdown() {
        let (_game, sync, handle) = setup();
        drop(sync);
        let delivered = tokio_test::block_on(handle.send(GameCommand::Remote(RemoteInput::Start)));
        assert!(!delivered);
    }
}
