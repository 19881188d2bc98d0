//! Per-table actor.
//!
//! One spawned task owns one [`Table`]. Every mutation arrives as a
//! [`SessionEvent`] on a single queue and is processed to completion
//! before the next, so the game logic itself never needs locks. Timers
//! are sleep tasks that feed events back into the same queue; a timer
//! that outlives its reason is discarded by an epoch check.

pub mod messages;

pub use messages::ClientMessage;

use crate::config::TableConfig;
use crate::game::error::GameError;
use crate::game::events::{Outbound, TableEvent};
use crate::game::player::PlayerAction;
use crate::game::table::{GamePhase, Table, TableSnapshot};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

#[derive(Debug)]
pub enum SessionEvent {
    Join {
        player_id: String,
        name: String,
        chips: Option<i64>,
    },
    Leave {
        player_id: String,
    },
    Message {
        player_id: String,
        message: ClientMessage,
    },
    Snapshot {
        viewer: Option<String>,
        reply: oneshot::Sender<TableSnapshot>,
    },
    /// Turn timer expiry for the captured player. Ignored unless both
    /// the epoch and the player still match the live turn.
    TurnTimeout {
        player_id: String,
        epoch: u64,
    },
    /// Post-hand delay expiry.
    NextHand {
        epoch: u64,
    },
}

/// Cheap cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn join(&self, player_id: impl Into<String>, name: impl Into<String>, chips: Option<i64>) {
        let _ = self.tx.send(SessionEvent::Join {
            player_id: player_id.into(),
            name: name.into(),
            chips,
        });
    }

    pub fn leave(&self, player_id: impl Into<String>) {
        let _ = self.tx.send(SessionEvent::Leave {
            player_id: player_id.into(),
        });
    }

    pub fn message(&self, player_id: impl Into<String>, message: ClientMessage) {
        let _ = self.tx.send(SessionEvent::Message {
            player_id: player_id.into(),
            message,
        });
    }

    /// Round-trips through the actor, so every previously sent event
    /// has been applied when the snapshot comes back.
    pub async fn snapshot(&self, viewer: Option<String>) -> Option<TableSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionEvent::Snapshot { viewer, reply })
            .ok()?;
        rx.await.ok()
    }
}

pub struct TableSession {
    table: Table,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    self_tx: mpsc::UnboundedSender<SessionEvent>,
    outbound: mpsc::UnboundedSender<Outbound>,
    /// Bumped whenever the armed timers stop being meaningful.
    epoch: u64,
    /// What the timers were last armed against.
    armed_for: Option<(Option<String>, GamePhase)>,
    turn_timer: Option<JoinHandle<()>>,
    next_hand_timer: Option<JoinHandle<()>>,
}

impl TableSession {
    /// Spawn a session task. Returns the command handle, the stream of
    /// outbound events for the transport adapter, and the task handle.
    pub fn spawn(
        table_id: impl Into<String>,
        config: TableConfig,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<Outbound>,
        JoinHandle<()>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let session = TableSession {
            table: Table::new(table_id, &config),
            rx,
            self_tx: tx.clone(),
            outbound: out_tx,
            epoch: 0,
            armed_for: None,
            turn_timer: None,
            next_hand_timer: None,
        };
        let task = tokio::spawn(session.run());
        (SessionHandle { tx }, out_rx, task)
    }

    async fn run(mut self) {
        tracing::info!(table = %self.table.table_id, "session started");
        while let Some(event) = self.rx.recv().await {
            self.handle_event(event);
        }
        self.cancel_timers();
        tracing::info!(table = %self.table.table_id, "session stopped");
    }

    /// Apply one event. Public so embedders (and tests) can drive a
    /// session without the task loop.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Join {
                player_id,
                name,
                chips,
            } => {
                let chips = chips.unwrap_or(self.table.config.starting_chips);
                if let Err(err) = self.table.join(player_id.clone(), name, chips) {
                    self.report(&player_id, err);
                }
            }
            SessionEvent::Leave { player_id } => self.table.leave(&player_id),
            SessionEvent::Message { player_id, message } => {
                let result = match message {
                    ClientMessage::StartGame => self.table.start_game(&player_id),
                    ClientMessage::Bet { amount } => self
                        .table
                        .handle_action(&player_id, PlayerAction::Bet(amount)),
                    ClientMessage::Call => {
                        self.table.handle_action(&player_id, PlayerAction::Call)
                    }
                    ClientMessage::Check => {
                        self.table.handle_action(&player_id, PlayerAction::Check)
                    }
                    ClientMessage::Raise { delta } => self
                        .table
                        .handle_action(&player_id, PlayerAction::Raise(delta)),
                    ClientMessage::Fold => {
                        self.table.handle_action(&player_id, PlayerAction::Fold)
                    }
                };
                if let Err(err) = result {
                    self.report(&player_id, err);
                }
            }
            SessionEvent::Snapshot { viewer, reply } => {
                let _ = reply.send(self.table.snapshot(viewer.as_deref()));
            }
            SessionEvent::TurnTimeout { player_id, epoch } => {
                if epoch != self.epoch
                    || self.table.current_turn_id() != Some(player_id.as_str())
                {
                    tracing::debug!(table = %self.table.table_id, player = %player_id, "stale turn timeout dropped");
                } else {
                    tracing::info!(table = %self.table.table_id, player = %player_id, "turn timed out");
                    self.table.force_fold(&player_id);
                }
            }
            SessionEvent::NextHand { epoch } => {
                if epoch != self.epoch {
                    tracing::debug!(table = %self.table.table_id, "stale next-hand tick dropped");
                } else {
                    self.table.finish_hand();
                }
            }
        }
        self.sync();
    }

    fn report(&mut self, player_id: &str, err: GameError) {
        tracing::debug!(table = %self.table.table_id, player = %player_id, %err, "rejected");
        let _ = self.outbound.send(Outbound::direct(
            player_id,
            TableEvent::Error {
                message: err.to_string(),
            },
        ));
    }

    /// Flush table notifications and bring the timers in line with the
    /// table. Timers are only re-armed when the situation they guard
    /// actually changed, so a rejected action cannot reset the clock.
    fn sync(&mut self) {
        for event in self.table.take_events() {
            let _ = self.outbound.send(event);
        }

        let now = (
            self.table.current_turn_id().map(str::to_string),
            self.table.phase,
        );
        if self.armed_for.as_ref() == Some(&now) {
            return;
        }
        self.armed_for = Some(now);
        self.epoch += 1;
        self.cancel_timers();

        let epoch = self.epoch;
        if let Some(player) = self.table.current_turn_id() {
            let player_id = player.to_string();
            let timeout = Duration::from_millis(self.table.config.turn_timeout_ms);
            let tx = self.self_tx.clone();
            self.turn_timer = Some(tokio::spawn(async move {
                sleep(timeout).await;
                let _ = tx.send(SessionEvent::TurnTimeout { player_id, epoch });
            }));
        } else if self.table.phase == GamePhase::Showdown {
            let delay = Duration::from_millis(self.table.config.post_hand_delay_ms);
            let tx = self.self_tx.clone();
            self.next_hand_timer = Some(tokio::spawn(async move {
                sleep(delay).await;
                let _ = tx.send(SessionEvent::NextHand { epoch });
            }));
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(timer) = self.turn_timer.take() {
            timer.abort();
        }
        if let Some(timer) = self.next_hand_timer.take() {
            timer.abort();
        }
    }
}
