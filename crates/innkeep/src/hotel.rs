//! Hotel actor: the one task that owns the hotel document.
//!
//! Every change goes through the actor's command channel and is handled to
//! completion before the next one starts, so there is exactly one writer.
//! For each command the actor:
//!
//! 1. runs the lifecycle action or registry operation on the current
//!    document, getting a new one back
//! 2. persists the new document
//! 3. only then replaces its in-memory copy and publishes it to observers
//!
//! A rejected command or a failed write leaves both the stored and the
//! in-memory document unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use innkeep_model::{DocumentCodec, HotelData, User, UserId};
use innkeep_records::{LinenCounts, RecordError, RecordOp, RecordOutcome};
use innkeep_rooms::{RoomAction, RoomStats};
use innkeep_storage::{DocumentStore, StorageBackend};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{HotelConfig, HotelError, SampleConfig, sample};

/// Commands sent to the hotel actor.
///
/// Variants with a `reply` channel get an answer once the command has been
/// persisted (or rejected).
pub(crate) enum HotelCommand {
    /// Run a lifecycle action.
    Room {
        action: RoomAction,
        reply: oneshot::Sender<Result<(), HotelError>>,
    },

    /// Run a registry operation as the given user.
    Record {
        actor: UserId,
        op: RecordOp,
        reply: oneshot::Sender<Result<RecordOutcome, HotelError>>,
    },

    /// Resolve a user id to an account.
    Login {
        user: UserId,
        reply: oneshot::Sender<Result<User, HotelError>>,
    },

    /// Replace everything with freshly generated sample data (admin only).
    ResetToSample {
        actor: UserId,
        reply: oneshot::Sender<Result<(), HotelError>>,
    },

    /// Copy the stored document into a directory.
    Export {
        dir: PathBuf,
        reply: oneshot::Sender<Result<PathBuf, HotelError>>,
    },

    /// Stop the actor.
    Shutdown,
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub rooms: RoomStats,
    /// Percentage of rooms that are occupied.
    pub occupancy_rate: f64,
    pub linens: LinenCounts,
    pub staff: usize,
    pub open_cleaning_logs: usize,
}

impl DashboardStats {
    pub fn of(data: &HotelData) -> Self {
        let rooms = RoomStats::of(data);
        Self {
            rooms,
            occupancy_rate: rooms.occupancy_rate(),
            linens: LinenCounts::of(data),
            staff: data.staff.len(),
            open_cleaning_logs: data.cleaning_logs.iter().filter(|l| l.is_open()).count(),
        }
    }
}

// ---------------------------------------------------------------------------
// HotelHandle
// ---------------------------------------------------------------------------

/// Handle to the running hotel actor.
///
/// Cheap to clone: an `mpsc::Sender` plus a `watch::Receiver`. Reads
/// ([`snapshot`](Self::snapshot), [`subscribe`](Self::subscribe)) never
/// go through the actor.
#[derive(Clone)]
pub struct HotelHandle {
    sender: mpsc::Sender<HotelCommand>,
    snapshots: watch::Receiver<Arc<HotelData>>,
}

impl HotelHandle {
    /// The latest committed document.
    pub fn snapshot(&self) -> Arc<HotelData> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// A receiver that is notified after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<HotelData>> {
        self.snapshots.clone()
    }

    /// Dashboard counts for the latest committed document.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::of(&self.snapshot())
    }

    /// Runs a lifecycle action.
    pub async fn dispatch(&self, action: RoomAction) -> Result<(), HotelError> {
        self.request(|reply| HotelCommand::Room { action, reply }).await?
    }

    /// Runs a registry operation as `actor`.
    pub async fn record(&self, actor: &UserId, op: RecordOp) -> Result<RecordOutcome, HotelError> {
        let actor = actor.clone();
        self.request(|reply| HotelCommand::Record { actor, op, reply })
            .await?
    }

    /// Resolves a user id to an account. Unknown ids are an error.
    pub async fn login(&self, user: &UserId) -> Result<User, HotelError> {
        let user = user.clone();
        self.request(|reply| HotelCommand::Login { user, reply }).await?
    }

    /// Replaces all data, users included, with a fresh sample hotel.
    pub async fn reset_to_sample(&self, actor: &UserId) -> Result<(), HotelError> {
        let actor = actor.clone();
        self.request(|reply| HotelCommand::ResetToSample { actor, reply })
            .await?
    }

    /// Writes `hotel-data-backup-<today>.json` into `dir`.
    pub async fn export(&self, dir: impl Into<PathBuf>) -> Result<PathBuf, HotelError> {
        let dir = dir.into();
        self.request(|reply| HotelCommand::Export { dir, reply }).await?
    }

    /// Tells the actor to stop. Commands already queued are handled first.
    pub async fn shutdown(&self) -> Result<(), HotelError> {
        self.sender
            .send(HotelCommand::Shutdown)
            .await
            .map_err(|_| HotelError::Unavailable)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> HotelCommand,
    ) -> Result<T, HotelError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| HotelError::Unavailable)?;
        reply_rx.await.map_err(|_| HotelError::Unavailable)
    }
}

// ---------------------------------------------------------------------------
// HotelActor
// ---------------------------------------------------------------------------

struct HotelActor<B, C> {
    store: DocumentStore<B, C>,
    data: Arc<HotelData>,
    sample: SampleConfig,
    snapshots: watch::Sender<Arc<HotelData>>,
    receiver: mpsc::Receiver<HotelCommand>,
}

impl<B: StorageBackend, C: DocumentCodec> HotelActor<B, C> {
    async fn run(mut self) {
        tracing::info!(key = self.store.key(), "hotel actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                HotelCommand::Room { action, reply } => {
                    let result = self.handle_room(action).await;
                    let _ = reply.send(result);
                }
                HotelCommand::Record { actor, op, reply } => {
                    let result = self.handle_record(&actor, op).await;
                    let _ = reply.send(result);
                }
                HotelCommand::Login { user, reply } => {
                    let result = innkeep_records::login(&self.data, &user).map_err(HotelError::from);
                    let _ = reply.send(result);
                }
                HotelCommand::ResetToSample { actor, reply } => {
                    let result = self.handle_reset(&actor).await;
                    let _ = reply.send(result);
                }
                HotelCommand::Export { dir, reply } => {
                    let today = Utc::now().date_naive();
                    let result = self.store.export_to(&dir, today).await.map_err(HotelError::from);
                    let _ = reply.send(result);
                }
                HotelCommand::Shutdown => {
                    tracing::info!("hotel shutting down");
                    break;
                }
            }
        }

        tracing::info!("hotel actor stopped");
    }

    async fn handle_room(&mut self, action: RoomAction) -> Result<(), HotelError> {
        let next = innkeep_rooms::apply(&self.data, &action, Utc::now())?;
        self.commit(next).await
    }

    async fn handle_record(&mut self, actor: &UserId, op: RecordOp) -> Result<RecordOutcome, HotelError> {
        let user = innkeep_records::login(&self.data, actor)?;
        let (next, outcome) = innkeep_records::apply(&self.data, &user, &op, Utc::now())?;
        self.commit(next).await?;
        Ok(outcome)
    }

    async fn handle_reset(&mut self, actor: &UserId) -> Result<(), HotelError> {
        let user = innkeep_records::login(&self.data, actor)?;
        if !user.role.is_admin() {
            return Err(RecordError::PermissionDenied {
                user: user.username,
                action: "reset hotel data",
            }
            .into());
        }
        tracing::warn!(by = %user.username, "resetting hotel to sample data");
        let next = sample::generate(&self.sample, Utc::now().date_naive());
        self.commit(next).await
    }

    /// Persists `next`, then makes it the current document.
    async fn commit(&mut self, next: HotelData) -> Result<(), HotelError> {
        if let Err(e) = self.store.save(&next).await {
            tracing::error!(error = %e, "failed to persist hotel data, change discarded");
            return Err(e.into());
        }
        self.data = Arc::new(next);
        self.snapshots.send_replace(Arc::clone(&self.data));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Loads the document from `store`, then spawns the hotel actor.
///
/// - A stored document is used as is.
/// - With nothing stored, sample data is generated (or an empty hotel, if
///   `seed_sample_data` is off) and persisted.
/// - A stored value that does not parse is treated like nothing stored,
///   with a warning; the replacement overwrites it.
/// - Any other storage failure is returned.
pub async fn spawn_hotel<B, C>(
    store: DocumentStore<B, C>,
    config: &HotelConfig,
) -> Result<HotelHandle, HotelError>
where
    B: StorageBackend,
    C: DocumentCodec,
{
    let data = match store.load::<HotelData>().await {
        Ok(Some(data)) => {
            tracing::info!(rooms = data.rooms.len(), "hotel data loaded");
            data
        }
        Ok(None) => {
            tracing::info!(key = store.key(), "no stored hotel data");
            initial_data(&store, config).await?
        }
        Err(e) if e.is_corrupt() => {
            tracing::warn!(error = %e, "stored hotel data is unreadable, replacing it");
            initial_data(&store, config).await?
        }
        Err(e) => return Err(e.into()),
    };

    let violations = innkeep_rooms::check_invariants(&data);
    if !violations.is_empty() {
        tracing::warn!(count = violations.len(), "loaded data has inconsistent rooms");
        for violation in &violations {
            tracing::debug!(%violation, "inconsistency");
        }
    }

    let data = Arc::new(data);
    let (snap_tx, snap_rx) = watch::channel(Arc::clone(&data));
    let (tx, rx) = mpsc::channel(config.command_buffer.max(1));

    let actor = HotelActor {
        store,
        data,
        sample: config.sample,
        snapshots: snap_tx,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    Ok(HotelHandle {
        sender: tx,
        snapshots: snap_rx,
    })
}

async fn initial_data<B: StorageBackend, C: DocumentCodec>(
    store: &DocumentStore<B, C>,
    config: &HotelConfig,
) -> Result<HotelData, HotelError> {
    let data = if config.seed_sample_data {
        sample::generate(&config.sample, Utc::now().date_naive())
    } else {
        HotelData::default()
    };
    store.save(&data).await?;
    Ok(data)
}
