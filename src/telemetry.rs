//! Drill-telemetry feed.
//!
//! Process-wide state independent of the volume engine: the live drill
//! trajectory, current bit position, and measured depth, fanned out to
//! subscribed listeners on every update. A subscriber that has gone away is
//! removed during fan-out without affecting delivery to the others.

use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Identifies one feed subscriber
pub type SubscriberId = Uuid;

/// A point along the drill path: [lon, lat, height]
pub type DrillPoint = [f64; 3];

/// Current drill state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillState {
    /// Trajectory points drilled so far
    pub path: Vec<DrillPoint>,
    /// Current bit position, if known
    pub bit: Option<DrillPoint>,
    /// Measured depth
    pub md: f64,
    /// When the state last changed
    pub updated_at: DateTime<Utc>,
}

impl DrillState {
    fn new() -> Self {
        Self {
            path: Vec::new(),
            bit: None,
            md: 0.0,
            updated_at: Utc::now(),
        }
    }
}

/// Partial state update; absent fields leave the current state untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillUpdate {
    pub bit: Option<DrillPoint>,
    pub md: Option<f64>,
    pub path: Option<Vec<DrillPoint>>,
}

/// Publish/subscribe registry for drill state.
pub struct DrillFeed {
    state: RwLock<DrillState>,
    subscribers: RwLock<HashMap<SubscriberId, UnboundedSender<DrillState>>>,
}

impl DrillFeed {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DrillState::new()),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> DrillState {
        self.state.read().clone()
    }

    /// Register a listener.
    ///
    /// The current state is delivered immediately so a late joiner starts
    /// from a consistent picture instead of waiting for the next update.
    pub fn subscribe(&self) -> (SubscriberId, UnboundedReceiver<DrillState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let _ = tx.send(self.snapshot());
        self.subscribers.write().insert(id, tx);
        debug!("drill feed subscriber {id} registered");
        (id, rx)
    }

    /// Remove a listener; a no-op for unknown ids
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.write().remove(&id).is_some() {
            debug!("drill feed subscriber {id} removed");
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Apply a partial update and fan the new state out to every subscriber.
    ///
    /// Delivery failures (the receiving end has been dropped) remove the
    /// dead subscriber; fan-out continues to the rest. Returns the state
    /// after the update.
    pub fn publish(&self, update: DrillUpdate) -> DrillState {
        let snapshot = {
            let mut state = self.state.write();
            if let Some(bit) = update.bit {
                state.bit = Some(bit);
            }
            if let Some(md) = update.md {
                state.md = md;
            }
            if let Some(path) = update.path {
                state.path = path;
            }
            state.updated_at = Utc::now();
            state.clone()
        };

        let mut subscribers = self.subscribers.write();
        subscribers.retain(|id, tx| {
            let alive = tx.send(snapshot.clone()).is_ok();
            if !alive {
                debug!("drill feed subscriber {id} gone, pruned during fan-out");
            }
            alive
        });

        snapshot
    }
}

impl Default for DrillFeed {
    fn default() -> Self {
        Self::new()
    }
}
