//! Durable order record and the caller-facing snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted order row.
///
/// `state` is stored as text and must name a declared [`OrderState`](super::OrderState).
/// `lock_version` is bumped by the store on every update and checked to
/// detect writes based on stale data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: i64,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub lock_version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Fresh, never-persisted record with an empty state field.
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            state: String::new(),
            lock_version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read-only view of an order returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: Uuid,
    pub user_id: i64,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&OrderRecord> for OrderSnapshot {
    fn from(record: &OrderRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            state: record.state.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
