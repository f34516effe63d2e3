//! Mutation events.
//!
//! A successful write is described as an event; the planner turns it into
//! the set of cache entries that must be marked stale or removed.

use time::OffsetDateTime;
use uuid::Uuid;

use super::keys::ResourceKind;

/// Monotonic counter ordering fetches, invalidations and removals.
pub type Epoch = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Created { resource: ResourceKind, id: String },
    Updated { resource: ResourceKind, id: String },
    Deleted { resource: ResourceKind, id: String },
}

impl MutationKind {
    pub fn created(resource: ResourceKind, id: impl ToString) -> Self {
        Self::Created {
            resource,
            id: id.to_string(),
        }
    }

    pub fn updated(resource: ResourceKind, id: impl ToString) -> Self {
        Self::Updated {
            resource,
            id: id.to_string(),
        }
    }

    pub fn deleted(resource: ResourceKind, id: impl ToString) -> Self {
        Self::Deleted {
            resource,
            id: id.to_string(),
        }
    }

    pub fn resource(&self) -> ResourceKind {
        match self {
            Self::Created { resource, .. }
            | Self::Updated { resource, .. }
            | Self::Deleted { resource, .. } => *resource,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

/// A mutation event as applied to the cache.
#[derive(Debug, Clone)]
pub struct MutationEvent {
    pub id: Uuid,
    pub epoch: Epoch,
    pub kind: MutationKind,
    pub timestamp: OffsetDateTime,
}

impl MutationEvent {
    pub fn new(kind: MutationKind, epoch: Epoch) -> Self {
        Self {
            id: Uuid::new_v4(),
            epoch,
            kind,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}
