use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Transport-agnostic domain event.
#[derive(Debug, Clone)]
pub enum ItemDomainEvent {
    Created { id: Uuid, at: DateTime<Utc> },
    Updated { id: Uuid, at: DateTime<Utc> },
    /// `bought` transitioned false→true.
    CheckedOff { id: Uuid, at: DateTime<Utc> },
    /// `bought` transitioned true→false.
    Unchecked { id: Uuid, at: DateTime<Utc> },
    Deleted { id: Uuid, at: DateTime<Utc> },
    BoughtCleared { removed: u64, at: DateTime<Utc> },
}
