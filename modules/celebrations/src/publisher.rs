//! Bridge from shopping-list domain events to celebration bursts.

use std::sync::Arc;

use shopping_list::domain::{EventPublisher, ItemDomainEvent};

use crate::engine::{CelebrationEngine, Trigger};

/// Implements the shopping-list event port and turns the rewarding moments
/// into bursts. All other events pass through untouched.
pub struct CelebrationPublisher {
    engine: Arc<CelebrationEngine>,
}

impl CelebrationPublisher {
    pub fn new(engine: Arc<CelebrationEngine>) -> Self {
        Self { engine }
    }
}

impl EventPublisher<ItemDomainEvent> for CelebrationPublisher {
    fn publish(&self, event: &ItemDomainEvent) {
        match event {
            ItemDomainEvent::CheckedOff { .. } => self.engine.celebrate(Trigger::ItemChecked),
            ItemDomainEvent::BoughtCleared { removed, .. } if *removed > 0 => {
                self.engine.celebrate(Trigger::ListCleared);
            }
            _ => {}
        }
    }
}
