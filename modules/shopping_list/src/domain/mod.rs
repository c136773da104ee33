pub mod error;
pub mod events;
pub mod ports;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use events::ItemDomainEvent;
pub use ports::EventPublisher;
pub use repo::ItemsRepository;
pub use service::Service;
