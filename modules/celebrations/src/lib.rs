//! Celebration module: a server-side confetti simulation whose frames are
//! streamed to browsers over SSE. Bursts are triggered by shopping-list
//! domain events (an item checked off, the bought pile cleared).

pub mod config;
pub mod engine;
pub mod frame;
pub mod publisher;
pub mod routes;
pub mod sse;

pub use config::CelebrationsConfig;
pub use engine::{CelebrationEngine, Trigger};
pub use frame::{CelebrationFrame, FrameParticle};
pub use publisher::CelebrationPublisher;
pub use sse::SseBroadcaster;
