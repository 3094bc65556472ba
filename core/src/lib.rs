pub mod config;
pub mod error;
pub mod lifecycle;
pub mod locator;
pub mod protocol;
pub mod session;
pub mod snapshot;
pub mod transcript;
pub mod views;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use lifecycle::{Controls, Lifecycle, SessionState, StatusEvent};
pub use locator::MemoryCursor;
pub use protocol::{ClientMessage, ServerMessage, Toggle};
pub use session::{CommandChannel, Event, Session, Transport};
pub use snapshot::Snapshot;
pub use views::SnapshotView;
