//! Hub services

pub mod peer_registry;
pub mod remote_assist;

pub use peer_registry::{MeshStatus, NetworkHealth, PeerInfo, PeerRegistry};
pub use remote_assist::{AssistError, RemoteAssist};
