pub mod connection;
mod connection_trait;
pub mod error;
pub mod wire;

pub use connection::MatchboxConnection;
pub use connection_trait::Connection;
