pub mod connection;
pub mod live_stream_repository;
pub mod user_repository;

pub use connection::Database;
pub use live_stream_repository::{DisconnectedLiveStreamRepository, PostgreSqlLiveStreamRepository};
pub use user_repository::{DisconnectedUserRepository, PostgreSqlUserRepository};
