pub mod live_stream;
pub mod role;
pub mod user;

pub use live_stream::*;
pub use role::*;
pub use user::*;
