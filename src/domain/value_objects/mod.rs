pub mod account_status;
pub mod asset_filename;
pub mod role_name;

pub use account_status::*;
pub use asset_filename::*;
pub use role_name::*;
