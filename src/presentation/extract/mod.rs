mod json;
mod path;

pub use self::json::Json;
pub use self::path::Path;
