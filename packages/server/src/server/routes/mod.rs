// HTTP routes
pub mod files;
pub mod health;
pub mod summary;

pub use files::*;
pub use health::*;
pub use summary::*;
