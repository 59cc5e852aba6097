pub use self::config::*;
pub use self::core::*;
pub use self::trust::*;

mod config;
mod core;
mod trust;
