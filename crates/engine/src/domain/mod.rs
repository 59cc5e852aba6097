pub mod error;
pub mod hostname;
pub mod policy;
pub mod types;
pub mod verify;
