pub mod analysis;
pub mod config;
pub mod marker;
pub mod session;
