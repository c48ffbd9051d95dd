pub mod config;
pub mod memory;
pub mod sweeper;
