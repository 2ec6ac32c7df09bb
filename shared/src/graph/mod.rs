pub mod config;
pub mod device;
pub mod error;
pub mod evaluation;
pub mod graph_store;
pub mod keys;
pub mod pin;
pub mod wire;
