pub use config::*;

pub mod config;
