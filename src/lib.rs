#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod cstr;
pub mod defines;
pub mod mqtt;
mod util;
pub mod wifi;

// cfg.toml parsing and code generation shared with build.rs
#[cfg(test)]
#[path = "../build/config_gen.rs"]
mod config_gen;

pub use config::{Config, CONFIG, TOPICS};
