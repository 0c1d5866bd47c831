pub mod cache;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod fmt;
pub mod logging;
pub mod lookup;
pub mod omdb;
pub mod render;
pub mod utils;
