pub mod api;
pub mod cli;
pub mod compute;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod output;
