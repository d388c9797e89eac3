pub mod cmd;
pub mod config;
pub mod logs;
pub mod server;
pub mod time;
pub mod types;
