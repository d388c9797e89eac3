mod handlers;

pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod factory;
pub mod response;
pub mod restful;
