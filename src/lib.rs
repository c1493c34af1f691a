pub mod aliases;
pub mod cascade;
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod ids;
pub mod logging;
pub mod output;
pub mod plan;
pub mod sql;
