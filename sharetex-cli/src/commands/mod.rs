//! CLI command implementations.

pub mod cache;
pub mod common;
pub mod config;
pub mod download;
pub mod parse;
pub mod search;
pub mod thumbnail;
