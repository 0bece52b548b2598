//! Sharetex - texture catalog browsing with a cache-first asset store.
//!
//! The library covers the whole path from a remote catalog to textures on
//! disk:
//!
//! - [`naming`] recovers resolution, asset name and map type from archive
//!   entry names and renames textures consistently
//! - [`catalog`] decodes catalog payloads, hides unwanted items and ranks
//!   the rest against a search query
//! - [`cache`] keeps decoded previews in memory and assets on disk, and
//!   coalesces concurrent fetches of the same key
//! - [`fetch`] answers each request from the cache when possible and
//!   downloads, renames and promotes assets otherwise
//! - [`config`] loads `config.ini` and builds the runtime [`config::Settings`]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod naming;
pub mod resolution;

pub use resolution::{Resolution, UnknownResolution};
