//! recruit-admin library
//!
//! Core modules of the terminal admin client for the recruitment backend:
//! paginated list screens backed by a query cache, mutations that keep those
//! screens fresh, and the CLI that drives them.

use shadow_rs::shadow;
shadow!(build);

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod pagination;
pub mod render;
pub mod services;

#[cfg(test)]
mod testing;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
