//! The REST backend behind every list and form.

mod client;
mod rest;
mod source;

pub use client::build_http_client;
pub use rest::RestDataSource;
pub use source::{DataSource, SourceError};
