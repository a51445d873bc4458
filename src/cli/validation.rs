//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::ResourceKind;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!(
            "Configuration file does not exist or is not a file: '{path_str}'"
        ));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))
}

pub fn parse_resource_kind(kind_str: &str) -> Result<ResourceKind, String> {
    kind_str.parse().map_err(|e: AppError| e.to_string())
}

/// Validate a 1-based page number
pub fn validate_page_number(page_str: &str) -> Result<u32, String> {
    let page: u32 = page_str
        .parse()
        .map_err(|_| format!("Page must be a positive number, got: '{page_str}'"))?;

    if page == 0 {
        return Err("Pages are numbered from 1".to_string());
    }
    Ok(page)
}

/// Validate a page size is positive; the allowed set is checked against configuration later
pub fn validate_page_size(size_str: &str) -> Result<u32, String> {
    let size: u32 = size_str
        .parse()
        .map_err(|_| format!("Page size must be a positive number, got: '{size_str}'"))?;

    if size == 0 {
        return Err("Page size must be greater than 0".to_string());
    }
    Ok(size)
}

pub fn validate_id(id_str: &str) -> Result<String, String> {
    let id = id_str.trim();
    if id.is_empty() {
        return Err("Record id cannot be empty".to_string());
    }
    if id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(format!("Invalid record id: '{id_str}'"));
    }
    Ok(id.to_string())
}

/// Read the `--data` argument: inline JSON, or `@path` naming a JSON file.
///
/// The payload must be a JSON object.
pub fn load_payload(data: &str) -> AppResult<Value> {
    let raw = match data.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| AppError::BadRequest {
            message: format!("Cannot read payload file '{path}': {e}"),
        })?,
        None => data.to_string(),
    };

    let value: Value = serde_json::from_str(&raw)?;
    if !value.is_object() {
        return Err(AppError::BadRequest {
            message: "Payload must be a JSON object".to_string(),
        });
    }
    Ok(value)
}
