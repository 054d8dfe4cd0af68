//! Allowed component types for stream and task apps.
//!
//! The resolver accepts any token as a type; these checks only guard CLI
//! filters so a typo is reported instead of silently matching nothing.

use crate::error::{AppToolError, Result};
use crate::resolver::WILDCARD;

pub const STREAM_APP_TYPES: &[&str] = &["source", "processor", "sink"];
pub const APP_TYPES: &[&str] = &["source", "processor", "sink", "task", "app"];

/// Accepts `*` or one of [`STREAM_APP_TYPES`].
pub fn validate_stream_type(component_type: &str) -> Result<()> {
    validate(component_type, STREAM_APP_TYPES)
}

/// Accepts `*` or one of [`APP_TYPES`].
pub fn validate_app_type(component_type: &str) -> Result<()> {
    validate(component_type, APP_TYPES)
}

fn validate(component_type: &str, allowed: &[&str]) -> Result<()> {
    if component_type == WILDCARD || allowed.contains(&component_type) {
        return Ok(());
    }
    Err(AppToolError::UnsupportedComponentType {
        given: component_type.to_string(),
        supported: allowed.join(","),
    })
}
