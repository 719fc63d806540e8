//! Rendering behind the C entry points
//!
//! Everything here returns a [`Result`] so failures keep their cause. Only
//! [`respond`] flattens a failure into the empty string C callers see.

use std::any::Any;
use std::ffi::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};

use termdown::{RenderOptions, TermRenderer};

use crate::buffer::OwnedCString;
use crate::request::RenderRequest;

/// Version of this library, when built by cargo
pub const FFI_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Error type for bridge operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Render(#[from] termdown::Error),

    #[error("Rendered text contains a NUL byte at offset {0}")]
    InteriorNul(usize),

    #[error("Panic while rendering: {0}")]
    Panic(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Build a renderer for the request and render its Markdown
pub fn render(request: &RenderRequest) -> Result<String> {
    let renderer = TermRenderer::new(RenderOptions::from(request))?;
    Ok(renderer.render(&request.markdown)?)
}

pub fn render_default(markdown: &str, style: &str) -> Result<String> {
    render(&RenderRequest::basic(markdown, style))
}

pub fn render_with_width(markdown: &str, style: &str, width: c_int) -> Result<String> {
    render(&RenderRequest::with_width(markdown, style, width))
}

#[allow(clippy::too_many_arguments)]
pub fn render_with_options(
    markdown: &str,
    style: &str,
    width: c_int,
    emoji: c_int,
    preserve_newlines: c_int,
    base_url: Option<String>,
    color_profile: c_int,
) -> Result<String> {
    render(&RenderRequest::with_options(
        markdown,
        style,
        width,
        emoji,
        preserve_newlines,
        base_url,
        color_profile,
    ))
}

pub fn render_with_json_style(markdown: &str, json: &str, width: c_int) -> Result<String> {
    render(&RenderRequest::with_json_style(markdown, json, width))
}

/// Run `f`, turning a panic into [`BridgeError::Panic`]
pub fn guard<F>(f: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(BridgeError::Panic(panic_message(payload.as_ref())))
    })
}

/// Copy a result into a C string. Any failure becomes the empty string.
pub fn into_c_string(result: Result<String>) -> OwnedCString {
    let converted = result.and_then(|text| {
        OwnedCString::new(text).map_err(|err| BridgeError::InteriorNul(err.nul_position()))
    });

    match converted {
        Ok(owned) => owned,
        Err(err) => {
            tracing::warn!(error = %err, "render failed, returning empty string");
            OwnedCString::empty()
        }
    }
}

/// Render behind a panic guard and hand back a C string
pub fn respond<F>(f: F) -> OwnedCString
where
    F: FnOnce() -> Result<String>,
{
    into_c_string(guard(f))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub fn version_or_unknown(version: Option<&str>) -> &str {
    match version {
        Some(version) if !version.is_empty() => version,
        _ => "unknown",
    }
}

/// Version of the embedded renderer, or `unknown`
pub fn upstream_version() -> &'static str {
    version_or_unknown(termdown::VERSION)
}

pub fn version_info() -> String {
    format!(
        "termdown-ffi v{} (upstream {})",
        version_or_unknown(FFI_VERSION),
        upstream_version()
    )
}
