use crate::error::{CcbarError, Result};
use serde::Serialize;
use std::io::Write;

pub const ICON_STATIC: &str = "󰜡";
pub const CLASS_LOADING: &str = "loading";
pub const CLASS_ERROR: &str = "error";

/// One status-bar record, serialized as a single line of JSON.
///
/// `text` is always present; `tooltip`, `class` and `percentage` are omitted
/// from the output entirely when unset, per waybar's omit-if-empty reading of
/// custom module fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
}

impl Output {
    /// The placeholder frame emitted before the first fetch completes.
    pub fn loading() -> Self {
        Output {
            text: ICON_STATIC.to_string(),
            tooltip: Some("Loading Claude Code usage…".to_string()),
            class: Some(CLASS_LOADING.to_string()),
            percentage: None,
        }
    }

    /// The degraded frame emitted when a fetch fails: static icon, error
    /// class, short explanation in the tooltip. Never stale or partial data.
    pub fn degraded(reason: &str) -> Self {
        Output {
            text: ICON_STATIC.to_string(),
            tooltip: Some(format!("Unable to load stats: {reason}")),
            class: Some(CLASS_ERROR.to_string()),
            percentage: None,
        }
    }

    /// Write the record as one flushed, newline-terminated JSON line so a
    /// line-delimited reader sees it immediately.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(CcbarError::OutputEncode)?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}
