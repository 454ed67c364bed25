//! Turning scan results into text.
//!
//! Networks are flattened into [`DisplayRecord`]s and handed to a Tera
//! template. The built-in template prints a table; users can point the
//! config (or `--template`) at their own file, which receives the same
//! context: `interface`, `provenance`, `count` and `nets`.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Context, Tera, Value};

use crate::scan::{NetworkDescriptor, Provenance, ScanResult};

/// Shown in place of a missing SSID or measurement.
pub const PLACEHOLDER: &str = "N/A";

const TEMPLATE_NAME: &str = "networks";

const DEFAULT_TEMPLATE: &str = r#"{{ interface }}: {{ count }} network(s) ({{ provenance }} scan)
{% if count > 0 %}
{{ "BSSID" | pad(width=19) }}{{ "SSID" | pad(width=33) }}{{ "SIGNAL" | pad(width=8) }}{{ "NOISE" | pad(width=7) }}CHANNEL
{% for net in nets -%}
{{ net.bssid | pad(width=19) }}{{ net.ssid | pad(width=33) }}{{ net.signal | pad(width=8) }}{{ net.noise | pad(width=7) }}{{ net.channel }}
{% endfor -%}
{% endif -%}
"#;

/// One network as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub bssid: String,
    /// The SSID, or [`PLACEHOLDER`] for hidden networks.
    pub ssid: String,
    pub signal: i32,
    pub noise: Option<i32>,
    pub channel: u32,
    pub security: String,
}

impl From<&NetworkDescriptor> for DisplayRecord {
    fn from(network: &NetworkDescriptor) -> Self {
        DisplayRecord {
            bssid: network.bssid.clone(),
            ssid: network
                .ssid
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            signal: network.signal,
            noise: network.noise,
            channel: network.channel,
            security: network.security.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub interface: String,
    pub provenance: Provenance,
    pub count: usize,
    pub nets: Vec<DisplayRecord>,
}

impl From<&ScanResult> for ScanReport {
    fn from(result: &ScanResult) -> Self {
        let nets: Vec<DisplayRecord> = result.networks.iter().map(DisplayRecord::from).collect();
        ScanReport {
            interface: result.interface.clone(),
            provenance: result.provenance,
            count: nets.len(),
            nets,
        }
    }
}

/// Render `report` with the template at `template`, or the built-in one.
pub fn render(report: &ScanReport, template: Option<&Path>) -> Result<String> {
    match template {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            render_template(report, &source)
                .with_context(|| format!("Failed to render template: {}", path.display()))
        }
        None => render_template(report, DEFAULT_TEMPLATE),
    }
}

/// Render `report` with template source text.
pub fn render_template(report: &ScanReport, source: &str) -> Result<String> {
    let mut tera = Tera::default();
    tera.register_filter("pad", pad);
    tera.add_raw_template(TEMPLATE_NAME, source)
        .context("Template parsing error")?;

    let context = Context::from_serialize(report).context("Failed to build template context")?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

pub fn to_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize scan report")
}

/// `pad(width=N)`: left-align the value in a column of N characters,
/// keeping at least one space after it. Null renders as [`PLACEHOLDER`].
fn pad(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("pad filter expects a numeric `width` argument"))?
        as usize;

    let text = match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let len = text.chars().count();
    let fill = if len < width { width - len } else { 1 };

    Ok(Value::String(format!("{}{}", text, " ".repeat(fill))))
}
