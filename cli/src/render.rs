//! Output for each subcommand: a JSON value for `--json`, plain lines otherwise.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use model_catalog::{ModelConfig, Pricing, Resolved, ResolvedModel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProviderRow {
    pub provider: &'static str,
    pub local: bool,
    pub configured: bool,
    pub path: String,
}

/// Writes JSON to stdout. When pretty is true, multi-line; else one line.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", s);
    std::io::Write::flush(&mut std::io::stdout())?;
    Ok(())
}

fn price(p: Option<f64>) -> String {
    p.map_or_else(|| "-".to_string(), |v| format!("{}", v))
}

fn pricing_text(pricing: Option<&Pricing>) -> String {
    match pricing {
        Some(p) => format!("in {} / out {}", price(p.input), price(p.output)),
        None => "-".to_string(),
    }
}

fn count(n: Option<u64>) -> String {
    n.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn providers_text(rows: &[ProviderRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<6} {}",
            row.provider,
            if row.local { "local" } else { "remote" },
            if row.configured { row.path.as_str() } else { "(no document)" }
        );
    }
    out
}

pub fn models_text(models: &BTreeMap<String, ModelConfig>) -> String {
    let mut out = String::new();
    for (name, m) in models {
        let _ = writeln!(
            out,
            "{}  context={}  max_output={}  pricing={}",
            name,
            count(m.context_window),
            count(m.max_output_tokens),
            pricing_text(m.pricing.as_ref())
        );
    }
    out
}

pub fn pricing_text_table(pricing: &BTreeMap<String, Pricing>) -> String {
    let mut out = String::new();
    for (name, p) in pricing {
        let _ = writeln!(out, "{}  {}", name, pricing_text(Some(p)));
    }
    out
}

pub fn model_text(model: &ResolvedModel) -> String {
    let capabilities = model
        .capabilities
        .as_ref()
        .map(|caps| {
            caps.iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| "-".to_string());
    let mut out = String::new();
    let _ = writeln!(out, "provider:          {}", model.provider);
    let _ = writeln!(out, "model:             {}", model.model);
    let _ = writeln!(out, "configured:        {}", model.configured);
    let _ = writeln!(out, "context_window:    {}", count(model.context_window));
    let _ = writeln!(out, "max_output_tokens: {}", count(model.max_output_tokens));
    let _ = writeln!(out, "capabilities:      {}", capabilities);
    let _ = writeln!(out, "pricing:           {}", pricing_text(model.pricing.as_ref()));
    out
}

pub fn dir_text(resolved: &Resolved) -> String {
    format!("{} ({})\n", resolved.path.display(), resolved.probe.as_str())
}

pub fn dir_json(resolved: &Resolved) -> serde_json::Value {
    serde_json::json!({
        "path": resolved.path.display().to_string(),
        "probe": resolved.probe.as_str(),
    })
}

pub fn path_string(path: &Path) -> String {
    path.display().to_string()
}
