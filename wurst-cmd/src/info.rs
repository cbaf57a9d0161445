use anyhow::{Context, Result};
use cryowurst::{DecoderConfig, Summary};
use handlebars::handlebars_helper;
use serde::Serialize;
use std::{
    io::{stdout, Write},
    path::PathBuf,
};

use crate::decode::{decode_inputs, DecodedInputs};

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum Format {
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize)]
struct Info {
    inputs: Vec<String>,
    failures: usize,
    /// Input locations of messages that failed to decode
    failed: Vec<String>,
    skipped: usize,
    truncated_bytes: usize,
    summary: Summary,
}

fn summarize(inputs: &[PathBuf], config: &DecoderConfig) -> Result<Info> {
    let DecodedInputs { decoded, failed } = decode_inputs(inputs, config)?;
    Ok(Info {
        inputs: inputs
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect(),
        failures: failed.len(),
        failed: failed.iter().map(ToString::to_string).collect(),
        skipped: decoded.skipped,
        truncated_bytes: decoded.truncated_bytes,
        summary: decoded.records.iter().collect(),
    })
}

pub fn info(inputs: &[PathBuf], format: &Format, config: &DecoderConfig) -> Result<()> {
    let info = summarize(inputs, config)?;

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &info).context("serializing to json")
        }
        Format::Text => {
            let data = render_text(&info).context("serializing info")?;
            stdout()
                .write_all(str::as_bytes(&data))
                .context("writing to stdout")
        }
    }
}

fn render_text(info: &Info) -> Result<String> {
    handlebars_helper!(left_pad: |num: u64, v: Json| {
        let v = match v {
            serde_json::Value::String(s) => s.to_owned(),
            serde_json::Value::Null => String::new(),
            _ => v.to_string()
        };
        let width = usize::try_from(num).unwrap_or(v.len()).max(v.len());
        format!("{v:>width$}")
    });
    let mut hb = handlebars::Handlebars::new();
    hb.register_helper("lpad", Box::new(left_pad));
    hb.register_template_string("info", TEXT_TEMPLATE)
        .context("registering template")?;

    hb.render("info", &info).context("rendering text")
}

const TEXT_TEMPLATE: &str = r"{{ #each inputs }}{{ this }}
{{ /each }}===============================================================================
First:     {{ summary.total.first_time }}
Last:      {{ summary.total.last_time }}
Records:   {{ summary.total.count }}
Failures:  {{ failures }}
Skipped:   {{ skipped }}
Truncated: {{ truncated_bytes }} bytes
-------------------------------------------------------------------------------
UID        First                          Last                            Count
-------------------------------------------------------------------------------
{{ #each summary.uids }}{{ lpad 8 @key }}  {{ lpad 29 first_time }}  {{ lpad 29 last_time }}  {{ lpad 7 count }}
{{/each }}
";
