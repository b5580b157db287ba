use crate::OutputFormat;
use crate::util::CliResult;
use keyrelay_core::platform::key_layouts;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
struct LayoutSummary {
    name: String,
}

pub fn run(format: OutputFormat) -> CliResult<String> {
    let mut layouts: Vec<LayoutSummary> =
        key_layouts().map(|layout| LayoutSummary { name: layout.name().to_owned() }).collect();
    layouts.sort_by(|a, b| a.name.cmp(&b.name));

    match format {
        OutputFormat::Text => {
            if layouts.is_empty() {
                return Ok("No layouts registered.".to_owned());
            }
            Ok(layouts.iter().map(|layout| format!("- {}", layout.name)).collect::<Vec<_>>().join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&layouts)?),
    }
}
