use crate::OutputFormat;
use crate::util::{CliResult, parse_number, resolve_layout};
use clap::Args;
use keyrelay_core::keys::{keyval_to_char, physical_key_for_keycode};
use serde::Serialize;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    #[arg(value_name = "KEYCODE", value_parser = parse_number::<u16>, help = "Hardware scan code, decimal or 0x-prefixed.")]
    pub keycode: u16,
    #[arg(value_name = "KEYVAL", value_parser = parse_number::<u32>, help = "Toolkit key symbol, decimal or 0x-prefixed.")]
    pub keyval: u32,
    #[arg(long = "group", default_value_t = 0, help = "Keyboard layout group.")]
    pub group: u8,
    #[arg(long = "layout", value_name = "NAME", help = "Registered key layout (default: us).")]
    pub layout: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct LookupSummary {
    layout: String,
    keycode: u16,
    keyval: u32,
    group: u8,
    physical: u64,
    logical: u64,
    character: Option<String>,
}

pub fn run(args: &LookupArgs, format: OutputFormat) -> CliResult<String> {
    let layout = resolve_layout(args.layout.as_deref())?;
    let summary = LookupSummary {
        layout: layout.name().to_owned(),
        keycode: args.keycode,
        keyval: args.keyval,
        group: args.group,
        physical: physical_key_for_keycode(args.keycode).value(),
        logical: layout.lookup_logical_key(args.keycode, args.keyval, args.group).value(),
        character: keyval_to_char(args.keyval).map(String::from),
    };
    match format {
        OutputFormat::Text => Ok(render_lookup_text(&summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
    }
}

fn render_lookup_text(summary: &LookupSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(
        &mut output,
        "Key: keycode={:#04x} keyval={:#06x} group={} [{}]",
        summary.keycode, summary.keyval, summary.group, summary.layout
    );
    let _ = writeln!(&mut output, "Physical: {:#x}", summary.physical);
    let _ = writeln!(&mut output, "Logical: {:#x}", summary.logical);
    let _ = writeln!(&mut output, "Character: {}", summary.character.as_deref().unwrap_or("(none)"));
    output.trim_end().to_owned()
}
