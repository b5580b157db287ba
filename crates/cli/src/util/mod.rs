use anyhow::Context;
use keyrelay_core::platform::{KeyLayout, UsLayout, find_key_layout, key_layouts};
use keyrelay_runtime::KeyboardSettings;
use std::path::Path;

pub type CliResult<T> = anyhow::Result<T>;

/// Parses decimal or `0x`-prefixed hexadecimal numbers.
pub fn parse_number<T>(value: &str) -> Result<T, String>
where
    T: TryFrom<u64>,
{
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    }
    .map_err(|err| format!("invalid number `{value}`: {err}"))?;
    T::try_from(parsed).map_err(|_| format!("number `{value}` is out of range"))
}

pub fn load_settings(config: Option<&Path>) -> CliResult<KeyboardSettings> {
    match config {
        Some(path) => KeyboardSettings::load(path)
            .with_context(|| format!("loading keyboard settings from {}", path.display())),
        None => Ok(KeyboardSettings::default()),
    }
}

pub fn resolve_layout(name: Option<&str>) -> CliResult<&'static dyn KeyLayout> {
    let name = name.unwrap_or(UsLayout::NAME);
    find_key_layout(name).with_context(|| {
        let known: Vec<&str> = key_layouts().map(|layout| layout.name()).collect();
        format!("unknown layout `{name}` (registered: {})", known.join(", "))
    })
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
