use crate::OutputFormat;
use crate::util::{CliResult, load_settings, resolve_layout, yes_no};
use anyhow::Context;
use clap::Args;
use keyrelay_core::platform::{KeyLayout, KeyboardViewDelegate};
use keyrelay_core::{KeyEvent, ModifierState};
use keyrelay_platform_mock::MockViewDelegate;
use keyrelay_runtime::KeyboardCoordinator;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[arg(value_name = "TRACE", help = "JSON array of trace steps ({\"event\": …} or {\"sync\": …}).")]
    pub trace: PathBuf,
    #[arg(long = "embedder", value_name = "BOOL", help = "Answer of the embedded runtime (default: false).")]
    pub embedder: Option<bool>,
    #[arg(long = "channel", value_name = "BOOL", help = "Answer on the key event channel (default: false).")]
    pub channel: Option<bool>,
    #[arg(long = "text-input", value_name = "BOOL", help = "Answer of the text input filter (default: false).")]
    pub text_input: Option<bool>,
    #[arg(long = "config", value_name = "FILE", help = "Keyboard settings JSON file.")]
    pub config: Option<PathBuf>,
    #[arg(long = "layout", value_name = "NAME", help = "Registered key layout (default: us).")]
    pub layout: Option<String>,
}

/// One entry of a key event trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStep {
    Event(KeyEvent),
    Sync { state: u32, time: u32 },
}

#[derive(Serialize, Debug, PartialEq)]
struct StepOutcome {
    index: usize,
    step: String,
    accepted: bool,
    redispatched: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct ReplaySummary {
    steps: Vec<StepOutcome>,
    pressed: Vec<PressedKey>,
    state_clear: bool,
}

#[derive(Serialize, Debug, PartialEq)]
struct PressedKey {
    physical: u64,
    logical: u64,
}

pub fn run(args: &ReplayArgs, format: OutputFormat) -> CliResult<String> {
    let steps = load_trace(&args.trace)?;
    let settings = load_settings(args.config.as_deref())?;
    let layout = resolve_layout(args.layout.as_deref())?;

    let host = Arc::new(MockViewDelegate::new());
    host.respond_to_embedder_calls_with(args.embedder.unwrap_or(false));
    host.respond_to_channel_calls_with(args.channel.unwrap_or(false));
    host.respond_to_text_input_with(args.text_input.unwrap_or(false));

    let coordinator = KeyboardCoordinator::builder()
        .settings(settings)
        .layout(Arc::new(layout) as Arc<dyn KeyLayout>)
        .build(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>);

    let summary = replay_steps(&coordinator, &host, &steps);
    match format {
        OutputFormat::Text => Ok(render_replay_text(&summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
    }
}

pub fn load_trace(path: &Path) -> CliResult<Vec<TraceStep>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading trace {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing trace {}", path.display()))
}

fn replay_steps(
    coordinator: &KeyboardCoordinator,
    host: &MockViewDelegate,
    steps: &[TraceStep],
) -> ReplaySummary {
    let mut outcomes = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let (description, accepted) = match step {
            TraceStep::Event(event) => (event.to_string(), coordinator.handle_event(event)),
            TraceStep::Sync { state, time } => {
                coordinator.sync_modifier_if_needed(ModifierState::from_raw(*state), *time);
                (format!("sync state={state:#x} time={time}"), true)
            }
        };

        // The mock host answers synchronously, so everything redispatched for
        // this step is already queued. Loop it back like the toolkit would.
        let mut redispatched = Vec::new();
        for event in host.take_redispatched() {
            let replay_accepted = coordinator.handle_event(&event);
            tracing::debug!(%event, replay_accepted, "looped redispatched event back");
            redispatched.push(event.to_string());
        }
        outcomes.push(StepOutcome { index, step: description, accepted, redispatched });
    }

    let mut pressed: Vec<PressedKey> = coordinator
        .get_pressed_state()
        .into_iter()
        .map(|(physical, logical)| PressedKey { physical: physical.value(), logical: logical.value() })
        .collect();
    pressed.sort_by_key(|key| key.physical);

    ReplaySummary { steps: outcomes, pressed, state_clear: coordinator.is_state_clear() }
}

fn render_replay_text(summary: &ReplaySummary) -> String {
    let mut output = String::new();
    for step in &summary.steps {
        let _ = writeln!(&mut output, "[{}] {} (accepted: {})", step.index, step.step, yes_no(step.accepted));
        for event in &step.redispatched {
            let _ = writeln!(&mut output, "    redispatched: {event}");
        }
    }

    if summary.pressed.is_empty() {
        let _ = writeln!(&mut output, "Pressed: none");
    } else {
        let _ = writeln!(&mut output, "Pressed:");
        for key in &summary.pressed {
            let _ = writeln!(&mut output, "  - {:#x} -> {:#x}", key.physical, key.logical);
        }
    }
    let _ = writeln!(&mut output, "State clear: {}", yes_no(summary.state_clear));
    output.trim_end().to_owned()
}
