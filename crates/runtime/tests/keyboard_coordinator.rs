use std::sync::Arc;

use keyrelay_core::keys::{keycode, keyval, logical, physical};
use keyrelay_core::platform::{KeyLayout, KeyboardViewDelegate, MessengerErrorKind};
use keyrelay_core::{KeyEvent, KeyEventKind, LogicalKey, ModifierState, PhysicalKey};
use keyrelay_platform_mock::{CallKind, CallRecord, ChannelMode, MockKeyLayout, MockViewDelegate};
use keyrelay_runtime::{KeyDispatch, KeyResponder, KeyResponse, KeyboardCoordinator, KeyboardSettings};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    host: Arc<MockViewDelegate>,
    coordinator: KeyboardCoordinator,
}

impl Harness {
    fn with_settings(settings: KeyboardSettings) -> Self {
        let host = Arc::new(MockViewDelegate::new());
        let coordinator = KeyboardCoordinator::builder()
            .settings(settings)
            .build(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>);
        Self { host, coordinator }
    }

    /// Feeds every redispatched event back in, the way the toolkit would.
    fn replay_redispatched(&self) -> usize {
        let events = self.host.take_redispatched();
        for event in &events {
            assert!(!self.coordinator.handle_event(event), "replay must be left to the host");
        }
        events.len()
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::with_settings(KeyboardSettings::default())
}

fn key(is_press: bool, code: u16, value: u32) -> KeyEvent {
    KeyEvent::new(0, is_press, code, value, ModifierState::empty(), 0)
}

fn embedder_event(record: &CallRecord) -> (KeyEventKind, PhysicalKey, LogicalKey, Option<&str>, bool) {
    assert_eq!(record.kind, CallKind::Embedder);
    let event = record.event.as_ref().expect("embedder record carries an event");
    (event.kind, event.physical, event.logical, event.character.as_deref(), event.synthesized)
}

#[rstest]
fn dispose_with_unresolved_events(harness: Harness) {
    let Harness { host, coordinator } = harness;
    host.record_embedder_calls();
    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    host.respond_to_embedder_calls_with(true);
    assert!(coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A)));

    let mut records = host.take_records();
    assert_eq!(coordinator.pending_count(), 1);
    drop(coordinator);

    assert!(records[0].respond(false));
    assert_eq!(host.redispatched_count(), 0);
}

#[rstest]
fn single_async_responder(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    // Claimed by the framework.
    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    let mut records = host.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        embedder_event(&records[0]),
        (KeyEventKind::Down, physical::KEY_A, logical::KEY_A, Some("a"), false)
    );
    assert_eq!(host.redispatched_count(), 0);
    records[0].respond(true);
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());

    // Two unclaimed events, answered out of order.
    assert!(coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A)));
    assert!(coordinator.handle_event(&key(true, keycode::KEY_B, keyval::LOWER_B)));
    let mut records = host.take_records();
    assert_eq!(records.len(), 2);
    assert_eq!(
        embedder_event(&records[0]),
        (KeyEventKind::Up, physical::KEY_A, logical::KEY_A, None, false)
    );
    assert_eq!(
        embedder_event(&records[1]),
        (KeyEventKind::Down, physical::KEY_B, logical::KEY_B, Some("b"), false)
    );
    assert_eq!(host.redispatched_count(), 0);

    records[1].respond(false);
    assert_eq!(host.redispatched_count(), 1);
    records[0].respond(false);
    let keyvals: Vec<u32> = host.take_redispatched().iter().map(KeyEvent::keyval).collect();
    assert_eq!(keyvals, vec![keyval::LOWER_B, keyval::LOWER_A]);
    assert!(!coordinator.is_state_clear());

    for event in [key(true, keycode::KEY_B, keyval::LOWER_B), key(false, keycode::KEY_A, keyval::LOWER_A)] {
        assert!(!coordinator.handle_event(&event));
    }
    assert_eq!(host.record_count(), 0);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn replay_is_only_recognized_once(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_embedder_calls_with(false);
    let event = key(true, keycode::KEY_A, keyval::LOWER_A);

    assert!(coordinator.handle_event(&event));
    assert_eq!(harness.replay_redispatched(), 1);
    assert!(coordinator.is_state_clear());

    // Delivered again, the same event is new input: a repeat of the held key.
    host.respond_to_embedder_calls_with_and_record(true);
    assert!(coordinator.handle_event(&event));
    let records = host.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(embedder_event(&records[0]).0, KeyEventKind::Repeat);
    assert_eq!(host.redispatched_count(), 0);
}

#[rstest]
fn orphan_release_is_claimed_by_the_embedder(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    assert!(coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A)));
    assert_eq!(host.record_count(), 0);
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn single_sync_responder(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_embedder_calls_with_and_record(true);

    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    let records = host.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        embedder_event(&records[0]),
        (KeyEventKind::Down, physical::KEY_A, logical::KEY_A, Some("a"), false)
    );
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());

    host.respond_to_embedder_calls_with_and_record(false);
    assert!(coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A)));
    let records = host.take_records();
    assert_eq!(
        embedder_event(&records[0]),
        (KeyEventKind::Up, physical::KEY_A, logical::KEY_A, None, false)
    );
    assert_eq!(host.redispatched_count(), 1);
    assert!(!coordinator.is_state_clear());

    assert_eq!(harness.replay_redispatched(), 1);
    assert_eq!(host.record_count(), 0);
    assert!(coordinator.is_state_clear());
    assert!(coordinator.get_pressed_state().is_empty());
}

#[rstest]
fn two_async_responders(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();
    host.record_channel_calls();

    // One claims it.
    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    let mut records = host.take_records();
    let kinds: Vec<CallKind> = records.iter().map(|record| record.kind).collect();
    assert_eq!(kinds, vec![CallKind::Embedder, CallKind::Channel]);
    records[0].respond(true);
    records[1].respond(false);
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());

    // Nobody claims it.
    assert!(coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A)));
    let mut records = host.take_records();
    assert_eq!(records.len(), 2);
    records[0].respond(false);
    assert_eq!(host.redispatched_count(), 0);
    records[1].respond(false);

    let redispatched = host.take_redispatched();
    assert_eq!(redispatched.iter().map(KeyEvent::keyval).collect::<Vec<_>>(), vec![keyval::LOWER_A]);
    for event in &redispatched {
        assert!(!coordinator.handle_event(event));
    }
    assert_eq!(host.record_count(), 0);
    assert!(coordinator.is_state_clear());
    assert!(coordinator.get_pressed_state().is_empty());
}

#[rstest]
#[case::embedder_first([0, 1], [false, false], true)]
#[case::channel_first([1, 0], [false, false], true)]
#[case::embedder_claims_last([1, 0], [true, false], false)]
#[case::channel_claims_first([1, 0], [false, true], false)]
fn completion_order_does_not_change_verdict(
    harness: Harness,
    #[case] order: [usize; 2],
    #[case] answers: [bool; 2],
    #[case] redispatched: bool,
) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();
    host.record_channel_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    let mut records = host.take_records();
    for index in order {
        records[index].respond(answers[index]);
    }
    assert_eq!(host.redispatched_count(), usize::from(redispatched));
    assert_eq!(coordinator.pending_count(), 0);
}

#[rstest]
fn channel_message_carries_legacy_fields(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_embedder_calls_with(false);
    host.record_channel_calls();

    coordinator.handle_event(&KeyEvent::new(
        0,
        true,
        keycode::KEY_A,
        keyval::UPPER_A,
        ModifierState::SHIFT,
        0,
    ));
    let mut records = host.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].message,
        Some(json!({
            "type": "keydown",
            "keymap": "linux",
            "toolkit": "gtk",
            "scanCode": 0x26,
            "keyCode": 0x41,
            "modifiers": 1,
            "unicodeScalarValues": 0x41,
        }))
    );
    records[0].respond(true);
    assert_eq!(host.redispatched_count(), 0);
    assert_eq!(host.key_messenger().sent_channels(), vec!["flutter/keyevent".to_owned()]);
}

#[rstest]
fn text_input_returns_false(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_text_input_with(false);

    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    assert_eq!(host.text_filter_calls(), 1);
    assert_eq!(harness.replay_redispatched(), 1);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn text_input_returns_true(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_text_input_with(true);

    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn text_input_is_not_asked_once_claimed(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_embedder_calls_with(true);
    host.respond_to_text_input_with(true);

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    assert_eq!(host.text_filter_calls(), 0);
}

#[rstest]
#[case(false, 0, 1)]
#[case(true, 1, 0)]
fn text_input_sees_releases_only_when_configured(
    #[case] filters_releases: bool,
    #[case] filter_calls: usize,
    #[case] redispatched: usize,
) {
    let harness = Harness::with_settings(
        KeyboardSettings::default().with_text_input_filters_releases(filters_releases),
    );
    harness.host.respond_to_embedder_calls_with(true);
    harness.coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    harness.host.respond_to_embedder_calls_with(false);
    harness.host.respond_to_text_input_with(true);

    harness.coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A));
    assert_eq!(harness.host.text_filter_calls(), filter_calls);
    assert_eq!(harness.host.redispatched_count(), redispatched);
}

#[rstest]
#[case::key_a(keycode::KEY_A, keyval::LOWER_A, logical::KEY_A, "a")]
#[case::shift_key_a(keycode::KEY_A, keyval::UPPER_A, logical::KEY_A, "A")]
#[case::digit_1(keycode::DIGIT_1, keyval::DIGIT_1, logical::DIGIT_1, "1")]
#[case::shift_digit_1(keycode::DIGIT_1, keyval::EXCLAM, logical::DIGIT_1, "!")]
#[case::minus(keycode::MINUS, keyval::MINUS, logical::MINUS, "-")]
#[case::shift_minus(keycode::MINUS, keyval::UNDERSCORE, logical::UNDERSCORE, "_")]
fn logical_key_for_us_layout(
    harness: Harness,
    #[case] code: u16,
    #[case] value: u32,
    #[case] expected: LogicalKey,
    #[case] character: &str,
) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_embedder_calls_with_and_record(true);

    coordinator.handle_event(&key(true, code, value));
    coordinator.handle_event(&key(false, code, value));

    let records = host.take_records();
    assert_eq!(records.len(), 2);
    let (kind, _, logical, text, _) = embedder_event(&records[0]);
    assert_eq!(kind, KeyEventKind::Down);
    assert_eq!(logical, expected);
    assert_eq!(text, Some(character));
    assert_eq!(embedder_event(&records[1]).2, expected);
}

#[rstest]
#[case::control(ModifierState::CONTROL, physical::CONTROL_LEFT, logical::CONTROL_LEFT)]
#[case::meta(ModifierState::META, physical::META_LEFT, logical::META_LEFT)]
#[case::alt(ModifierState::MOD1, physical::ALT_LEFT, logical::ALT_LEFT)]
#[case::shift(ModifierState::SHIFT, physical::SHIFT_LEFT, logical::SHIFT_LEFT)]
fn synthesize_modifiers_if_needed(
    harness: Harness,
    #[case] mask: ModifierState,
    #[case] physical: PhysicalKey,
    #[case] logical: LogicalKey,
) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    coordinator.sync_modifier_if_needed(ModifierState::empty(), 1000);
    assert_eq!(host.record_count(), 0);

    coordinator.sync_modifier_if_needed(mask, 1000);
    assert_eq!(host.record_count(), 1);
    assert_eq!(coordinator.get_pressed_state().get(&physical), Some(&logical));

    coordinator.sync_modifier_if_needed(ModifierState::empty(), 1001);
    let records = host.take_records();
    assert_eq!(records.len(), 2);
    assert_eq!(embedder_event(&records[0]), (KeyEventKind::Down, physical, logical, None, true));
    assert_eq!(embedder_event(&records[1]), (KeyEventKind::Up, physical, logical, None, true));
    assert_eq!(records[1].event.as_ref().map(|event| event.timestamp), Some(1_001_000));

    // Already in sync: nothing more is synthesized.
    coordinator.sync_modifier_if_needed(ModifierState::empty(), 1002);
    assert_eq!(host.record_count(), 0);
}

#[rstest]
fn synthesized_events_skip_the_text_input_filter(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.respond_to_text_input_with(true);

    coordinator.sync_modifier_if_needed(ModifierState::CONTROL, 5);
    assert_eq!(host.text_filter_calls(), 0);
    let redispatched = host.take_redispatched();
    assert_eq!(redispatched.len(), 1);
    assert!(redispatched[0].is_synthesized());
}

#[rstest]
fn pressed_state_is_visible_before_any_answer(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    let pressed = coordinator.get_pressed_state();
    assert_eq!(pressed.len(), 1);
    assert_eq!(pressed.get(&physical::KEY_A), Some(&logical::KEY_A));
    assert_eq!(coordinator.pending_count(), 1);
}

#[rstest]
fn pressed_state_empties_after_release_resolves(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    coordinator.handle_event(&key(false, keycode::KEY_A, keyval::LOWER_A));
    let mut records = host.take_records();
    assert_eq!(coordinator.get_pressed_state().len(), 1);

    records[0].respond(false);
    assert_eq!(coordinator.get_pressed_state().len(), 1);
    records[1].respond(false);
    assert!(coordinator.get_pressed_state().is_empty());

    assert_eq!(harness.replay_redispatched(), 2);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn keyboard_channel_reports_pressed_state(harness: Harness) {
    let Harness { host, coordinator } = harness;
    host.record_embedder_calls();
    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));

    let messenger = host.key_messenger();
    let reply = messenger
        .receive_message("flutter/keyboard", br#"{"method": "getKeyboardState"}"#)
        .expect("handler installed");
    let value: Value = serde_json::from_slice(&reply).expect("json reply");
    assert_eq!(value, json!([{ "458756": 0x61 }]));

    drop(coordinator);
    assert!(!messenger.has_handler("flutter/keyboard"));
}

#[rstest]
fn completion_from_another_thread(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    let mut records = host.take_records();
    let callback = records[0].take_callback().expect("pending completion");
    std::thread::spawn(move || callback(false)).join().expect("responder thread");

    assert_eq!(host.redispatched_count(), 1);
    assert_eq!(coordinator.pending_count(), 0);
}

#[rstest]
#[case::transport_error(ChannelMode::Fail(MessengerErrorKind::ChannelClosed))]
#[case::malformed_reply(ChannelMode::Raw(b"not json".to_vec()))]
#[case::empty_reply(ChannelMode::Raw(Vec::new()))]
fn channel_failure_counts_as_unhandled(harness: Harness, #[case] mode: ChannelMode) {
    let Harness { host, coordinator } = &harness;
    host.set_channel_mode(mode);

    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    assert_eq!(harness.replay_redispatched(), 1);
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn dropped_completion_counts_as_unhandled(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    drop(host.take_records());
    assert_eq!(host.redispatched_count(), 1);
    assert_eq!(coordinator.pending_count(), 0);
}

#[rstest]
fn layout_change_flushes_logical_cache() {
    let layout = Arc::new(MockKeyLayout::new());
    let host = Arc::new(MockViewDelegate::new());
    let coordinator = KeyboardCoordinator::builder()
        .layout(Arc::clone(&layout) as Arc<dyn KeyLayout>)
        .build(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>);
    host.respond_to_embedder_calls_with_and_record(true);

    let tap = |coordinator: &KeyboardCoordinator| {
        coordinator.handle_event(&key(true, keycode::KEY_Q, keyval::LOWER_Q));
        coordinator.handle_event(&key(false, keycode::KEY_Q, keyval::LOWER_Q));
    };

    tap(&coordinator);
    layout.set_override(keycode::KEY_Q, keyval::LOWER_Q, 0, logical::KEY_A);
    tap(&coordinator);
    host.notify_layout_change();
    tap(&coordinator);

    let logicals: Vec<LogicalKey> = host
        .take_records()
        .iter()
        .filter_map(|record| record.event.as_ref())
        .filter(|event| event.kind == KeyEventKind::Down)
        .map(|event| event.logical)
        .collect();
    assert_eq!(logicals, vec![logical::KEY_Q, logical::KEY_Q, logical::KEY_A]);
}

struct ClaimEverything;

impl KeyResponder for ClaimEverything {
    fn name(&self) -> &'static str {
        "claim-everything"
    }

    fn handle_event(&self, _dispatch: &KeyDispatch, response: KeyResponse) {
        response.respond(true);
    }
}

#[rstest]
fn extra_responder_takes_part_in_verdict() {
    let host = Arc::new(MockViewDelegate::new());
    let coordinator = KeyboardCoordinator::builder()
        .settings(KeyboardSettings::default().with_channel_responder(false))
        .responder(Box::new(ClaimEverything))
        .build(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>);

    assert!(coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A)));
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());
    assert!(host.key_messenger().sent_channels().is_empty());
}

#[rstest]
fn unreplayable_modifier_syncs_leave_no_residue(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.refuse_synthesized_redispatches();

    for _ in 0..100 {
        coordinator.sync_modifier_if_needed(ModifierState::CONTROL, 0);
        coordinator.sync_modifier_if_needed(ModifierState::empty(), 0);
    }
    assert_eq!(host.refused_redispatch_count(), 200);
    assert_eq!(coordinator.pending_redispatch_count(), 0);
    assert!(coordinator.is_state_clear());
    assert!(coordinator.get_pressed_state().is_empty());

    // Same timestamp as every earlier sync: still dispatched as a fresh press.
    host.respond_to_embedder_calls_with_and_record(false);
    coordinator.sync_modifier_if_needed(ModifierState::CONTROL, 0);
    let records = host.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        embedder_event(&records[0]),
        (KeyEventKind::Down, physical::CONTROL_LEFT, logical::CONTROL_LEFT, None, true)
    );
    assert_eq!(
        coordinator.get_pressed_state().get(&physical::CONTROL_LEFT),
        Some(&logical::CONTROL_LEFT)
    );
}

#[rstest]
fn refused_redispatch_expects_no_replay(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.refuse_redispatches();
    let event = key(true, keycode::KEY_A, keyval::LOWER_A);

    assert!(coordinator.handle_event(&event));
    assert_eq!(host.refused_redispatch_count(), 1);
    assert_eq!(coordinator.pending_redispatch_count(), 0);
    assert!(coordinator.is_state_clear());

    // Delivered again it is new input, not a replay.
    host.respond_to_embedder_calls_with_and_record(true);
    assert!(coordinator.handle_event(&event));
    assert_eq!(host.record_count(), 1);
}

#[rstest]
fn replay_reentering_during_redispatch_is_recognized() {
    let host = Arc::new(MockViewDelegate::new());
    let coordinator =
        Arc::new(KeyboardCoordinator::new(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>));
    let weak = Arc::downgrade(&coordinator);
    host.replay_redispatches_inline(move |event| {
        weak.upgrade().is_some_and(|coordinator| coordinator.handle_event(event))
    });

    let press = key(true, keycode::KEY_A, keyval::LOWER_A);
    let release = key(false, keycode::KEY_A, keyval::LOWER_A);
    assert!(coordinator.handle_event(&press));
    assert!(coordinator.handle_event(&release));

    assert_eq!(host.take_inline_replays(), vec![(press, false), (release, false)]);
    assert_eq!(host.redispatched_count(), 0);
    assert!(coordinator.is_state_clear());
    assert!(coordinator.get_pressed_state().is_empty());
}

#[rstest]
fn answers_racing_fresh_events_from_other_threads(harness: Harness) {
    let Harness { host, coordinator } = &harness;
    host.record_embedder_calls();

    let mut workers = Vec::new();
    for time in 0..64u32 {
        let event = KeyEvent::new(
            time,
            time % 2 == 0,
            keycode::KEY_A,
            keyval::LOWER_A,
            ModifierState::empty(),
            0,
        );
        assert!(coordinator.handle_event(&event));
        for mut record in host.take_records() {
            let callback = record.take_callback().expect("pending completion");
            workers.push(std::thread::spawn(move || callback(time % 3 == 0)));
        }
        harness.replay_redispatched();
    }
    for worker in workers {
        worker.join().expect("responder thread");
    }
    harness.replay_redispatched();

    assert_eq!(coordinator.pending_count(), 0);
    assert!(coordinator.get_pressed_state().is_empty());
    assert!(coordinator.is_state_clear());
}

#[rstest]
fn custom_channel_names_are_honoured() {
    let harness = Harness::with_settings(
        KeyboardSettings::default()
            .with_key_event_channel("test/keyevent")
            .with_keyboard_channel("test/keyboard"),
    );
    let Harness { host, coordinator } = &harness;
    assert_eq!(coordinator.settings().key_event_channel, "test/keyevent");
    host.record_embedder_calls();

    coordinator.handle_event(&key(true, keycode::KEY_A, keyval::LOWER_A));
    let messenger = host.key_messenger();
    assert_eq!(messenger.sent_channels(), vec!["test/keyevent".to_owned()]);
    assert!(!messenger.has_handler("flutter/keyboard"));

    let reply = messenger
        .receive_message("test/keyboard", br#"{"method": "getKeyboardState"}"#)
        .expect("handler installed");
    let value: Value = serde_json::from_slice(&reply).expect("json reply");
    assert_eq!(value, json!([{ "458756": 0x61 }]));
}
