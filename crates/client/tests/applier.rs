//! Inbound update handling: selections, highlight scrolls, resets, relays.

use bus::{ClientIntent, ServerUpdate};
use client::Client;
use core_types::{Mode, SelectOption, Selection};
use dom::{DomEvent, SyntheticEvent};
use select_test_support::{FixtureBuilder, PageFixture, ScriptedServer};
use serde_json::json;
use std::time::{Duration, Instant};

fn setup(builder: FixtureBuilder) -> (Client, ScriptedServer, PageFixture) {
    let (bus, endpoint) = bus::channel();
    (
        Client::new(bus),
        ScriptedServer::new(endpoint),
        builder.build(),
    )
}

fn select(
    id: u64,
    options: Vec<SelectOption>,
    mode: Mode,
    current_text: Option<&str>,
) -> ServerUpdate {
    ServerUpdate::Select {
        id,
        selection: Selection::from(options),
        mode,
        current_text: current_text.map(str::to_string),
        focus: false,
        input_event: true,
        parent_event: None,
    }
}

#[test]
fn single_selection_fills_text_and_hidden_field() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(
        id,
        vec![SelectOption::new("Berlin", "BER")],
        Mode::Single,
        Some("Berlin"),
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(f.page.value(f.text_input), Some("Berlin"));
    assert_eq!(f.page.value(f.hidden_field), Some("BER"));
    assert_eq!(
        f.page.take_events(),
        vec![SyntheticEvent {
            target: f.hidden_field,
            bubbles: true
        }]
    );
    assert_eq!(
        client.selection(id).map(|s| s.len()),
        Some(1)
    );
}

#[test]
fn structured_values_land_in_the_hidden_field_as_json() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(
        id,
        vec![SelectOption::new("Berlin", json!({"code": "BER", "pop": 3}))],
        Mode::Single,
        None,
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(
        f.page.value(f.hidden_field),
        Some(r#"{"code":"BER","pop":3}"#)
    );
}

#[test]
fn empty_single_selection_clears_both_fields() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();
    f.page.set_value(f.text_input, "Ber");
    f.page.set_value(f.hidden_field, "BER");

    server.push(select(id, Vec::new(), Mode::Single, Some("")));
    client.pump_updates(&mut f.page);

    assert_eq!(f.page.value(f.text_input), Some(""));
    assert_eq!(f.page.value(f.hidden_field), Some(""));
}

#[test]
fn absent_text_directive_preserves_typing() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();
    f.page.set_value(f.text_input, "berl");

    server.push(select(
        id,
        vec![SelectOption::new("Berlin", "BER")],
        Mode::Single,
        None,
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(f.page.value(f.text_input), Some("berl"));
}

#[test]
fn focus_directive_moves_focus_to_the_text_input() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(ServerUpdate::Select {
        id,
        selection: Selection::empty(),
        mode: Mode::Single,
        current_text: None,
        focus: true,
        input_event: false,
        parent_event: None,
    });
    client.pump_updates(&mut f.page);

    assert_eq!(f.page.focused(), Some(f.text_input));
    assert!(f.page.take_events().is_empty());
}

#[test]
fn empty_multi_selection_notifies_on_the_marker_input() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new().multi().selected(2));
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(id, Vec::new(), Mode::Multi, None));
    client.pump_updates(&mut f.page);

    // The bare `field` input is the empty-selection marker; the per-value
    // `field[]` inputs are not touched.
    assert_eq!(
        f.page.take_events(),
        vec![SyntheticEvent {
            target: f.hidden_field,
            bubbles: true
        }]
    );
}

#[test]
fn nonempty_multi_selection_notifies_on_the_first_value_input() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new().multi().selected(2));
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(
        id,
        vec![
            SelectOption::new("Berlin", "BER"),
            SelectOption::new("Bern", "BRN"),
        ],
        Mode::Multi,
        None,
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(
        f.page.take_events(),
        vec![SyntheticEvent {
            target: f.hidden_multi[0],
            bubbles: true
        }]
    );
    assert_eq!(client.selection(id).map(|s| s.len()), Some(2));
}

#[test]
fn select_with_parent_event_relays_the_selection_payload() {
    let (mut client, server, mut f) =
        setup(FixtureBuilder::new().relay_target("filter-form"));
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(ServerUpdate::Select {
        id,
        selection: Selection::from(vec![SelectOption::new("Berlin", "BER")]),
        mode: Mode::Single,
        current_text: None,
        focus: false,
        input_event: false,
        parent_event: Some("selection_changed".to_string()),
    });
    client.pump_updates(&mut f.page);

    assert_eq!(
        server.drain(),
        vec![ClientIntent::RelayEvent {
            target: "filter-form".to_string(),
            id,
            event: "selection_changed".to_string(),
            payload: json!([{"label": "Berlin", "value": "BER"}]),
        }]
    );
}

#[test]
fn parent_event_without_a_relay_target_is_dropped() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(ServerUpdate::ParentEvent {
        id,
        event: "focus".to_string(),
        payload: json!({}),
    });
    client.pump_updates(&mut f.page);

    assert_eq!(server.drain(), Vec::new());
}

#[test]
fn parent_event_is_relayed_verbatim() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new().relay_target("form"));
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(ServerUpdate::ParentEvent {
        id,
        event: "blur".to_string(),
        payload: json!({"reason": "outside-click"}),
    });
    client.pump_updates(&mut f.page);

    assert_eq!(
        server.drain(),
        vec![ClientIntent::RelayEvent {
            target: "form".to_string(),
            id,
            event: "blur".to_string(),
            payload: json!({"reason": "outside-click"}),
        }]
    );
}

#[test]
fn active_update_scrolls_the_highlighted_row_into_view() {
    let labels = ["a", "b", "c", "d", "e", "f", "g"];
    let (mut client, server, mut f) = setup(FixtureBuilder::new().labels(&labels));
    let id = client.mount(&mut f.page, f.root).unwrap();
    f.page.set_viewport_rows(f.list, 3);

    server.push(ServerUpdate::Active { id, idx: 5 });
    client.pump_updates(&mut f.page);
    assert_eq!(f.page.first_visible(f.list), 3);

    // Already visible: the window must not move.
    server.push(ServerUpdate::Active { id, idx: 4 });
    client.pump_updates(&mut f.page);
    assert_eq!(f.page.first_visible(f.list), 3);
}

#[test]
fn reset_clears_state_and_always_notifies() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();
    let t0 = Instant::now();

    server.push(select(
        id,
        vec![SelectOption::new("Berlin", "BER")],
        Mode::Single,
        Some("Berlin"),
    ));
    client.pump_updates(&mut f.page);
    let _ = f.page.take_events();

    // A search is pending when the reset lands.
    f.page.set_value(f.text_input, "bremen");
    client.handle_event(
        &f.page,
        &DomEvent::Input {
            target: f.text_input,
            text: "bremen".to_string(),
        },
        t0,
    );

    server.push(ServerUpdate::Reset { id });
    client.pump_updates(&mut f.page);
    client.tick(t0 + Duration::from_secs(1));

    assert_eq!(f.page.value(f.text_input), Some(""));
    assert_eq!(f.page.value(f.hidden_field), Some(""));
    assert_eq!(client.selection(id).map(|s| s.is_empty()), Some(true));
    assert_eq!(client.search_text(id), Some(""));
    assert_eq!(
        f.page.take_events(),
        vec![SyntheticEvent {
            target: f.hidden_field,
            bubbles: true
        }]
    );
    // The pending search died with the reset.
    assert_eq!(server.drain(), Vec::new());
}

#[test]
fn updates_for_unknown_instances_are_dropped() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(
        id + 1,
        vec![SelectOption::new("Berlin", "BER")],
        Mode::Single,
        Some("Berlin"),
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(f.page.value(f.text_input), Some(""));
    assert_eq!(client.selection(id).map(|s| s.is_empty()), Some(true));
}

#[test]
fn oversized_single_selection_is_clamped_to_one() {
    let (mut client, server, mut f) = setup(FixtureBuilder::new());
    let id = client.mount(&mut f.page, f.root).unwrap();

    server.push(select(
        id,
        vec![
            SelectOption::new("Berlin", "BER"),
            SelectOption::new("Bern", "BRN"),
        ],
        Mode::Single,
        None,
    ));
    client.pump_updates(&mut f.page);

    assert_eq!(client.selection(id).map(|s| s.len()), Some(1));
    assert_eq!(f.page.value(f.hidden_field), Some("BER"));
}
