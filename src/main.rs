use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use bus::{ClientIntent, ServerUpdate};
use client::Client;
use core_types::{Mode, SelectOption, Selection};
use dom::{DomEvent, Node, NodeId, Page};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const CITIES: &[(&str, &str)] = &[
    ("Berlin", "BER"),
    ("Bergen", "BGO"),
    ("Bern", "BRN"),
    ("Bremen", "BRE"),
    ("Brussels", "BRU"),
];

/// In-process stand-in for the server-side component: filters a fixed dataset
/// and answers with authoritative selection updates.
fn start_demo_server(intent_rx: Receiver<ClientIntent>, update_tx: Sender<ServerUpdate>) {
    thread::spawn(move || {
        let mut results: Vec<SelectOption> = Vec::new();
        while let Ok(intent) = intent_rx.recv() {
            match intent {
                ClientIntent::Change { text, .. } => {
                    let query = text.to_lowercase();
                    results = CITIES
                        .iter()
                        .filter(|(label, _)| label.to_lowercase().starts_with(&query))
                        .map(|(label, value)| SelectOption::new(*label, *value))
                        .collect();
                    log::info!(target: "demo.server", "search {text:?}: {} options", results.len());
                }
                ClientIntent::OptionsClear { .. } => {
                    results.clear();
                    log::info!(target: "demo.server", "options cleared");
                }
                ClientIntent::OptionClick { id, idx } => {
                    let Some(option) = results.get(idx) else {
                        continue;
                    };
                    let _ = update_tx.send(ServerUpdate::Select {
                        id,
                        selection: Selection::from(vec![option.clone()]),
                        mode: Mode::Single,
                        current_text: Some(option.label.clone()),
                        focus: true,
                        input_event: true,
                        parent_event: None,
                    });
                }
                ClientIntent::KeyDown { id, key } if key == "Escape" => {
                    let _ = update_tx.send(ServerUpdate::Reset { id });
                }
                other => {
                    log::debug!(target: "demo.server", "ignored intent {other:?}");
                }
            }
        }
    });
}

const ROOT: NodeId = NodeId(1);
const TEXT_INPUT: NodeId = NodeId(2);
const CLEAR_BUTTON: NodeId = NodeId(3);
const HIDDEN_FIELD: NodeId = NodeId(4);
const LIST: NodeId = NodeId(5);

fn demo_page() -> Page {
    let rows = CITIES
        .iter()
        .enumerate()
        .map(|(i, (label, _))| {
            Node::element(
                NodeId(10 + i as u32),
                "li",
                vec![("data-idx".to_string(), Some(i.to_string()))],
                vec![Node::text(NodeId(20 + i as u32), *label)],
            )
        })
        .collect();

    Page::new(Node::element(
        ROOT,
        "div",
        vec![
            ("data-field".to_string(), Some("city".to_string())),
            ("data-debounce".to_string(), Some("100".to_string())),
            ("data-update-min-len".to_string(), Some("3".to_string())),
        ],
        vec![
            Node::element(TEXT_INPUT, "input", Vec::new(), Vec::new()),
            Node::element(
                CLEAR_BUTTON,
                "button",
                vec![("data-clear".to_string(), None)],
                Vec::new(),
            ),
            Node::element(
                HIDDEN_FIELD,
                "input",
                vec![
                    ("type".to_string(), Some("hidden".to_string())),
                    ("name".to_string(), Some("city".to_string())),
                ],
                Vec::new(),
            ),
            Node::element(LIST, "ul", Vec::new(), rows),
        ],
    ))
}

fn type_text(client: &mut Client, page: &mut Page, text: &str, now: Instant) {
    page.set_value(TEXT_INPUT, text);
    client.handle_event(
        page,
        &DomEvent::Input {
            target: TEXT_INPUT,
            text: text.to_string(),
        },
        now,
    );
}

fn settle(client: &mut Client, page: &mut Page) {
    // Give the server thread a moment, then flush debounce and inbound queues.
    thread::sleep(Duration::from_millis(150));
    client.tick(Instant::now());
    thread::sleep(Duration::from_millis(50));
    client.pump_updates(page);
}

fn report(page: &Page, stage: &str) {
    println!(
        "[{stage}] text={:?} hidden={:?}",
        page.value(TEXT_INPUT).unwrap_or(""),
        page.value(HIDDEN_FIELD).unwrap_or(""),
    );
}

fn main() {
    env_logger::init();

    let (bus, endpoint) = bus::channel();
    start_demo_server(endpoint.intent_rx, endpoint.update_tx);

    let mut page = demo_page();
    let mut client = Client::new(bus);
    let id = match client.mount(&mut page, ROOT) {
        Ok(id) => id,
        Err(e) => {
            log::error!(target: "demo", "mount failed: {e:?}");
            return;
        }
    };
    println!("mounted widget {id}");

    // Type a query, let the debounce settle, pick the second result.
    type_text(&mut client, &mut page, "ber", Instant::now());
    settle(&mut client, &mut page);
    report(&page, "searched");

    client.handle_event(&page, &DomEvent::PointerDown { target: NodeId(11) }, Instant::now());
    settle(&mut client, &mut page);
    report(&page, "selected");

    // Escape asks the server to reset the widget.
    client.handle_event(
        &page,
        &DomEvent::KeyDown {
            target: TEXT_INPUT,
            key: "Escape".to_string(),
        },
        Instant::now(),
    );
    settle(&mut client, &mut page);
    report(&page, "reset");

    for event in page.take_events() {
        println!("synthetic input event on {:?}", event.target);
    }
}
