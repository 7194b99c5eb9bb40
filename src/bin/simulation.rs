//! Demo: a random population of searchers, inserters and deleters
//! hammering one shared list forever.
//!
//! Usage: `simulation [--json] [config.json]`. The optional config file
//! is a JSON rendition of `SimConfig`; `--json` switches the per-action
//! output from text lines to one JSON record per event. Diagnostics go
//! through `tracing`, filtered by `RUST_LOG`. Runs until killed.

use anyhow::{Context, Result};
use lamplist::{channel_sink, Payload, ProtocolEvent, SimConfig, Stage, Supervisor};
use std::sync::Arc;
use std::{env, fs, thread};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut json = false;
    let mut config = SimConfig::default();
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            let text =
                fs::read_to_string(&arg).with_context(|| format!("reading config file {arg}"))?;
            config = serde_json::from_str(&text).with_context(|| format!("parsing {arg}"))?;
        }
    }

    let (sink, events) = channel_sink();
    // Single consumer serializes all actor output; the actors themselves
    // never print.
    let printer = thread::spawn(move || {
        for event in events {
            if json {
                if let Ok(line) = serde_json::to_string(&event) {
                    println!("{line}");
                }
            } else {
                print_event(&event);
            }
        }
    });

    let supervisor = Supervisor::spawn(config, Arc::new(sink)).context("spawning actors")?;
    supervisor.join();
    let _ = printer.join();
    Ok(())
}

fn print_event(event: &ProtocolEvent) {
    match event {
        ProtocolEvent::Population {
            searchers,
            inserters,
            deleters,
        } => {
            println!("Searchers: {searchers}\tInserters: {inserters}\tDeleters: {deleters}");
            println!("Actors will begin shortly...");
        }
        ProtocolEvent::Transition {
            role,
            actor,
            stage,
            payload,
        } => {
            let label = role.label();
            match (stage, payload) {
                (Stage::Waiting, _) => {
                    println!("[{label}-WAIT] actor {actor} is checking for competing roles");
                }
                (Stage::Active, Some(Payload::Snapshot(values))) => {
                    println!("[{label}-ACTION] actor {actor} searched the list: {values:?}");
                }
                (Stage::Active, Some(Payload::Inserted(value))) => {
                    println!("[{label}-ACTION] actor {actor} inserted {value} into the list");
                }
                (Stage::Active, Some(Payload::Removed(Some(value)))) => {
                    println!("[{label}-ACTION] actor {actor} deleted {value} from the end of the list");
                }
                (Stage::Active, Some(Payload::Removed(None))) => {
                    println!("[{label}-ACTION] actor {actor} found nothing to delete");
                }
                (Stage::Active, None) | (Stage::Idle, _) => {}
            }
        }
    }
}
