//! Feed a scripted key sequence through the vim table and print what the
//! editor was asked to do.
//!
//! Run with `RUST_LOG=modechart=debug cargo run --example vim_keys` to see
//! the dispatcher's decisions.

use modechart::keys::{
    run_dispatcher, DeadlineScheduler, Dispatch, DispatcherConfig, Editor, KeyDispatcher,
    KeyEvent, KeyTable, ManualScheduler,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    fn note(&mut self, what: impl Into<String>) {
        self.lines.push(what.into());
    }
}

impl Editor for Transcript {
    fn move_down(&mut self, _event: &KeyEvent) {
        self.note("cursor down");
    }
    fn move_word_forward(&mut self, _event: &KeyEvent) {
        self.note("cursor to next word");
    }
    fn start_of_document(&mut self, _event: &KeyEvent) {
        self.note("cursor to top");
    }
    fn end_of_document(&mut self, _event: &KeyEvent) {
        self.note("cursor to bottom");
    }
    fn delete_line(&mut self, _event: &KeyEvent) {
        self.note("delete line");
    }
    fn yank_word(&mut self, _event: &KeyEvent) {
        self.note("yank word");
    }
    fn insert_char(&mut self, event: &KeyEvent) {
        self.note(format!("insert {:?}", event.key));
    }
    fn select_right(&mut self, _event: &KeyEvent) {
        self.note("extend selection right");
    }
    fn command_changed(&mut self, buffer: &str) {
        self.note(format!("command line: :{buffer}"));
    }
    fn execute_command(&mut self, command: &str) {
        self.note(format!("execute :{command}"));
    }
}

fn scripted() {
    let mut keys = KeyDispatcher::new(Arc::new(KeyTable::vim()), Transcript::default(), ManualScheduler::new());

    for key in ["g", "g", "j", "d", "d", "y", "w", "i", "h", "i", "Escape", "v", "l", "Escape"] {
        match keys.handle_event(&KeyEvent::new(key)) {
            Dispatch::Entered(state) => println!("{key:>8} -> {state}"),
            Dispatch::Performed(action) => println!("{key:>8} => {action}"),
            Dispatch::Unmatched { state, key } => println!("{key:>8} ?? (unbound in {state})"),
        }
    }

    // A prefix left alone for a second is abandoned.
    keys.handle_event(&KeyEvent::new("d"));
    keys.advance(Duration::from_millis(1000));
    println!("after pause: {}", keys.state());

    for key in [":", "w", "q", "Enter", "Escape"] {
        keys.handle_event(&KeyEvent::new(key));
    }

    println!();
    for line in &keys.editor().lines {
        println!("  {line}");
    }
}

async fn live() {
    let config = DispatcherConfig::default().with_chord_timeout(Duration::from_millis(300));
    let dispatcher = KeyDispatcher::new(Arc::new(KeyTable::vim()), Transcript::default(), DeadlineScheduler::new())
        .with_config(config);
    let (tx, rx) = mpsc::channel(8);
    let driver = tokio::spawn(run_dispatcher(dispatcher, rx));

    for (key, pause_ms) in [("g", 100), ("g", 500), ("g", 400), ("G", 0)] {
        if tx.send(KeyEvent::new(key)).await.is_err() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(pause_ms)).await;
    }
    drop(tx);

    match driver.await {
        Ok(dispatcher) => {
            println!("\nlive session ended in {}", dispatcher.state());
            for line in &dispatcher.editor().lines {
                println!("  {line}");
            }
        }
        Err(err) => eprintln!("dispatcher task failed: {err}"),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    scripted();
    live().await;
}
