//! Document Workflow
//!
//! This example demonstrates guards, host methods and lifecycle callbacks
//! on a record-like host that stores its state under a custom attribute.
//!
//! Key concepts:
//! - Method guards and closure guards
//! - Named host methods as callbacks
//! - Trigger arguments reaching guards and callbacks
//! - Persist hint for `*_and_save` style triggers
//!
//! Run with: RUST_LOG=statehook=debug cargo run --example document_workflow

use serde_json::{json, Value};
use statehook::builder::MachineBuilder;
use statehook::{
    Callback, EventOptions, Guard, MachineConfig, StateOptions, StateValue, Stateful,
    TransitionOptions, UnknownMethod,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum DocumentError {
    #[error(transparent)]
    Unknown(#[from] UnknownMethod),

    #[error("Document has no content")]
    Empty,
}

#[derive(Debug)]
struct Document {
    status: Value,
    content: String,
    reviewers: Vec<String>,
    history: Vec<String>,
}

impl Stateful for Document {
    type Error = DocumentError;

    fn read_state(&self, attribute: &str) -> Option<StateValue> {
        (attribute == "status").then(|| self.status.clone())
    }

    fn write_state(&mut self, attribute: &str, value: StateValue) {
        if attribute == "status" {
            self.status = value;
        }
    }

    fn call_guard(&self, name: &str, _args: &[Value]) -> Result<bool, Self::Error> {
        match name {
            "has_content" => Ok(!self.content.is_empty()),
            _ => Err(UnknownMethod::new(name).into()),
        }
    }

    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<(), Self::Error> {
        match name {
            "stamp" => {
                if self.content.is_empty() {
                    return Err(DocumentError::Empty);
                }
                self.history.push(format!("stamped as {}", self.status));
                Ok(())
            }
            "assign_reviewer" => {
                if let Some(Value::String(reviewer)) = args.first() {
                    self.reviewers.push(reviewer.clone());
                }
                Ok(())
            }
            _ => Err(UnknownMethod::new(name).into()),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Document Workflow ===\n");

    let machine = MachineBuilder::<Document>::new()
        .options(MachineConfig::default().with_attribute("status"))
        .state_with("draft", StateOptions::new().value("D"))
        .state_with("review", StateOptions::new().value("R").on_enter("stamp"))
        .state_with("published", StateOptions::new().value("P").on_enter("stamp"))
        .state_with("archived", StateOptions::new().value("A"))
        .event(
            "submit",
            EventOptions::new().before("assign_reviewer"),
            |e| {
                e.transition(
                    "draft",
                    "review",
                    TransitionOptions::new().guards([
                        Guard::method("has_content"),
                        Guard::new(|_: &Document, args: &[Value]| {
                            matches!(args.first(), Some(Value::String(_)))
                        }),
                    ]),
                );
            },
        )
        .event("publish", EventOptions::new(), |e| {
            e.transition("review", "published", TransitionOptions::new());
        })
        .event(
            "archive",
            EventOptions::new().after(Callback::new(|doc: &mut Document, _: &[Value]| {
                doc.history.push("archived".to_string());
            })),
            |e| {
                e.transitions_from(["draft", "review", "published"], "archived", TransitionOptions::new());
            },
        )
        .build()
        .expect("document workflow is valid");

    let mut doc = Document {
        status: json!("D"),
        content: String::new(),
        reviewers: Vec::new(),
        history: Vec::new(),
    };

    let reviewer = [json!("alice")];
    println!(
        "Can submit an empty draft? {}",
        machine.can_trigger_event(&doc, "submit", &reviewer).unwrap_or(false)
    );

    doc.content = "Quarterly report".to_string();
    println!(
        "Can submit without a reviewer? {}",
        machine.can_trigger_event(&doc, "submit", &[]).unwrap_or(false)
    );

    let mut proxy = machine.bind(&mut doc);
    match proxy.trigger_event("submit", false, &reviewer) {
        Ok(fired) => println!("Submitted: {fired}"),
        Err(e) => println!("Submit failed: {e}"),
    }
    match proxy.trigger_event("publish", true, &[]) {
        Ok(fired) => println!("Published and saved: {fired}"),
        Err(e) => println!("Publish failed: {e}"),
    }
    println!("Published? {}", proxy.is_in_state("published"));

    match machine.trigger_event(&mut doc, "archive", true, &[]) {
        Ok(fired) => println!("Archived: {fired}"),
        Err(e) => println!("Archive failed: {e}"),
    }

    println!("\nFinal status value: {}", doc.status);
    println!("Reviewers: {:?}", doc.reviewers);
    println!("History: {:?}", doc.history);

    println!("\n=== Example Complete ===");
}
