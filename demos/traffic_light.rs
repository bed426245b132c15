//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic machine driven through
//! generated helper methods.
//!
//! Key concepts:
//! - Cyclic transitions on a single event
//! - Integer state values stored on the host
//! - Accessors generated by `machine_helpers!`
//!
//! Run with: cargo run --example traffic_light

use serde_json::{json, Value};
use statehook::builder::MachineBuilder;
use statehook::{
    machine_helpers, Callback, EventOptions, Machine, StateOptions, StateValue, Stateful,
    TransitionOptions, UnknownMethod,
};
use std::sync::OnceLock;

struct TrafficLight {
    state: Value,
    cycles: u32,
}

impl Stateful for TrafficLight {
    type Error = UnknownMethod;

    fn read_state(&self, _attribute: &str) -> Option<StateValue> {
        Some(self.state.clone())
    }

    fn write_state(&mut self, _attribute: &str, value: StateValue) {
        self.state = value;
    }
}

fn light_machine() -> &'static Machine<TrafficLight> {
    static MACHINE: OnceLock<Machine<TrafficLight>> = OnceLock::new();
    MACHINE.get_or_init(|| {
        let announce = |text: &'static str| {
            Callback::new(move |_: &mut TrafficLight, _: &[Value]| println!("  {text}"))
        };

        MachineBuilder::new()
            .state_with("red", StateOptions::new().value(0).on_enter(announce("Stop")))
            .state_with("green", StateOptions::new().value(1).on_enter(announce("Go!")))
            .state_with("yellow", StateOptions::new().value(2).on_enter(announce("Caution")))
            .event("next", EventOptions::new(), |e| {
                e.transition("red", "green", TransitionOptions::new())
                    .transition("green", "yellow", TransitionOptions::new())
                    .transition(
                        "yellow",
                        "red",
                        TransitionOptions::new().on_transition(Callback::new(
                            |light: &mut TrafficLight, _: &[Value]| light.cycles += 1,
                        )),
                    );
            })
            .build()
            .expect("traffic light machine is valid")
    })
}

machine_helpers! {
    impl TrafficLight => light_machine();
    states {
        is_red => "red",
        is_green => "green",
        is_yellow => "yellow",
    }
    events {
        "next" => can_advance, advance, advance_and_save;
    }
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut light = TrafficLight {
        state: json!(0),
        cycles: 0,
    };
    println!("Initial state value: {}", light.state);
    println!("Red? {}\n", light.is_red());

    println!("Transition sequence:");
    for _ in 0..6 {
        light.advance(&[]).expect("no host methods are involved");
    }

    println!("\nCompleted cycles: {}", light.cycles);
    println!("Green? {}  Yellow? {}", light.is_green(), light.is_yellow());
    println!("Can advance? {}", light.can_advance(&[]).unwrap_or(false));

    println!("\n=== Example Complete ===");
}
