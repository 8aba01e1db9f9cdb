// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State transitions are reported through `tracing`.

mod common;

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use common::*;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Transition {
    from: String,
    to: String,
}

struct TransitionVisitor(Transition, bool);

impl Visit for TransitionVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        match field.name() {
            "from" => self.0.from = format!("{value:?}"),
            "to" => self.0.to = format!("{value:?}"),
            "message" => self.1 = format!("{value:?}") == "tooltip state",
            _ => {}
        }
    }
}

#[derive(Clone, Default)]
struct TransitionLog(Arc<Mutex<Vec<Transition>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for TransitionLog {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = TransitionVisitor(Transition::default(), false);
        event.record(&mut visitor);
        if visitor.1 {
            self.0.lock().unwrap().push(visitor.0);
        }
    }
}

fn transition(from: &str, to: &str) -> Transition {
    Transition {
        from: from.into(),
        to: to.into(),
    }
}

#[test]
fn full_cycle_is_logged() {
    let log = TransitionLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());

    tracing::subscriber::with_default(subscriber, || {
        let (owners, mut m) = (owners(), manager());
        m.handle_event(0, &move_to(SAVE, 10.0, 10.0), &owners);
        m.poll(OPEN_DELAY, &owners);
        m.hide_tooltip(OPEN_DELAY, &owners);
        m.poll(OPEN_DELAY + CLOSE_TIMEOUT + QUICK_OPEN_TIMEOUT, &owners);
    });

    assert_eq!(
        *log.0.lock().unwrap(),
        [
            transition("Idle", "Opening"),
            transition("Opening", "Showing"),
            transition("Showing", "Closing"),
            transition("Closing", "QuickReopenWindow"),
            transition("QuickReopenWindow", "Idle"),
        ]
    );
}

#[test]
fn repeated_requests_log_once() {
    let log = TransitionLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());

    tracing::subscriber::with_default(subscriber, || {
        let (owners, mut m) = (owners(), manager());
        for t in 0..5 {
            m.handle_event(t * 10, &move_to(SAVE, 10.0, 10.0), &owners);
        }
    });

    assert_eq!(*log.0.lock().unwrap(), [transition("Idle", "Opening")]);
}
