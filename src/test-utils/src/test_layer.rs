// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Captures `tracing` events, so tests can assert on what was logged.
//!
//! # Example
//!
//! ```rust
//! use oci_test_utils::test_layer::TestLayer;
//!
//! let (_guard, events) = TestLayer::initialize();
//! tracing::warn!(field = "lifecycle_state", "unknown value");
//! let captured = events.take();
//! assert_eq!(captured.len(), 1);
//! assert_eq!(captured[0].message, "unknown value");
//! assert_eq!(captured[0].attributes["field"], "lifecycle_state");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Event, Level, Subscriber, field};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// A captured tracing event with its attributes.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    /// The formatted message, empty if the event has none.
    pub message: String,
    /// The remaining fields, rendered as strings.
    pub attributes: HashMap<String, String>,
}

/// Converts event fields to strings.
struct TestVisitor<'a> {
    message: &'a mut String,
    attributes: &'a mut HashMap<String, String>,
}

impl TestVisitor<'_> {
    fn insert(&mut self, field: &field::Field, value: String) {
        if field.name() == "message" {
            *self.message = value;
        } else {
            self.attributes.insert(field.name().to_string(), value);
        }
    }
}

impl field::Visit for TestVisitor<'_> {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_i64(&mut self, field: &field::Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &field::Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &field::Field, value: bool) {
        self.insert(field, value.to_string());
    }
}

/// The events captured by a [TestLayer].
#[derive(Clone, Debug, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<CapturedEvent>>>);

impl CapturedEvents {
    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes and returns all the captured events.
    pub fn take(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the captured `WARN` events, leaving them in place.
    pub fn warnings(&self) -> Vec<CapturedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.level == Level::WARN)
            .cloned()
            .collect()
    }
}

/// A tracing layer recording every event into a [CapturedEvents] log.
///
/// The layer is installed as the default subscriber for the current thread,
/// which isolates tests running in parallel.
pub struct TestLayer {
    events: CapturedEvents,
}

impl TestLayer {
    /// Installs the layer for the current thread.
    ///
    /// Events are captured while the returned guard is in scope.
    pub fn initialize() -> (tracing::subscriber::DefaultGuard, CapturedEvents) {
        let events = CapturedEvents::default();
        let layer = TestLayer {
            events: events.clone(),
        };
        let subscriber = tracing_subscriber::registry().with(layer);
        (tracing::subscriber::set_default(subscriber), events)
    }
}

impl<S: Subscriber> Layer<S> for TestLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        let mut attributes = HashMap::new();
        event.record(&mut TestVisitor {
            message: &mut message,
            attributes: &mut attributes,
        });
        let metadata = event.metadata();
        self.events.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
            attributes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_fields() {
        let (_guard, events) = TestLayer::initialize();
        tracing::warn!(model = "Vcn", count = 3_i64, flag = true, "first");
        tracing::info!(value = ?Some("x"), "second");

        let captured = events.take();
        assert_eq!(captured.len(), 2, "{captured:?}");
        assert_eq!(captured[0].level, Level::WARN);
        assert_eq!(captured[0].message, "first");
        assert_eq!(captured[0].attributes["model"], "Vcn");
        assert_eq!(captured[0].attributes["count"], "3");
        assert_eq!(captured[0].attributes["flag"], "true");
        assert_eq!(captured[1].attributes["value"], r#"Some("x")"#);
        assert!(events.take().is_empty());
    }

    #[test]
    fn warnings_only() {
        let (_guard, events) = TestLayer::initialize();
        tracing::info!("ignored");
        tracing::warn!("kept");
        let warnings = events.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "kept");
        assert_eq!(events.take().len(), 2);
    }

    #[test]
    fn guard_scope() {
        let events = {
            let (_guard, events) = TestLayer::initialize();
            tracing::warn!("inside");
            events
        };
        tracing::warn!("outside");
        let captured = events.take();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message, "inside");
    }
}
