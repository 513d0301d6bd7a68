//! Test capture mode for deterministic logging assertions
//!
//! Installs a subscriber layer that keeps every event and every closed span
//! in memory so tests can assert on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use gqlx_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    /// Name of the span the event was emitted in, if any
    pub span: Option<String>,
    pub fields: HashMap<String, String>,
}

/// A span that has been closed, with the final values of its fields
#[derive(Clone, Debug)]
pub struct CapturedSpan {
    pub name: String,
    pub fields: HashMap<String, String>,
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

#[derive(Default)]
struct Captured {
    events: Vec<CapturedEvent>,
    spans: Vec<CapturedSpan>,
}

/// Test capture layer for collecting events and closed spans
pub struct TestCaptureLayer {
    captured: Arc<Mutex<Captured>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let layer = Self {
            captured: captured.clone(),
        };
        (layer, TestCapture { captured })
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(visitor);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(visitor) = span.extensions_mut().get_mut::<FieldVisitor>() {
                values.record(visitor);
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get(FIELD_COMPONENT).cloned(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            span: ctx.event_span(event).map(|s| s.name().to_string()),
            fields: visitor.fields,
        };

        self.captured
            .lock()
            .map(|mut c| c.events.push(captured))
            .ok();
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let fields = span
            .extensions()
            .get::<FieldVisitor>()
            .map(|v| v.fields.clone())
            .unwrap_or_default();
        let closed = CapturedSpan {
            name: span.name().to_string(),
            fields,
        };

        self.captured
            .lock()
            .map(|mut c| c.spans.push(closed))
            .ok();
    }
}

/// Handle for accessing captured events and spans in tests
#[derive(Clone)]
pub struct TestCapture {
    captured: Arc<Mutex<Captured>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.captured
            .lock()
            .map(|c| c.events.clone())
            .unwrap_or_default()
    }

    /// Spans closed so far, in close order
    pub fn closed_spans(&self) -> Vec<CapturedSpan> {
        self.captured
            .lock()
            .map(|c| c.spans.clone())
            .unwrap_or_default()
    }

    /// Events carrying `field == value`
    pub fn events_with(&self, field: &str, value: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.fields.get(field).map(String::as_str) == Some(value))
            .collect()
    }

    /// Closed spans named `name` carrying `field == value`
    pub fn closed_spans_with(&self, name: &str, field: &str, value: &str) -> Vec<CapturedSpan> {
        self.closed_spans()
            .into_iter()
            .filter(|s| s.name == name && s.fields.get(field).map(String::as_str) == Some(value))
            .collect()
    }

    /// Assert that an event exists with the given operation and event type
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        self.captured
            .lock()
            .map(|mut c| {
                c.events.clear();
                c.spans.clear();
            })
            .ok();
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Installs the capture layer as the global subscriber on first call and
/// returns the shared handle. Tests in one binary share it, so assertions
/// should filter on a field unique to the test (e.g. `request_id`).
///
/// # Example
///
/// ```
/// use gqlx_core::logging_facility::test_capture::init_test_capture;
/// use gqlx_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_op");
/// capture.assert_event_exists("doc_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
