//! Recording layer for asserting spans and events in tests.
//!
//! Install a [`RecordingLayer`] on a registry (or use [`capture`]) and
//! inspect the closed spans and emitted events afterwards. Every field value
//! is stored as text: strings verbatim, everything else through `Debug`.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span,
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    registry::{LookupSpan, Registry},
};

/// Captures closed spans and emitted events for later assertions.
///
/// Clones share the same storage, so a clone can be handed to the subscriber
/// while the original is kept for inspection.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use rgg_test_support::tracing::RecordingLayer;
    ///
    /// assert!(RecordingLayer::default().spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Closed spans called `name`.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        self.spans()
            .into_iter()
            .filter(|span| span.name == name)
            .collect()
    }

    /// Events whose `message` field equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| event.field("message") == Some(message))
            .collect()
    }
}

/// Runs `f` with a fresh [`RecordingLayer`] installed as the thread's default
/// subscriber and returns its result together with the layer.
///
/// Only spans and events produced on the calling thread are captured.
///
/// # Examples
/// ```
/// use rgg_test_support::tracing::capture;
///
/// let ((), layer) = capture(|| {
///     let _span = tracing::info_span!("demo.span", answer = 42).entered();
///     tracing::info!(flag = true, "inside");
/// });
/// let span = &layer.spans_named("demo.span")[0];
/// assert_eq!(span.field("answer"), Some("42"));
/// assert_eq!(layer.events_with_message("inside")[0].field("flag"), Some("true"));
/// ```
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, layer)
}

/// A closed span with its recorded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// The textual value of `name`, if recorded.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event with its level, target and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Event fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// The textual value of `name`, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct OpenSpan {
    name: &'static str,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut open = OpenSpan {
            name: attrs.metadata().name(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldText(&mut open.fields));
        span.extensions_mut().insert(open);
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut FieldText(&mut open.fields));
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SpanRecord {
                name: open.name.to_owned(),
                fields: open.fields,
            });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldText(&mut fields));
        let metadata = event.metadata();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            });
    }
}

struct FieldText<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldText<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_fields_include_later_records() {
        let ((), layer) = capture(|| {
            let span = tracing::info_span!("outer", early = 1, late = tracing::field::Empty);
            span.record("late", "filled");
        });
        let spans = layer.spans_named("outer");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].field("early"), Some("1"));
        assert_eq!(spans[0].field("late"), Some("filled"));
    }

    #[test]
    fn events_keep_level_and_message() {
        let ((), layer) = capture(|| tracing::warn!(ratio = 0.5, "half way"));
        let events = layer.events_with_message("half way");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].field("ratio"), Some("0.5"));
    }

    #[test]
    fn capture_is_scoped_to_the_closure() {
        let ((), layer) = capture(|| ());
        tracing::info!("outside");
        assert!(layer.events().is_empty());
    }
}
