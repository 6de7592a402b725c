//! JSON log lines in the cloud logging schema.
//!
//! One object per event on the configured writer. Request spans created by
//! `TraceSpan` contribute the trace, span id and `httpRequest` fields, so
//! every line logged while handling a request can be correlated with it.

use std::fmt;
use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

pub const APP_NAME: &str = "flashcards";

pub struct CloudLogLayer<W> {
    project: String,
    make_writer: W,
}

impl<W> CloudLogLayer<W> {
    pub fn new(project: impl Into<String>, make_writer: W) -> Self {
        Self {
            project: project.into(),
            make_writer,
        }
    }
}

/// Correlation fields captured from a span.
#[derive(Debug, Default, Clone)]
struct SpanFields {
    trace_id: Option<String>,
    span_id: Option<String>,
    method: Option<String>,
    path: Option<String>,
}

impl SpanFields {
    fn fill_from(&mut self, other: &SpanFields) {
        for (mine, theirs) in [
            (&mut self.trace_id, &other.trace_id),
            (&mut self.span_id, &other.span_id),
            (&mut self.method, &other.method),
            (&mut self.path, &other.path),
        ] {
            if theirs.is_some() {
                mine.clone_from(theirs);
            }
        }
    }

    fn set(&mut self, field: &Field, value: String) {
        match field.name() {
            "trace_id" => self.trace_id = Some(value),
            "span_id" => self.span_id = Some(value),
            "method" => self.method = Some(value),
            "path" => self.path = Some(value),
            _ => {}
        }
    }
}

impl Visit for SpanFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field, format!("{value:?}"));
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    extra: Map<String, Value>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extra.insert(field.name().to_string(), value.into());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.extra.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.extra.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.extra.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.extra.insert(field.name().to_string(), rendered.into());
        }
    }
}

#[derive(Serialize)]
struct HttpRequestLog<'a> {
    #[serde(rename = "requestMethod", skip_serializing_if = "Option::is_none")]
    request_method: Option<&'a str>,
    #[serde(rename = "requestUrl", skip_serializing_if = "Option::is_none")]
    request_url: Option<&'a str>,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    severity: &'static str,
    timestamp: String,
    message: &'a str,
    #[serde(rename = "logging.googleapis.com/labels")]
    labels: Map<String, Value>,
    #[serde(
        rename = "logging.googleapis.com/trace",
        skip_serializing_if = "Option::is_none"
    )]
    trace: Option<String>,
    #[serde(
        rename = "logging.googleapis.com/spanId",
        skip_serializing_if = "Option::is_none"
    )]
    span_id: Option<&'a str>,
    #[serde(rename = "httpRequest", skip_serializing_if = "Option::is_none")]
    http_request: Option<HttpRequestLog<'a>>,
    #[serde(flatten)]
    fields: &'a Map<String, Value>,
}

pub fn severity(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG | Level::TRACE => "DEBUG",
    }
}

impl<S, W> Layer<S> for CloudLogLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(fields) = extensions.get_mut::<SpanFields>() {
            values.record(fields);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        let mut request = SpanFields::default();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                    request.fill_from(span_fields);
                }
            }
        }

        let http_request = (request.method.is_some() || request.path.is_some()).then(|| {
            HttpRequestLog {
                request_method: request.method.as_deref(),
                request_url: request.path.as_deref(),
            }
        });

        let mut labels = Map::new();
        labels.insert("appname".to_string(), APP_NAME.into());

        let entry = LogEntry {
            severity: severity(event.metadata().level()),
            timestamp: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            message: &fields.message,
            labels,
            trace: request
                .trace_id
                .as_deref()
                .map(|trace| format!("projects/{}/traces/{trace}", self.project)),
            span_id: request.span_id.as_deref(),
            http_request,
            fields: &fields.extra,
        };

        if let Ok(mut line) = serde_json::to_vec(&entry) {
            line.push(b'\n');
            let mut writer = self.make_writer.make_writer();
            // Nowhere left to report a failed log write.
            let _ = writer.write_all(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use flashcards_test_support::CapturedLogs;
    use tracing::{error, info, info_span, warn};
    use tracing_subscriber::prelude::*;

    use super::*;

    fn lines(logs: &CapturedLogs) -> Vec<Value> {
        logs.contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn writes_one_json_object_per_event() {
        let logs = CapturedLogs::new();
        let subscriber =
            tracing_subscriber::registry().with(CloudLogLayer::new("proj", logs.clone()));

        tracing::subscriber::with_default(subscriber, || {
            info!(deck_id = "D1", cards = 3_u64, "deck shown");
            warn!("careful");
            error!("broken");
        });

        let entries = lines(&logs);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["severity"], "INFO");
        assert_eq!(entries[0]["message"], "deck shown");
        assert_eq!(entries[0]["deck_id"], "D1");
        assert_eq!(entries[0]["cards"], 3);
        assert_eq!(entries[0]["logging.googleapis.com/labels"]["appname"], "flashcards");
        assert!(entries[0].get("logging.googleapis.com/trace").is_none());
        assert_eq!(entries[1]["severity"], "WARNING");
        assert_eq!(entries[2]["severity"], "ERROR");
    }

    #[test]
    fn request_span_fields_are_attached() {
        let logs = CapturedLogs::new();
        let subscriber =
            tracing_subscriber::registry().with(CloudLogLayer::new("proj", logs.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!(
                "request",
                trace_id = %"abc123",
                span_id = %"7",
                method = %"GET",
                path = %"/deck/TEST-CODE"
            );
            let _entered = span.enter();
            info!("inside request");
        });

        let entry = &lines(&logs)[0];
        assert_eq!(
            entry["logging.googleapis.com/trace"],
            "projects/proj/traces/abc123"
        );
        assert_eq!(entry["logging.googleapis.com/spanId"], "7");
        assert_eq!(entry["httpRequest"]["requestMethod"], "GET");
        assert_eq!(entry["httpRequest"]["requestUrl"], "/deck/TEST-CODE");
    }

    #[test]
    fn severities_map_to_cloud_names() {
        assert_eq!(severity(&Level::TRACE), "DEBUG");
        assert_eq!(severity(&Level::DEBUG), "DEBUG");
        assert_eq!(severity(&Level::WARN), "WARNING");
    }
}
