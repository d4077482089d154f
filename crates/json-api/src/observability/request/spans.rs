//! HTTP span naming.
//!
//! Path parameters are collapsed so span names and metric labels stay
//! low-cardinality.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = route_template(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Segments that are followed by a free-form identifier.
fn parameter_after(segment: &str) -> Option<&'static str> {
    match segment {
        "product" => Some("{asin}"),
        "remove" => Some("{asin}"),
        "category" => Some("{category}"),
        _ => None,
    }
}

fn route_template(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut template = String::new();
    let mut pending: Option<&'static str> = None;

    for segment in trimmed.split('/') {
        template.push('/');

        if let Some(placeholder) = pending.take() {
            template.push_str(placeholder);
            continue;
        }

        if segment.bytes().all(|b| b.is_ascii_digit()) {
            template.push_str("{id}");
        } else if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else {
            template.push_str(segment);
            pending = parameter_after(segment);
        }
    }

    template
}
