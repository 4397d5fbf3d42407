use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::core::format::format_trimmed;
use crate::core::{Row, TableProjection};
use crate::render::escape_markup;

pub const LOADING_STATUS_TEXT: &str = "Loading…";
pub const EMPTY_STATE_TITLE: &str = "No data";
pub const EMPTY_STATE_MESSAGE: &str = "No data";
pub const ERROR_STATE_TITLE: &str = "Unable to load chart";
pub const DEFAULT_TABLE_ARIA_LABEL: &str = "Chart data";

/// Pass-through props forwarded verbatim to each collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentProps {
    pub data_table: Map<String, JsonValue>,
    pub skeleton: Map<String, JsonValue>,
    pub empty_state: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonRequest<'a> {
    /// Measured or fixed width; `None` before the first measurement.
    pub width: Option<f64>,
    pub height: f64,
    pub props: &'a Map<String, JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyStateIcon {
    Alert,
    Chart,
}

impl EmptyStateIcon {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Chart => "chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmptyStateRequest<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub icon: Option<EmptyStateIcon>,
    /// `true` for the error card, `false` for the no-data card.
    pub is_error: bool,
    pub props: &'a Map<String, JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataTableRequest<'a> {
    pub table: &'a TableProjection,
    pub rows: &'a [Row],
    pub aria_label: &'a str,
    pub props: &'a Map<String, JsonValue>,
}

/// Injected fallback UI.
///
/// Every method is optional: returning `None` (the default) hands the request
/// to the built-in minimal renderer.
pub trait FallbackComponents {
    fn render_skeleton(&self, _request: &SkeletonRequest<'_>) -> Option<String> {
        None
    }

    fn render_empty_state(&self, _request: &EmptyStateRequest<'_>) -> Option<String> {
        None
    }

    fn render_data_table(&self, _request: &DataTableRequest<'_>) -> Option<String> {
        None
    }
}

/// Collaborator set with nothing injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltInComponents;

impl FallbackComponents for BuiltInComponents {}

pub(super) fn skeleton_markup(
    components: &dyn FallbackComponents,
    request: &SkeletonRequest<'_>,
) -> String {
    components
        .render_skeleton(request)
        .unwrap_or_else(|| builtin_skeleton(request))
}

pub(super) fn empty_state_markup(
    components: &dyn FallbackComponents,
    request: &EmptyStateRequest<'_>,
) -> String {
    components
        .render_empty_state(request)
        .unwrap_or_else(|| builtin_empty_state(request))
}

pub(super) fn data_table_markup(
    components: &dyn FallbackComponents,
    request: &DataTableRequest<'_>,
) -> String {
    components
        .render_data_table(request)
        .unwrap_or_else(|| builtin_data_table(request))
}

fn builtin_skeleton(request: &SkeletonRequest<'_>) -> String {
    let width = request
        .width
        .map_or_else(|| "100%".to_owned(), |w| format!("{}px", format_trimmed(w, 2)));
    format!(
        r#"<div role="status" aria-busy="true" style="width:{width};height:{}px">{LOADING_STATUS_TEXT}</div>"#,
        format_trimmed(request.height, 2)
    )
}

fn builtin_empty_state(request: &EmptyStateRequest<'_>) -> String {
    let role = if request.is_error { "alert" } else { "status" };
    format!(
        r#"<div role="{role}"><strong>{}</strong><p>{}</p></div>"#,
        escape_markup(request.title),
        escape_markup(request.message)
    )
}

fn builtin_data_table(request: &DataTableRequest<'_>) -> String {
    let mut out = format!(
        r#"<table aria-label="{}"><thead><tr>"#,
        escape_markup(request.aria_label)
    );
    for header in request.table.headers() {
        let _ = write!(out, r#"<th scope="col">{}</th>"#, escape_markup(header));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &request.table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_markup(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}
