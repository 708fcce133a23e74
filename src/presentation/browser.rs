//! Record browser: tabbed tables with a create form and per-row delete.

use std::fmt::{self, Write};

use serde_json::{Number, Value};

use super::html::{escape, page};
use crate::collection::{record_id, Collection, Record};

/// Outcome of the last form post, carried back through the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Created(i64),
    Deleted(i64),
    Failed(String),
}

/// Why a submitted create form was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Every field was blank.
    Empty,
    /// A numeric field held something else.
    NotANumber(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Empty => f.write_str("Fill in at least one field."),
            FormError::NotANumber(key) => write!(f, "{} must be a number", key),
        }
    }
}

impl std::error::Error for FormError {}

/// Fields offered by the create form, taken from the seed record: every key
/// except `id`, flagged numeric when the seed value is a number.
pub fn form_fields(seed: &Record) -> Vec<(&str, bool)> {
    seed.iter()
        .filter(|(key, _)| key.as_str() != "id")
        .map(|(key, value)| (key.as_str(), value.is_number()))
        .collect()
}

/// Build a record from submitted form values. Blank values are omitted,
/// fields unknown to the seed are ignored, numeric fields must parse. At least
/// one field must be filled in.
pub fn record_from_form(
    seed: &Record,
    submitted: &[(String, String)],
) -> Result<Record, FormError> {
    let mut record = Record::new();
    for (key, numeric) in form_fields(seed) {
        let Some((_, raw)) = submitted.iter().find(|(name, _)| name == key) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let value = if numeric {
            parse_number(raw).ok_or_else(|| FormError::NotANumber(key.to_string()))?
        } else {
            Value::String(raw.to_string())
        };
        record.insert(key.to_string(), value);
    }
    if record.is_empty() {
        return Err(FormError::Empty);
    }
    Ok(record)
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s),
        Value::Null => String::new(),
        other => escape(&other.to_string()),
    }
}

/// Render the browser for one collection.
pub fn render(
    active: Collection,
    records: &[Record],
    seed: Option<&Record>,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::from("<div class=\"tabs\">");
    for collection in Collection::ALL {
        let class = if collection == active { " class=\"active\"" } else { "" };
        let _ = write!(
            body,
            "<a href=\"/database?collection={}\"{}>{}</a>",
            collection.name(),
            class,
            collection.label()
        );
    }
    body.push_str("</div>");

    match flash {
        Some(Flash::Created(id)) => {
            let _ = write!(body, "<p class=\"notice\">Record {} created.</p>", id);
        }
        Some(Flash::Deleted(id)) => {
            let _ = write!(body, "<p class=\"notice\">Record {} deleted.</p>", id);
        }
        Some(Flash::Failed(message)) => {
            let _ = write!(body, "<p class=\"error\">{}</p>", escape(message));
        }
        None => {}
    }

    let _ = write!(
        body,
        "<section><h2>{} ({})</h2>",
        active.label(),
        records.len()
    );
    match records.first() {
        None => body.push_str("<p>No records yet.</p>"),
        Some(first) => {
            let headers: Vec<&String> = first.keys().collect();
            body.push_str("<table><thead><tr>");
            for header in &headers {
                let _ = write!(body, "<th>{}</th>", escape(header));
            }
            body.push_str("<th></th></tr></thead><tbody>");
            for record in records {
                body.push_str("<tr>");
                for header in &headers {
                    let value = record.get(header.as_str()).unwrap_or(&Value::Null);
                    let _ = write!(body, "<td>{}</td>", cell(value));
                }
                match record_id(record) {
                    Some(id) => {
                        let _ = write!(
                            body,
                            "<td><form method=\"post\" action=\"/database/{}/{}/delete\">\
                             <button type=\"submit\">Delete</button></form></td>",
                            active.name(),
                            id
                        );
                    }
                    None => body.push_str("<td></td>"),
                }
                body.push_str("</tr>");
            }
            body.push_str("</tbody></table>");
        }
    }
    body.push_str("</section>");

    body.push_str("<section><h2>Add Record</h2>");
    match seed {
        None => body.push_str(
            "<p class=\"error\">No sample data available for this table, please add a record via JSON.</p>",
        ),
        Some(seed) => {
            let _ = write!(
                body,
                "<form method=\"post\" action=\"/database/{}\">",
                active.name()
            );
            for (key, numeric) in form_fields(seed) {
                let _ = write!(
                    body,
                    "<p><label>{key}<br><input name=\"{key}\" type=\"{kind}\"{step}></label></p>",
                    key = escape(key),
                    kind = if numeric { "number" } else { "text" },
                    step = if numeric { " step=\"any\"" } else { "" },
                );
            }
            body.push_str("<button type=\"submit\">Create</button></form>");
        }
    }
    body.push_str("</section>");

    page(
        "Database",
        "Browse and edit the records behind the dashboard",
        &body,
    )
}
