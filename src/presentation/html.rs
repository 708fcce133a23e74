//! Small HTML building blocks shared by every page.

use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f5f7; color: #1f2933; }
header { background: #1f2933; color: #fff; padding: 1rem 2rem; }
header a { color: #9fb3c8; margin-right: 1rem; text-decoration: none; }
main { padding: 1.5rem 2rem; max-width: 1100px; }
section { background: #fff; border-radius: 6px; padding: 1rem 1.5rem; margin-bottom: 1.5rem; }
.cards { display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }
.card { background: #fff; border-radius: 6px; padding: 1rem 1.5rem; min-width: 180px; }
.card .label { font-size: .85rem; color: #52606d; }
.card .value { font-size: 1.4rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: .4rem .6rem; border-bottom: 1px solid #e4e7eb; }
.bar-row { display: flex; align-items: center; gap: .5rem; margin: .25rem 0; }
.bar-label { width: 160px; font-size: .9rem; }
.bar-track { flex: 1; background: #e4e7eb; border-radius: 3px; }
.bar { background: #3f7fbf; height: 14px; border-radius: 3px; }
.bar-value { width: 110px; text-align: right; font-size: .9rem; }
.tag { padding: .1rem .5rem; border-radius: 10px; font-size: .8rem; }
.tag-high { background: #fdd; color: #900; }
.tag-medium { background: #fff3c4; color: #8d6b00; }
.tag-low { background: #e3f9e5; color: #1f6e2b; }
.notice { background: #e3f9e5; padding: .6rem 1rem; border-radius: 4px; }
.error { background: #fdd; padding: .6rem 1rem; border-radius: 4px; }
.tabs a { margin-right: .8rem; }
.tabs a.active { font-weight: 700; }
"#;

/// Escape text for use in element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap page content in the shared document shell.
pub fn page(title: &str, subtitle: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head><body>\
         <header><h1>{title}</h1><p>{subtitle}</p><nav>\
         <a href=\"/\">Dashboard</a>\
         <a href=\"/analytics/descriptive\">Descriptive</a>\
         <a href=\"/analytics/predictive\">Predictive</a>\
         <a href=\"/analytics/prescriptive\">Prescriptive</a>\
         <a href=\"/database\">Database</a></nav></header>\
         <main>{body}</main></body></html>",
        title = escape(title),
        subtitle = escape(subtitle),
    )
}

/// Currency amount with two decimals.
pub fn money(amount: f64) -> String {
    format!("₱{:.2}", amount)
}

/// Number without a trailing `.0` when it is whole.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

pub fn cards(items: &[(&str, String)]) -> String {
    let mut out = String::from("<div class=\"cards\">");
    for (label, value) in items {
        let _ = write!(
            out,
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            escape(label),
            escape(value)
        );
    }
    out.push_str("</div>");
    out
}

/// A titled panel.
pub fn section(title: &str, description: &str, content: &str) -> String {
    format!(
        "<section><h2>{}</h2><p>{}</p>{}</section>",
        escape(title),
        escape(description),
        content
    )
}

/// Horizontal bar chart; bar widths are relative to the largest value.
pub fn bar_chart(rows: &[(String, f64)], format_value: fn(f64) -> String) -> String {
    if rows.is_empty() {
        return "<p>No data.</p>".to_string();
    }
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let mut out = String::from("<div class=\"chart\">");
    for (label, value) in rows {
        let width = if max > 0.0 { (value / max * 100.0).max(0.0) } else { 0.0 };
        let _ = write!(
            out,
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <div class=\"bar-track\"><div class=\"bar\" style=\"width:{:.1}%\"></div></div>\
             <span class=\"bar-value\">{}</span></div>",
            escape(label),
            width,
            escape(&format_value(*value))
        );
    }
    out.push_str("</div>");
    out
}

/// A table whose cells are already rendered HTML.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "<p>Nothing to show.</p>".to_string();
    }
    let mut out = String::from("<table><thead><tr>");
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", cell);
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Colored label for High/Medium/Low style values.
pub fn tag(level: &str) -> String {
    let class = match level {
        "High" => "tag-high",
        "Medium" => "tag-medium",
        _ => "tag-low",
    };
    format!("<span class=\"tag {}\">{}</span>", class, escape(level))
}
