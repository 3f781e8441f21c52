use serde_json::Value;

use super::{chunk, sample_rows, text_field};
use crate::loader::{Resource, SectionState};
use crate::render::{html_escape, reveal_open};
use crate::reveal::{Direction, MotionContext, RevealConfig};

/// Names per panel.
pub const PANEL_SIZE: usize = 12;
/// Rows shown in every panel, resampled from the panel's names.
pub const PANEL_ROWS: usize = 12;

pub fn resource() -> Resource<String> {
    Resource {
        field: "clients",
        map_record: map_client,
        error_message: "Unable to load clients",
    }
}

/// Only active clients (`status == "1"`) with a name are shown.
fn map_client(record: &Value, _index: usize) -> Option<String> {
    let active = match record.get("status") {
        Some(Value::String(s)) => s.trim() == "1",
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    };
    if !active {
        return None;
    }
    text_field(record, "clientname")
}

/// Panels of sampled rows; panel `i` uses seed `i + 1`.
pub fn panels(names: &[String]) -> Vec<Vec<String>> {
    chunk(names, PANEL_SIZE)
        .iter()
        .enumerate()
        .map(|(i, group)| sample_rows(group, PANEL_ROWS, i + 1))
        .collect()
}

pub fn render(state: &SectionState<String>, ctx: &MotionContext) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"section-inner\"><div class=\"section-head\">");
    html.push_str(&reveal_open(
        "h2",
        "section-title",
        RevealConfig::default().direction(Direction::Left).repeat().threshold(0.6),
        ctx,
    ));
    html.push_str("Our Clients</h2>");
    html.push_str(&reveal_open("p", "section-lead", RevealConfig::default().repeat().threshold(0.5), ctx));
    html.push_str("Trusted by leading organizations across the region.</p></div>");

    match state {
        SectionState::Loading => html.push_str("<p class=\"section-status\">Loading...</p>"),
        SectionState::Failed(msg) => html.push_str(&format!(
            "<p class=\"section-status section-error\">{}</p>",
            html_escape(msg)
        )),
        SectionState::Loaded(names) if names.is_empty() => {
            html.push_str("<p class=\"section-status\">No clients found.</p>")
        }
        SectionState::Loaded(names) => {
            html.push_str("<div class=\"client-panels\">");
            for rows in panels(names) {
                html.push_str(&reveal_open(
                    "section",
                    "client-panel",
                    RevealConfig::default().threshold(0.5),
                    ctx,
                ));
                html.push_str("<ul>");
                for name in rows {
                    html.push_str(&format!("<li>{}</li>", html_escape(&name)));
                }
                html.push_str("</ul></section>");
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div>");
    html
}
