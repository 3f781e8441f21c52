use serde::Serialize;
use serde_json::Value;

use super::{record_id, text_field};
use crate::loader::{Resource, SectionState};
use crate::render::{html_escape, reveal_open};
use crate::reveal::{Direction, MotionContext, RevealConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: String,
    pub url: Option<String>,
}

pub fn resource() -> Resource<EventCard> {
    Resource {
        field: "events",
        map_record: map_event,
        error_message: "Unable to load events",
    }
}

fn map_event(record: &Value, index: usize) -> Option<EventCard> {
    if !record.is_object() {
        return None;
    }
    Some(EventCard {
        id: record_id(record, index),
        title: text_field(record, "event_name")?,
        description: text_field(record, "event_details").unwrap_or_default(),
        image: text_field(record, "photo1"),
        date: text_field(record, "posted_on").unwrap_or_default(),
        url: text_field(record, "event_url"),
    })
}

fn render_card(event: &EventCard) -> String {
    let image = match &event.image {
        Some(src) => format!(
            "<div class=\"event-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
            html_escape(src),
            html_escape(&event.title)
        ),
        None => String::new(),
    };
    let link = match &event.url {
        Some(url) => format!(
            "<a class=\"event-link\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">View Event &rarr;</a>",
            html_escape(url)
        ),
        None => String::new(),
    };
    format!(
        "<article class=\"event-card\" data-id=\"{id}\">{image}<div class=\"event-body\">\
<p class=\"event-date\">{date}</p><h2 class=\"event-title\">{title}</h2>\
<p class=\"event-desc\">{desc}</p>{link}</div></article>",
        id = html_escape(&event.id),
        image = image,
        date = html_escape(&event.date),
        title = html_escape(&event.title),
        desc = html_escape(&event.description),
        link = link,
    )
}

pub fn render(state: &SectionState<EventCard>, ctx: &MotionContext) -> String {
    let mut html = String::from("<div class=\"section-inner\"><div class=\"section-head\">");
    html.push_str(&reveal_open(
        "h1",
        "section-title",
        RevealConfig::default().direction(Direction::Right).repeat().threshold(0.6),
        ctx,
    ));
    html.push_str("Events</h1></div>");

    match state {
        SectionState::Loading => html.push_str("<p class=\"section-status\">Loading events...</p>"),
        SectionState::Failed(msg) => html.push_str(&format!(
            "<p class=\"section-status section-error\">{}</p>",
            html_escape(msg)
        )),
        SectionState::Loaded(events) if events.is_empty() => {
            html.push_str("<p class=\"section-status\">No events found.</p>")
        }
        SectionState::Loaded(events) => {
            html.push_str(&reveal_open("div", "event-grid", RevealConfig::default().repeat().threshold(0.2), ctx));
            for event in events {
                html.push_str(&render_card(event));
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div>");
    html
}
