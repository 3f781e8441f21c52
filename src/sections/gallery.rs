use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use super::{record_id, shuffle_take, text_field};
use crate::loader::{Resource, SectionState};
use crate::motion;
use crate::render::{html_escape, reveal_open};
use crate::reveal::{Direction, MotionContext, RevealConfig};

/// 5x5 grid.
pub const GRID_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImage {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
}

pub fn resource() -> Resource<GalleryImage> {
    Resource {
        field: "galleries",
        map_record: map_image,
        error_message: "Unable to load gallery",
    }
}

fn map_image(record: &Value, index: usize) -> Option<GalleryImage> {
    Some(GalleryImage {
        id: record_id(record, index),
        image: text_field(record, "image_path")?,
        title: text_field(record, "title").unwrap_or_default(),
        description: text_field(record, "description").unwrap_or_default(),
    })
}

/// Shuffle loaded images and keep one grid's worth.
pub fn arrange<R: Rng + ?Sized>(state: SectionState<GalleryImage>, rng: &mut R) -> SectionState<GalleryImage> {
    match state {
        SectionState::Loaded(images) => SectionState::Loaded(shuffle_take(&images, GRID_SIZE, rng)),
        other => other,
    }
}

pub fn render(state: &SectionState<GalleryImage>, ctx: &MotionContext) -> String {
    let mut html = String::from("<div class=\"section-inner\"><div class=\"section-head\">");
    html.push_str(&reveal_open(
        "h2",
        "section-title",
        RevealConfig::default().direction(Direction::Right).repeat().threshold(0.6),
        ctx,
    ));
    html.push_str("Gallery</h2><div class=\"title-bar\"></div></div>");

    match state {
        SectionState::Loading => html.push_str("<p class=\"section-status\">Loading...</p>"),
        SectionState::Failed(msg) => html.push_str(&format!(
            "<p class=\"section-status section-error\">{}</p>",
            html_escape(msg)
        )),
        SectionState::Loaded(images) if images.is_empty() => {
            html.push_str("<p class=\"section-status\">No images found.</p>")
        }
        SectionState::Loaded(images) => {
            html.push_str(&format!(
                "<div class=\"gallery-motion scroll-linked\" style=\"{}\">",
                motion::timeline_style(motion::gallery_grid, motion::GRID_PASS)
            ));
            html.push_str(&reveal_open("div", "gallery-grid", RevealConfig::default().repeat().threshold(0.3), ctx));
            for (i, img) in images.iter().enumerate() {
                let alt = if img.title.is_empty() {
                    format!("Gallery {}", i + 1)
                } else {
                    img.title.clone()
                };
                html.push_str(&format!(
                    "<figure class=\"gallery-item\" data-id=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">\
<figcaption class=\"sr-only\">{}</figcaption></figure>",
                    html_escape(&img.id),
                    html_escape(&img.image),
                    html_escape(&alt),
                    html_escape(if img.description.is_empty() { &alt } else { &img.description }),
                ));
            }
            html.push_str("</div></div>");
        }
    }

    html.push_str("</div>");
    html
}
