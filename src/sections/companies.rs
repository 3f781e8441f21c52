use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::text_field;
use crate::loader::{Resource, SectionState};
use crate::motion;
use crate::render::{html_escape, reveal_open};
use crate::reveal::{Direction, MotionContext, RevealConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub href: String,
    pub logo: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CompaniesFile {
    #[serde(default)]
    companies: Vec<Company>,
}

pub fn defaults() -> Vec<Company> {
    let blurb = "Lorem ipsum dolor sit amet consectetur adipisicing elit. Facilis dolore adipisci placeat.";
    vec![
        Company {
            href: "https://example.com/jessy".into(),
            logo: "/static/logopics/logo1.png".into(),
            title: "Jessy Mathew International SPC".into(),
            description: blurb.into(),
        },
        Company {
            href: "https://example.com/camden".into(),
            logo: "/static/logopics/logo3.png".into(),
            title: "Camden Importers and Exporters Private Limited".into(),
            description: blurb.into(),
        },
        Company {
            href: "https://example.com/jj2".into(),
            logo: "/static/logopics/logo2.png".into(),
            title: "JJ\u{b2} Consultancy UK Limited".into(),
            description: blurb.into(),
        },
    ]
}

/// Parse a `[[companies]]` TOML document.
pub fn parse(content: &str) -> Result<Vec<Company>, String> {
    let file: CompaniesFile = toml::from_str(content).map_err(|e| format!("Invalid companies file: {}", e))?;
    Ok(file.companies)
}

/// The showcase list from `path`, falling back to the built-in brands.
pub fn load(path: &str) -> Vec<Company> {
    if !Path::new(path).exists() {
        return defaults();
    }
    match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|c| parse(&c)) {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => {
            log::warn!("[section] {} lists no companies, using defaults", path);
            defaults()
        }
        Err(e) => {
            log::warn!("[section] {}: {}, using defaults", path, e);
            defaults()
        }
    }
}

/// Static document served to the companies controller.
pub fn document(companies: &[Company]) -> Value {
    json!({ "companies": companies })
}

pub fn resource() -> Resource<Company> {
    Resource {
        field: "companies",
        map_record: map_company,
        error_message: "Unable to load companies",
    }
}

fn map_company(record: &Value, _index: usize) -> Option<Company> {
    Some(Company {
        href: text_field(record, "href")?,
        logo: text_field(record, "logo")?,
        title: text_field(record, "title")?,
        description: text_field(record, "description").unwrap_or_default(),
    })
}

pub fn render(state: &SectionState<Company>, ctx: &MotionContext) -> String {
    let mut html = String::from("<div class=\"section-inner\">");
    html.push_str(&reveal_open("div", "section-head", RevealConfig::default().repeat().threshold(0.6), ctx));
    html.push_str(&reveal_open("h2", "section-title", RevealConfig::default().direction(Direction::Left).repeat(), ctx));
    html.push_str("Discover our companies</h2><div class=\"title-bar\"></div>");
    html.push_str(&reveal_open("p", "section-lead", RevealConfig::default().repeat().threshold(0.5), ctx));
    html.push_str(
        "Explore our curated partner brands. Each tile highlights the logo, brief summary, \
and a quick link to learn more. Hover or focus on a card, then open the website.</p></div>",
    );

    match state {
        SectionState::Loading => html.push_str("<p class=\"section-status\">Loading...</p>"),
        SectionState::Failed(msg) => html.push_str(&format!(
            "<p class=\"section-status section-error\">{}</p>",
            html_escape(msg)
        )),
        SectionState::Loaded(list) if list.is_empty() => {
            html.push_str("<p class=\"section-status\">No companies found.</p>")
        }
        SectionState::Loaded(list) => {
            let logo_style = motion::timeline_style(motion::company_logo, motion::COMPANIES_PASS);
            html.push_str(&reveal_open("div", "company-grid", RevealConfig::default().repeat().threshold(0.3), ctx));
            for c in list {
                html.push_str(&format!(
                    "<a class=\"company-card\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"Open {title} website\">\
<div class=\"company-logo\"><img class=\"scroll-linked\" style=\"{style}\" src=\"{logo}\" alt=\"{title}\" draggable=\"false\"></div>\
<div class=\"company-overlay\"><h3>{title}</h3><p>{desc}</p><span class=\"company-more\">See More</span></div></a>",
                    href = html_escape(&c.href),
                    title = html_escape(&c.title),
                    style = logo_style,
                    logo = html_escape(&c.logo),
                    desc = html_escape(&c.description),
                ));
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_through_the_resource() {
        let list = defaults();
        let mapped = resource().map(&document(&list));
        assert_eq!(mapped, list);
    }

    #[test]
    fn parses_toml_list() {
        let content = r#"
[[companies]]
href = "https://one.example.com"
logo = "/static/one.png"
title = "One"

[[companies]]
href = "https://two.example.com"
logo = "/static/two.png"
title = "Two"
description = "Second brand"
"#;
        let list = parse(content).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].description, "");
        assert_eq!(list[1].title, "Two");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(parse("[[companies]]\nhref = ").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        assert_eq!(load("website/does-not-exist.toml"), defaults());
    }

    #[test]
    fn render_links_each_company() {
        let html = render(&SectionState::Loaded(defaults()), &MotionContext::default());
        assert_eq!(html.matches("class=\"company-card\"").count(), 3);
        assert!(html.contains("aria-label=\"Open Camden Importers and Exporters Private Limited website\""));
        assert!(html.contains("scale(1.080)"));
    }
}
