use crate::config::SiteConfig;
use crate::contact::form::{ContactForm, NoticeKind};
use crate::loader::SectionState;
use crate::motion;
use crate::reveal::{Direction, MotionContext, Reveal, RevealConfig};
use crate::sections::companies::Company;
use crate::sections::events::EventCard;
use crate::sections::gallery::GalleryImage;
use crate::sections::{clients, companies, events, gallery};

/// Settled state of every content section for one page render.
#[derive(Debug, Clone)]
pub struct HomeSections {
    pub companies: SectionState<Company>,
    pub clients: SectionState<String>,
    pub gallery: SectionState<GalleryImage>,
    pub events: SectionState<EventCard>,
}

impl Default for HomeSections {
    fn default() -> Self {
        HomeSections {
            companies: SectionState::Loading,
            clients: SectionState::Loading,
            gallery: SectionState::Loading,
            events: SectionState::Loading,
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Opening tag for a reveal-wrapped element, with its initial classes and
/// the custom properties the view-timeline rules read.
pub(crate) fn reveal_open(tag: &str, extra_class: &str, config: RevealConfig, ctx: &MotionContext) -> String {
    let mut reveal = Reveal::new(config);
    reveal.mount(ctx);
    let classes = reveal.classes(ctx);
    let class_attr = match (extra_class.is_empty(), classes.is_empty()) {
        (true, true) => String::new(),
        (false, true) => extra_class.to_string(),
        (true, false) => classes.to_string(),
        (false, false) => format!("{} {}", extra_class, classes),
    };
    format!(
        "<{tag} class=\"{class}\" style=\"{style}\">",
        tag = tag,
        class = class_attr,
        style = reveal.style_vars()
    )
}

/// The one-page site: navbar, hero, companies, clients, contact, gallery,
/// events, then footer.
pub fn render_home(config: &SiteConfig, sections: &HomeSections, form: &ContactForm, ctx: &MotionContext) -> String {
    let site_name = html_escape(&config.site_name);

    let body_class = match (ctx.app_ready, ctx.reduced_motion) {
        (false, _) => "app-loading",
        (true, true) => "app-ready reduced-motion",
        (true, false) => "app-ready",
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{site_name}</title>
    <style>
        {base_css}
    </style>
</head>
<body id="top" class="{body_class}">
    {splash}
    {navbar}
    <main>
        <section id="home" class="hero">{hero}</section>
        <section id="companies" class="companies">{companies}</section>
        <section id="clients" class="clients">{clients}</section>
        <section id="contact" class="contact">{contact}</section>
        <section id="gallery" class="gallery">{gallery}</section>
        <section id="events" class="events">{events}</section>
    </main>
    <a href="#top" class="scroll-top" aria-label="Scroll to top">&uarr;</a>
    <footer class="site-footer">
        <p>&copy; {year} {site_name}. All rights reserved.</p>
    </footer>
</body>
</html>"##,
        site_name = site_name,
        base_css = BASE_CSS,
        body_class = body_class,
        splash = if ctx.app_ready { String::new() } else { build_splash(&site_name) },
        navbar = build_navbar(&site_name),
        hero = build_hero(ctx),
        companies = companies::render(&sections.companies, ctx),
        clients = clients::render(&sections.clients, ctx),
        contact = build_contact(config, form, ctx),
        gallery = gallery::render(&sections.gallery, ctx),
        events = events::render(&sections.events, ctx),
        year = chrono::Utc::now().format("%Y"),
    )
}

/// Small standalone page for the catchers.
pub fn render_error_page(code: u16, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{code}</title>
<style>body{{font-family:system-ui,sans-serif;background:#061d42;color:#fff;display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0}}.error-page{{text-align:center}}h1{{font-size:64px;margin:0}}a{{color:#9cc3ff}}</style>
</head>
<body><div class="error-page"><h1>{code}</h1><p>{message}</p><a href="/">&larr; Back to home</a></div></body>
</html>"#,
        code = code,
        message = html_escape(message),
    )
}

fn build_splash(site_name: &str) -> String {
    format!("<div class=\"splash\" aria-hidden=\"true\"><span>{}</span></div>", site_name)
}

fn build_navbar(site_name: &str) -> String {
    let links = [
        ("#home", "Home"),
        ("#companies", "Companies"),
        ("#clients", "Clients"),
        ("#gallery", "Gallery"),
        ("#events", "Events"),
        ("#contact", "Contact"),
    ];
    let mut nav = String::new();
    for (href, label) in links {
        nav.push_str(&format!("<a href=\"{}\" class=\"nav-link\">{}</a>", href, label));
    }
    format!(
        "<header class=\"navbar\"><div class=\"navbar-inner\"><a href=\"#home\" class=\"brand\">{}</a>\
<nav class=\"nav-links\">{}</nav></div></header>",
        site_name, nav
    )
}

fn build_hero(ctx: &MotionContext) -> String {
    let mut html = String::from("<div class=\"hero-inner\">");
    html.push_str(&reveal_open("div", "hero-text", RevealConfig::default().threshold(0.3), ctx));
    html.push_str("<h1 class=\"hero-title\">JESSY MATHEW</h1>");
    html.push_str(
        "<p>At the heart of JM International SPC\u{2019}s strategic growth is Jessy Mathew, a globally \
experienced HR leader, entrepreneur, and advisor with over 24 years of expertise spanning Oman, India, \
and the UK.</p>",
    );
    html.push_str(
        "<p>A respected figure in the Middle East\u{2019}s HR and manpower ecosystem, Jessy brings visionary \
leadership to operations, strategy, and client engagements, known for cultural fluency, strategic \
foresight, and an unwavering commitment to ethical, impact-driven business.</p></div>",
    );
    html.push_str(&reveal_open(
        "div",
        "hero-portrait",
        RevealConfig::default().direction(Direction::Right).threshold(0.3),
        ctx,
    ));
    html.push_str("<img src=\"/static/hero.jpg\" alt=\"Jessy Mathew\"></div></div>");
    html
}

fn field_error(error: Option<&'static str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"field-error\" role=\"alert\">{}</p>", msg),
        None => String::new(),
    }
}

fn build_notice(form: &ContactForm) -> String {
    let notice = match &form.notice {
        Some(n) => n,
        None => return String::new(),
    };
    let kind = match notice.kind {
        NoticeKind::Success => "notice-success",
        NoticeKind::Error => "notice-error",
    };
    format!(
        "<div class=\"notice {kind}\" role=\"status\" style=\"animation-delay:{ms}ms\">\
<span>{text}</span><a href=\"/#contact\" class=\"notice-close\" aria-label=\"Dismiss\">&times;</a></div>",
        kind = kind,
        ms = notice.dismiss_after.as_millis(),
        text = html_escape(&notice.text),
    )
}

fn build_contact(config: &SiteConfig, form: &ContactForm, ctx: &MotionContext) -> String {
    let info = &config.contact;
    let mut html = format!(
        "<div class=\"contact-glow scroll-linked\" style=\"{}\" aria-hidden=\"true\"></div>",
        motion::timeline_style(motion::contact_glow, motion::GRID_PASS)
    );
    html.push_str("<div class=\"section-inner contact-grid\">");

    html.push_str(&reveal_open("div", "contact-info", RevealConfig::default().direction(Direction::Left), ctx));
    html.push_str("<h2 class=\"section-title\">Get in touch</h2>");
    html.push_str(&format!(
        "<ul class=\"contact-tiles\"><li><span>Address</span>{}</li>\
<li><span>Email</span><a href=\"mailto:{email}\">{email}</a></li><li><span>Phone</span>{}</li></ul></div>",
        html_escape(&info.address),
        html_escape(&info.phone),
        email = html_escape(&info.email),
    ));

    html.push_str(&reveal_open("div", "contact-card", RevealConfig::default().direction(Direction::Right), ctx));
    html.push_str(&build_notice(form));
    html.push_str(&format!(
        r#"<form method="post" action="/contact#contact" class="contact-form" novalidate>
<label for="cf-name">Name</label>
<input id="cf-name" type="text" name="name" value="{name}" autocomplete="name">
{name_err}
<label for="cf-email">Email</label>
<input id="cf-email" type="email" name="email" value="{email}" autocomplete="email">
{email_err}
<label for="cf-message">Message</label>
<textarea id="cf-message" name="message" rows="5">{message}</textarea>
{message_err}
<div class="hp" aria-hidden="true"><input type="text" name="website" value="{website}" tabindex="-1" autocomplete="off"></div>
<button type="submit">Send Message</button>
</form></div>"#,
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        message = html_escape(&form.message),
        website = html_escape(&form.website),
        name_err = field_error(form.errors.name),
        email_err = field_error(form.errors.email),
        message_err = field_error(form.errors.message),
    ));

    html.push_str("</div>");
    html
}

const BASE_CSS: &str = r#"
*{box-sizing:border-box}
html{scroll-behavior:smooth}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",sans-serif;color:#0b1b33;background:#fff}
a{color:inherit}
img{max-width:100%;display:block}
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0 0 0 0)}
.navbar{position:sticky;top:0;z-index:50;background:#061d42;color:#fff}
.navbar-inner{max-width:1152px;margin:0 auto;padding:14px 24px;display:flex;justify-content:space-between;align-items:center}
.brand{font-weight:700;text-decoration:none;letter-spacing:.04em}
.nav-links{display:flex;gap:20px}
.nav-link{text-decoration:none;opacity:.85}
.nav-link:hover{opacity:1}
.hero{background:#061d42;color:#fff}
.hero-inner{max-width:1152px;margin:0 auto;padding:56px 24px;display:grid;grid-template-columns:1fr 1fr;gap:48px;align-items:center}
.hero-title{font-size:72px;line-height:1.05;margin:0 0 16px}
.hero-portrait img{border-radius:24px;max-height:620px;object-fit:cover}
section{position:relative}
.section-inner{max-width:1152px;margin:0 auto;padding:64px 24px}
.section-head{margin-bottom:32px}
.section-title{font-size:40px;margin:0 0 8px}
.title-bar{width:64px;height:4px;background:#2b6de8;border-radius:2px}
.section-lead{max-width:640px;color:#4a5a73}
.section-status{color:#4a5a73}
.section-error{color:#c0392b}
.company-grid{display:grid;grid-template-columns:repeat(3,1fr);gap:24px}
.company-card{position:relative;display:block;border-radius:20px;overflow:hidden;background:#f3f6fb;text-decoration:none}
.company-logo{padding:40px;display:flex;justify-content:center}
.company-overlay{padding:20px}
.company-more{font-weight:600;color:#2b6de8}
.client-panels{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:24px}
.client-panel ul{list-style:none;margin:0;padding:16px;border-radius:16px;background:#f3f6fb}
.client-panel li{padding:6px 0;border-bottom:1px solid #e1e7f0}
.contact{background:#061d42;color:#fff;overflow:hidden}
.contact-glow{position:absolute;inset:-20% 10% auto;height:60%;background:radial-gradient(circle,rgba(43,109,232,.5),transparent 70%);pointer-events:none}
.contact-grid{display:grid;grid-template-columns:1fr 1fr;gap:48px}
.contact-tiles{list-style:none;padding:0}
.contact-tiles li{padding:12px 0}
.contact-tiles span{display:block;font-size:12px;text-transform:uppercase;opacity:.7}
.contact-form{display:flex;flex-direction:column;gap:8px}
.contact-form input,.contact-form textarea{padding:12px;border-radius:10px;border:1px solid #2c4a7a;background:#0a2557;color:#fff}
.contact-form button{margin-top:12px;padding:12px;border:0;border-radius:10px;background:#2b6de8;color:#fff;font-weight:600;cursor:pointer}
.field-error{margin:0;color:#ff8a80;font-size:13px}
.hp{position:absolute;left:-10000px;width:1px;height:1px;overflow:hidden}
.notice{display:flex;justify-content:space-between;gap:12px;padding:12px 16px;border-radius:10px;margin-bottom:16px;animation:notice-out .4s ease forwards}
.notice-success{background:#1e7d4f}
.notice-error{background:#a83232}
.notice-close{text-decoration:none;font-size:20px;line-height:1}
@keyframes notice-out{to{opacity:0;visibility:hidden;height:0;padding:0;margin:0}}
.gallery-grid{display:grid;grid-template-columns:repeat(5,1fr);gap:12px}
.gallery-item{margin:0;aspect-ratio:1;overflow:hidden;border-radius:12px}
.gallery-item img{width:100%;height:100%;object-fit:cover}
.event-grid{display:grid;grid-template-columns:repeat(3,1fr);gap:24px}
.event-card{border-radius:16px;overflow:hidden;background:#f3f6fb}
.event-body{padding:16px}
.event-date{font-size:13px;color:#4a5a73}
.event-link{font-weight:600;color:#2b6de8;text-decoration:none}
.scroll-top{position:fixed;right:24px;bottom:24px;width:40px;height:40px;border-radius:50%;background:#2b6de8;color:#fff;display:flex;align-items:center;justify-content:center;text-decoration:none}
.site-footer{padding:24px;text-align:center;background:#04142f;color:#9fb0c9}
.splash{position:fixed;inset:0;z-index:100;background:#061d42;color:#fff;display:flex;align-items:center;justify-content:center;font-size:32px;animation:splash-out .6s ease 1.2s forwards}
@keyframes splash-out{to{opacity:0;visibility:hidden}}
.reveal{transition:opacity .6s cubic-bezier(.22,1,.36,1),transform .6s cubic-bezier(.22,1,.36,1)}
.reveal-up{opacity:0;transform:translateY(24px)}
.reveal-left{opacity:0;transform:translateX(-32px)}
.reveal-right{opacity:0;transform:translateX(32px)}
.reveal-shown{opacity:1;transform:none}
@supports (animation-timeline: view()){
.reveal-up,.reveal-left,.reveal-right{animation:reveal-in linear both;animation-timeline:view(block auto var(--reveal-margin,0%));animation-range:entry 0% entry var(--reveal-threshold,15%);animation-iteration-count:var(--reveal-iterations,1)}
.scroll-linked{animation:scroll-motion linear both;animation-timeline:view();animation-range:var(--m-range)}
}
@supports not (animation-timeline: view()){
.reveal-up,.reveal-left,.reveal-right{opacity:1;transform:none}
}
@keyframes reveal-in{to{opacity:1;transform:none}}
@keyframes scroll-motion{from{transform:var(--m-from-t);opacity:var(--m-from-o)}to{transform:var(--m-to-t);opacity:var(--m-to-o)}}
@media (prefers-reduced-motion: reduce){
.reveal,.reveal-up,.reveal-left,.reveal-right{opacity:1!important;transform:none!important;animation:none!important;transition:none!important}
.scroll-linked{animation:none}
html{scroll-behavior:auto}
}
@media (max-width:768px){
.hero-inner,.contact-grid{grid-template-columns:1fr}
.company-grid,.event-grid{grid-template-columns:1fr}
.gallery-grid{grid-template-columns:repeat(3,1fr)}
.nav-links{display:none}
.hero-title{font-size:44px}
}
"#;
