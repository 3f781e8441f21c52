use std::sync::Arc;

use rocket::form::Form;
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;

use crate::config::SiteConfig;
use crate::contact::form::{ContactForm, HttpRelay, LocalRelay, Relay};
use crate::contact::ContactFields;
use crate::content::{ContentKind, Fetcher};
use crate::email::Mailer;
use crate::loader::{Controller, ProxySource, StaticSource};
use crate::render::{self, HomeSections};
use crate::reveal::MotionContext;
use crate::sections::{clients, companies, events, gallery};

const REDUCED_MOTION_HINT: &str = "Sec-CH-Prefers-Reduced-Motion";

// ── Reduced-motion request guard ───────────────────────

/// Reads the `Sec-CH-Prefers-Reduced-Motion` client hint.
/// Browsers that never send it get full motion; the stylesheet's
/// `prefers-reduced-motion` media query still applies client side.
pub struct MotionPreference {
    pub reduced_motion: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MotionPreference {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let reduced_motion = request
            .headers()
            .get_one(REDUCED_MOTION_HINT)
            .map(|v| v.trim().trim_matches('"').eq_ignore_ascii_case("reduce"))
            .unwrap_or(false);
        Outcome::Success(MotionPreference { reduced_motion })
    }
}

pub fn motion_context(config: &SiteConfig, pref: &MotionPreference) -> MotionContext {
    MotionContext {
        reduced_motion: pref.reduced_motion,
        app_ready: !config.splash,
    }
}

// ── Page response ──────────────────────────────────────

#[derive(Responder)]
#[response(content_type = "html")]
pub struct Page {
    body: String,
    accept_ch: Header<'static>,
    vary: Header<'static>,
}

impl Page {
    fn new(body: String) -> Self {
        Page {
            body,
            accept_ch: Header::new("Accept-CH", REDUCED_MOTION_HINT),
            vary: Header::new("Vary", REDUCED_MOTION_HINT),
        }
    }
}

// ── Section loading ────────────────────────────────────

/// Mount every section's controller and let them load side by side.
/// A failure stays inside its own section.
pub async fn load_sections(config: &SiteConfig, fetcher: &Arc<dyn Fetcher>) -> HomeSections {
    let proxied = |kind: ContentKind| ProxySource {
        kind,
        fetcher: fetcher.clone(),
        upstream: config.upstream(kind).clone(),
    };
    let showcase = StaticSource(companies::document(&companies::load(&config.companies_file)));
    let clients_src = proxied(ContentKind::Clients);
    let gallery_src = proxied(ContentKind::Galleries);
    let events_src = proxied(ContentKind::Events);

    let mut companies_ctl = Controller::new(companies::resource());
    let mut clients_ctl = Controller::new(clients::resource());
    let mut gallery_ctl = Controller::new(gallery::resource());
    let mut events_ctl = Controller::new(events::resource());

    rocket::tokio::join!(
        companies_ctl.load(&showcase),
        clients_ctl.load(&clients_src),
        gallery_ctl.load(&gallery_src),
        events_ctl.load(&events_src),
    );

    let gallery = gallery::arrange(gallery_ctl.into_state(), &mut rand::thread_rng());

    HomeSections {
        companies: companies_ctl.into_state(),
        clients: clients_ctl.into_state(),
        gallery,
        events: events_ctl.into_state(),
    }
}

fn relay_for(config: &SiteConfig, mailer: &Arc<dyn Mailer>) -> Box<dyn Relay> {
    if let Some(url) = &config.relay_url {
        match HttpRelay::new(url) {
            Ok(relay) => return Box::new(relay),
            Err(e) => log::error!("[contact] {}, falling back to the built-in relay", e),
        }
    }
    Box::new(LocalRelay {
        mailer: mailer.clone(),
        mail: config.mail.clone(),
    })
}

// ── Routes ─────────────────────────────────────────────

#[get("/")]
pub async fn home(
    config: &State<SiteConfig>,
    fetcher: &State<Arc<dyn Fetcher>>,
    pref: MotionPreference,
) -> Page {
    let ctx = motion_context(config, &pref);
    let sections = load_sections(config, fetcher).await;
    Page::new(render::render_home(config, &sections, &ContactForm::default(), &ctx))
}

/// No-JS contact form: validate, relay once, re-render with the outcome.
#[post("/contact", data = "<fields>")]
pub async fn contact_submit(
    config: &State<SiteConfig>,
    fetcher: &State<Arc<dyn Fetcher>>,
    mailer: &State<Arc<dyn Mailer>>,
    pref: MotionPreference,
    fields: Form<ContactFields>,
) -> Page {
    let ctx = motion_context(config, &pref);
    let mut form = ContactForm::from_fields(fields.into_inner());
    let relay = relay_for(config, mailer);
    form.submit(relay.as_ref()).await;

    let sections = load_sections(config, fetcher).await;
    Page::new(render::render_home(config, &sections, &form, &ctx))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![home, contact_submit]
}
