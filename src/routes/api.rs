use std::sync::Arc;

use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

use crate::config::SiteConfig;
use crate::contact::{relay, ContactFields};
use crate::content::{proxy, ContentKind, Fetcher};
use crate::email::Mailer;

// ── Content proxies ────────────────────────────────────

async fn proxy_kind(config: &SiteConfig, fetcher: &Arc<dyn Fetcher>, kind: ContentKind) -> (Status, Json<Value>) {
    let (status, body) = proxy::forward(fetcher.as_ref(), config.upstream(kind), kind).await;
    (status, Json(body))
}

#[get("/clients")]
pub async fn clients(config: &State<SiteConfig>, fetcher: &State<Arc<dyn Fetcher>>) -> (Status, Json<Value>) {
    proxy_kind(config, fetcher, ContentKind::Clients).await
}

#[get("/events")]
pub async fn events(config: &State<SiteConfig>, fetcher: &State<Arc<dyn Fetcher>>) -> (Status, Json<Value>) {
    proxy_kind(config, fetcher, ContentKind::Events).await
}

#[get("/galleries")]
pub async fn galleries(config: &State<SiteConfig>, fetcher: &State<Arc<dyn Fetcher>>) -> (Status, Json<Value>) {
    proxy_kind(config, fetcher, ContentKind::Galleries).await
}

// ── Contact relay ──────────────────────────────────────

async fn relay_fields(config: &SiteConfig, mailer: &Arc<dyn Mailer>, fields: ContactFields) -> (Status, Json<Value>) {
    let (status, body) = relay::relay(mailer.as_ref(), &config.mail, fields.into_submission()).await;
    (status, Json(body))
}

/// Unparseable JSON counts as an empty submission.
#[post("/contact", format = "json", data = "<body>", rank = 1)]
pub async fn contact_json(
    config: &State<SiteConfig>,
    mailer: &State<Arc<dyn Mailer>>,
    body: Option<Json<ContactFields>>,
) -> (Status, Json<Value>) {
    let fields = body.map(|b| b.into_inner()).unwrap_or_default();
    relay_fields(config, mailer, fields).await
}

#[post("/contact", format = "form", data = "<body>", rank = 2)]
pub async fn contact_form(
    config: &State<SiteConfig>,
    mailer: &State<Arc<dyn Mailer>>,
    body: Option<Form<ContactFields>>,
) -> (Status, Json<Value>) {
    let fields = body.map(|b| b.into_inner()).unwrap_or_default();
    relay_fields(config, mailer, fields).await
}

/// Any other body is ignored and validated as empty.
#[post("/contact", rank = 3)]
pub async fn contact_other(config: &State<SiteConfig>, mailer: &State<Arc<dyn Mailer>>) -> (Status, Json<Value>) {
    relay_fields(config, mailer, ContactFields::default()).await
}

#[options("/contact")]
pub fn contact_preflight() -> Status {
    Status::Ok
}

pub fn routes() -> Vec<rocket::Route> {
    routes![clients, events, galleries, contact_json, contact_form, contact_other, contact_preflight]
}
