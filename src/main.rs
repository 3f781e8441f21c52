#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod config;
mod contact;
mod content;
mod email;
mod loader;
mod motion;
mod render;
mod reveal;
mod routes;
mod sections;

#[cfg(test)]
mod testing;

use config::SiteConfig;
use content::{Fetcher, HttpFetcher};
use email::smtp::SmtpMailer;
use email::Mailer;

const CONTACT_RELAY_PATH: &str = "/api/contact";

/// Adds the CORS headers to every response from the contact relay.
pub struct ContactCors {
    origin: String,
}

#[rocket::async_trait]
impl Fairing for ContactCors {
    fn info(&self) -> Info {
        Info { name: "Contact Relay CORS", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        if req.uri().path() == CONTACT_RELAY_PATH {
            res.set_header(Header::new("Access-Control-Allow-Origin", self.origin.clone()));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        }
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml(render::render_error_page(404, "Page not found."))
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml(render::render_error_page(500, "Internal server error."))
}

/// Assemble the server around the given content fetcher and mailer.
pub fn build(config: SiteConfig, fetcher: Arc<dyn Fetcher>, mailer: Arc<dyn Mailer>) -> Rocket<Build> {
    let cors = ContactCors { origin: config.cors_origin.clone() };

    rocket::build()
        .manage(config)
        .manage(fetcher)
        .manage(mailer)
        .attach(cors)
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = SiteConfig::from_env();

    // Boot check: create directories, report config gaps
    boot::run(&config);

    let fetcher: Arc<dyn Fetcher> = match HttpFetcher::new() {
        Ok(f) => Arc::new(f),
        Err(e) => {
            log::error!("[boot] {}", e);
            std::process::exit(1);
        }
    };
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(config.smtp.clone()));

    match &config.relay_url {
        Some(url) => log::info!("[boot] Contact form relays to {}", url),
        None => log::info!("[boot] Contact form uses the built-in relay at {}", CONTACT_RELAY_PATH),
    }

    build(config, fetcher, mailer)
}
