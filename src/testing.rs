#![cfg(test)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::contact::form::{Relay, RelayReply};
use crate::contact::ContactSubmission;
use crate::content::{FetchError, Fetcher, Reply};
use crate::email::{Mailer, OutgoingMail};

/// Fetcher that answers every GET with the same canned reply.
pub struct StubFetcher {
    reply: Result<Reply, FetchError>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(reply: Result<Reply, FetchError>) -> Self {
        StubFetcher { reply, requested: Mutex::new(Vec::new()) }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl Fetcher for StubFetcher {
    async fn get_json(&self, url: &str) -> Result<Reply, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.reply.clone()
    }
}

/// Fetcher that routes by URL prefix; unknown URLs fail at the transport.
pub struct RoutedFetcher {
    routes: HashMap<String, Result<Reply, FetchError>>,
}

impl RoutedFetcher {
    pub fn new() -> Self {
        RoutedFetcher { routes: HashMap::new() }
    }

    pub fn route(mut self, base_url: &str, reply: Result<Reply, FetchError>) -> Self {
        self.routes.insert(base_url.to_string(), reply);
        self
    }
}

#[rocket::async_trait]
impl Fetcher for RoutedFetcher {
    async fn get_json(&self, url: &str) -> Result<Reply, FetchError> {
        let base = url.split('?').next().unwrap_or(url);
        self.routes
            .get(base)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Transport(format!("no route for {}", base))))
    }
}

pub struct RecordingMailer {
    fail_with: Option<String>,
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn ok() -> Self {
        RecordingMailer { fail_with: None, sent: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: &str) -> Self {
        RecordingMailer { fail_with: Some(error.to_string()), sent: Mutex::new(Vec::new()) }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String> {
        self.sent.lock().unwrap().push(mail.clone());
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Relay that records payloads and answers with a canned reply.
pub struct StubRelay {
    reply: Result<RelayReply, String>,
    posted: Mutex<Vec<ContactSubmission>>,
}

impl StubRelay {
    pub fn new(reply: Result<RelayReply, String>) -> Self {
        StubRelay { reply, posted: Mutex::new(Vec::new()) }
    }

    pub fn replying(status: u16, body: Value) -> Self {
        Self::new(Ok(RelayReply { status, body }))
    }

    pub fn posted(&self) -> Vec<ContactSubmission> {
        self.posted.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl Relay for StubRelay {
    async fn post(&self, payload: &ContactSubmission) -> Result<RelayReply, String> {
        self.posted.lock().unwrap().push(payload.clone());
        self.reply.clone()
    }
}
