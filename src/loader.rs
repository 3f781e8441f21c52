use std::sync::Arc;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::content::{proxy, ContentKind, FetchError, Fetcher};

/// Render contract shared by every content section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState<T> {
    Loading,
    Failed(String),
    /// May be empty: "no items" is not an error.
    Loaded(Vec<T>),
}

impl<T> SectionState<T> {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn items(&self) -> &[T] {
        match self {
            SectionState::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Handed out by [`ResourceLoader::begin`]; only the newest one may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Section state plus the guard that keeps superseded results out.
///
/// Every `begin` or `unmount` bumps the generation, so an older ticket
/// can no longer settle. In-flight requests are not aborted, their
/// results are just dropped.
#[derive(Debug)]
pub struct ResourceLoader<T> {
    state: SectionState<T>,
    generation: u64,
    mounted: bool,
}

impl<T> ResourceLoader<T> {
    pub fn new() -> Self {
        ResourceLoader {
            state: SectionState::Loading,
            generation: 0,
            mounted: true,
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = SectionState::Loading;
        Ticket(self.generation)
    }

    /// Apply a result. Returns false when the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, result: Result<Vec<T>, String>) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            return false;
        }
        self.state = match result {
            Ok(items) => SectionState::Loaded(items),
            Err(message) => SectionState::Failed(message),
        };
        true
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> &SectionState<T> {
        &self.state
    }

    pub fn into_state(self) -> SectionState<T> {
        self.state
    }
}

impl<T> Default for ResourceLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a section gets its raw document from.
#[rocket::async_trait]
pub trait Source: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// Goes through the same forwarding logic as the `/api/<kind>` routes.
pub struct ProxySource {
    pub kind: ContentKind,
    pub fetcher: Arc<dyn Fetcher>,
    pub upstream: UpstreamConfig,
}

#[rocket::async_trait]
impl Source for ProxySource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        proxy::fetch(&*self.fetcher, &self.upstream, self.kind).await
    }
}

/// Fixed document, resolved immediately.
pub struct StaticSource(pub Value);

#[rocket::async_trait]
impl Source for StaticSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        Ok(self.0.clone())
    }
}

/// Mapping strategy for one content kind.
pub struct Resource<T> {
    /// Array field in the fetched document.
    pub field: &'static str,
    /// Record -> view model; `None` drops the record. Gets the positional index.
    pub map_record: fn(&Value, usize) -> Option<T>,
    pub error_message: &'static str,
}

impl<T> Resource<T> {
    pub fn map(&self, body: &Value) -> Vec<T> {
        match body.get(self.field).and_then(|v| v.as_array()) {
            Some(records) => records
                .iter()
                .enumerate()
                .filter_map(|(i, r)| (self.map_record)(r, i))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// One section's fetch-render unit: a resource strategy plus its loader.
pub struct Controller<T> {
    resource: Resource<T>,
    loader: ResourceLoader<T>,
}

impl<T: Send> Controller<T> {
    pub fn new(resource: Resource<T>) -> Self {
        Controller { resource, loader: ResourceLoader::new() }
    }

    /// Issue exactly one fetch and settle the section.
    pub async fn load(&mut self, source: &dyn Source) {
        let ticket = self.begin();
        let fetched = source.fetch().await;
        self.finish(ticket, fetched);
    }

    /// Start a fetch. Any ticket handed out earlier goes stale.
    pub fn begin(&mut self) -> Ticket {
        self.loader.begin()
    }

    /// Map a fetched document into the section. Returns false, leaving the
    /// section as it was, when `ticket` has been superseded or the section
    /// is unmounted.
    pub fn finish(&mut self, ticket: Ticket, fetched: Result<Value, FetchError>) -> bool {
        let result = match fetched {
            Ok(body) => Ok(self.resource.map(&body)),
            Err(e) => {
                log::warn!("[section] {} failed: {}", self.resource.field, e);
                Err(self.resource.error_message.to_string())
            }
        };
        self.loader.settle(ticket, result)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> &SectionState<T> {
        self.loader.state()
    }

    pub fn into_state(self) -> SectionState<T> {
        self.loader.into_state()
    }
}
