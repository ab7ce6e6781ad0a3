//! Destinations for rebuilt message pairs.
//!
//! The importer only depends on the `Sink` trait; it does not know whether
//! messages land in memory, on disk, or in a proxy tool's site map.

mod directory;

pub use directory::DirectorySink;

use crate::message::HttpService;

/// Append-only acceptor of raw request/response pairs.
pub trait Sink {
    fn add(
        &mut self,
        service: &HttpService,
        request: &[u8],
        response: &[u8],
    ) -> anyhow::Result<()>;
}

impl<F> Sink for F
where
    F: FnMut(&HttpService, &[u8], &[u8]) -> anyhow::Result<()>,
{
    fn add(
        &mut self,
        service: &HttpService,
        request: &[u8],
        response: &[u8],
    ) -> anyhow::Result<()> {
        self(service, request, response)
    }
}

/// One stored pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMapItem {
    pub service: HttpService,
    pub request: Vec<u8>,
    pub response: Vec<u8>,
}

/// In-memory site map; keeps pairs in insertion order.
#[derive(Debug, Default)]
pub struct SiteMap {
    items: Vec<SiteMapItem>,
}

impl SiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SiteMapItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Sink for SiteMap {
    fn add(
        &mut self,
        service: &HttpService,
        request: &[u8],
        response: &[u8],
    ) -> anyhow::Result<()> {
        self.items.push(SiteMapItem {
            service: service.clone(),
            request: request.to_vec(),
            response: response.to_vec(),
        });
        Ok(())
    }
}
