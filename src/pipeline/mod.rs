// src/pipeline/mod.rs
// =============================================================================
// The coordinator: runs one scrape from listing to CSV.
//
// Stages:
// 1. Planning        - Paginator turns the listing size into page requests
// 2. Listing fetch   - every page request POSTed as one concurrent batch
// 3. Link discovery  - app links pulled out of each page, in page order
// 4. Detail fetch    - app pages GETed in batches of `concurrency`
// 5. Extract + write - email pulled from each page and appended to the CSV,
//                      again in batches of `concurrency`
//
// Each stage finishes completely before the next starts. Any error aborts the
// run; rows already written stay in the file.
//
// Every discovered link and every detail page is held in memory until its
// stage completes. That's fine for a collection of a few hundred apps.
// =============================================================================

mod batch;

pub use batch::in_batches;

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extract::{extract_contact, extract_links, parse_markup, AppLink, ContactRecord};
use crate::fetch::{Fetcher, Transport};
use crate::output::{escape_unicode, ContactSink};
use crate::pagination::Paginator;

/// A fetched app details page, still unparsed.
#[derive(Debug)]
pub struct AppDetailResponse {
    pub link: AppLink,
    pub raw_bytes: Vec<u8>,
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub pages: usize,
    pub links: usize,
    pub rows: usize,
    pub output: PathBuf,
}

pub struct Coordinator {
    config: PipelineConfig,
    origin: Url,
    paginator: Paginator,
    fetcher: Fetcher,
    sink: ContactSink,
}

impl Coordinator {
    /// Validates the config and wires up the worker pool and the sink.
    pub fn new(config: PipelineConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let origin = config.validate()?;
        let paginator = Paginator::new(config.page_size)?;
        let fetcher = Fetcher::new(transport, config.workers);
        let sink = ContactSink::new(config.output_path.clone());

        Ok(Coordinator {
            config,
            origin,
            paginator,
            fetcher,
            sink,
        })
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.sink.write_header().await?;

        let pages = self.fetch_listing().await?;
        let links = self.discover_links(&pages)?;
        let page_count = pages.len();
        drop(pages);

        let link_count = links.len();
        let responses = self.fetch_details(links).await?;
        let rows = self.write_contacts(responses).await?;

        info!(pages = page_count, links = link_count, rows, "run complete");

        Ok(RunSummary {
            pages: page_count,
            links: link_count,
            rows,
            output: self.sink.path().to_path_buf(),
        })
    }

    // Stages 1 + 2: the whole listing goes out as one batch
    async fn fetch_listing(&self) -> Result<Vec<Vec<u8>>> {
        let requests = self.paginator.plan(self.config.total_estimate);
        let url = &self.config.collection_url;

        let pending = requests.into_iter().map(|request| {
            info!(url = %url, start = request.offset, num = request.count, "fetching listing page");
            self.fetcher.fetch_post(url.clone(), request)
        });
        let pages = futures::future::try_join_all(pending).await?;

        info!(pages = pages.len(), "completed fetching all listing pages");
        Ok(pages)
    }

    // Stage 3
    fn discover_links(&self, pages: &[Vec<u8>]) -> Result<Vec<AppLink>> {
        let mut links = Vec::new();
        for page in pages {
            let document = parse_markup(page, &self.config.collection_url)?;
            links.extend(extract_links(&document, &self.origin));
        }
        info!(links = links.len(), "discovered app links");
        Ok(links)
    }

    // Stage 4
    async fn fetch_details(&self, links: Vec<AppLink>) -> Result<Vec<AppDetailResponse>> {
        in_batches(links, self.config.concurrency, |link| {
            info!("fetching information for {}", escape_unicode(&link.display_name));
            let url = link.detail_url.clone();
            async move {
                let (link, raw_bytes) = self.fetcher.fetch_get(url, link).await?;
                Ok(AppDetailResponse { link, raw_bytes })
            }
        })
        .await
    }

    // Stage 5: returns the number of rows written
    async fn write_contacts(&self, responses: Vec<AppDetailResponse>) -> Result<usize> {
        let written = in_batches(responses, self.config.concurrency, |response| async move {
            let record = contact_record(&response)?;
            self.sink.append(&record).await
        })
        .await?;

        Ok(written.len())
    }
}

// Parsing stays synchronous so the document never lives across an await
fn contact_record(response: &AppDetailResponse) -> Result<ContactRecord> {
    let name = &response.link.display_name;
    info!("processing data for {}", escape_unicode(name));

    let document = parse_markup(&response.raw_bytes, &response.link.detail_url)?;
    let email = extract_contact(&document, name)?;

    Ok(ContactRecord {
        display_name: name.clone(),
        email,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is contact_record() not async?
//    - scraper's Html document is not Send
//    - Keeping the parse in a plain function means the document is dropped
//      before the next .await, so the surrounding future stays usable on a
//      multi-threaded runtime
//
// 2. Why Arc<dyn Transport> in Coordinator::new?
//    - main passes the real reqwest transport, tests pass an in-memory fake
//    - dyn Transport lets both go through the same code path
//
// 3. What does `async move` capture in the closures?
//    - `self` is a &Coordinator, so moving it just copies the reference
//    - The AppLink / AppDetailResponse is moved into the future that owns it
// -----------------------------------------------------------------------------
