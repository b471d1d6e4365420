// src/fetch/mod.rs
// =============================================================================
// Fetching raw pages.
//
// Submodules:
// - http: the Transport trait and its reqwest implementation
// - pool: the Fetcher, which runs transport calls on a bounded worker pool
// =============================================================================

mod http;
mod pool;

pub use http::{HttpTransport, Transport};
pub use pool::Fetcher;
