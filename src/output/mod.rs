// src/output/mod.rs
// =============================================================================
// Persisting results.
//
// Submodules:
// - sink: the append-only CSV contact sink
// - escape: printable escaping for app names
// =============================================================================

mod sink;
mod escape;

pub use sink::ContactSink;
pub use escape::escape_unicode;
