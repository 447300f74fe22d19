//! Response enrichment: raw records plus derived, human-facing fields.
//!
//! An [`Enriched`] value serializes as one flat JSON object, the original
//! record's fields first and the derived fields after them. The derived
//! field set is a fixed struct per entity kind, so what a caller gets back
//! is checked at compile time rather than assembled ad hoc.

pub mod export;
pub mod records;
pub mod text;
pub mod time;
pub mod urls;

use crate::api::SlugResolver;
use crate::types::BaseUrl;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::future::Future;

pub use export::{ExportDescriptor, ExportFormat, ExportOutput};
pub use records::*;
pub use time::{Clock, FixedClock, SystemClock};

/// A record together with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<R, D> {
    #[serde(flatten)]
    pub record: R,
    #[serde(flatten)]
    pub derived: D,
}

impl<R, D> Enriched<R, D> {
    pub fn new(record: R, derived: D) -> Self {
        Self { record, derived }
    }
}

/// Everything enrichment needs besides the record itself.
#[derive(Clone, Copy)]
pub struct EnrichContext<'a> {
    pub base: &'a BaseUrl,
    pub resolver: &'a dyn SlugResolver,
    pub now: DateTime<Utc>,
}

impl<'a> EnrichContext<'a> {
    pub fn new(base: &'a BaseUrl, resolver: &'a dyn SlugResolver, now: DateTime<Utc>) -> Self {
        Self {
            base,
            resolver,
            now,
        }
    }
}

/// Enriches every item, with lookups in flight concurrently.
///
/// Output order matches input order regardless of completion order. Item
/// enrichment cannot fail, so one unresolvable parent only degrades that
/// item's URL to id segments.
pub async fn enrich_all<T, D, F, Fut>(items: Vec<T>, enrich: F) -> Vec<D>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = D>,
{
    join_all(items.into_iter().map(enrich)).await
}
