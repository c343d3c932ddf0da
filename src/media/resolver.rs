use super::types::RawExtraction;
use anyhow::Result;
use async_trait::async_trait;

/// A backend that turns a media page URL into metadata plus a format list.
///
/// The HTTP layer only ever talks to this trait, so tests can substitute a
/// deterministic resolver with no subprocess or network behind it.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Human-readable name of the resolver
    fn name(&self) -> &'static str;

    /// Resolve every available format for the given URL
    async fn resolve(&self, url: &str) -> Result<RawExtraction>;
}
