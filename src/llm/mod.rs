//! Optional enrichment through an external structured-analysis provider

pub mod enrichment;
pub mod payloads;
pub mod prompts;
pub mod provider;

pub use enrichment::Enricher;
pub use provider::{provider_from_config, CommandProvider, DisabledProvider, EnrichmentProvider};
