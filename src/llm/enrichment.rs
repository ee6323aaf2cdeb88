//! Runs enrichment prompts through a provider and validates the answers

use crate::error::EnrichmentError;
use crate::llm::payloads::{
    IndustryEnrichment, MarketEnrichment, Payload, PredictionEnrichment, PsychologyEnrichment,
};
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::llm::provider::EnrichmentProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn EnrichmentProvider>,
    templates: PromptTemplates,
}

impl Enricher {
    pub fn new(provider: Arc<dyn EnrichmentProvider>) -> Self {
        Self::with_templates(provider, PromptTemplates::default())
    }

    pub fn with_templates(provider: Arc<dyn EnrichmentProvider>, templates: PromptTemplates) -> Self {
        Self { provider, templates }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn industry(&self, params: &PromptParams) -> Result<IndustryEnrichment, EnrichmentError> {
        self.request(self.templates.render_industry(params)).await
    }

    pub async fn psychology(&self, params: &PromptParams) -> Result<PsychologyEnrichment, EnrichmentError> {
        self.request(self.templates.render_psychology(params)).await
    }

    pub async fn market(&self, params: &PromptParams) -> Result<MarketEnrichment, EnrichmentError> {
        self.request(self.templates.render_market(params)).await
    }

    pub async fn predictions(&self, params: &PromptParams) -> Result<PredictionEnrichment, EnrichmentError> {
        self.request(self.templates.render_predictions(params)).await
    }

    async fn request<P: Payload>(&self, prompt: String) -> Result<P, EnrichmentError> {
        let value = self.provider.generate_structured_analysis(&prompt).await?;
        P::from_value(value)
    }
}
