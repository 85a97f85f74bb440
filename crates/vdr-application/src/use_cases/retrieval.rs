//! Retrieval Service
//!
//! Search, metadata enrichment and optional answer generation for one query.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VisionAnswerProvider;
use vdr_domain::value_objects::{Retrieval, RetrievedPage, SearchHit};

use super::metadata::MetadataLookup;
use super::model::{EmbeddingGenerator, ModelState};
use super::resilience::with_timeout;
use super::search::SearchService;
use crate::ports::services::RetrievalServiceInterface;

/// Retrieval against one configured collection
pub struct RetrievalService {
    generator: Arc<EmbeddingGenerator>,
    search: Arc<SearchService>,
    metadata: Arc<MetadataLookup>,
    vision: Option<Arc<dyn VisionAnswerProvider>>,
    collection: String,
    vision_timeout: Duration,
}

impl RetrievalService {
    /// Create the service
    pub fn new(
        generator: Arc<EmbeddingGenerator>,
        search: Arc<SearchService>,
        metadata: Arc<MetadataLookup>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            search,
            metadata,
            vision: None,
            collection: collection.into(),
            vision_timeout: Duration::from_secs(120),
        }
    }

    /// Enable answer generation
    pub fn with_vision(
        mut self,
        vision: Arc<dyn VisionAnswerProvider>,
        timeout: Duration,
    ) -> Self {
        self.vision = Some(vision);
        self.vision_timeout = timeout;
        self
    }

    /// Collection queried by this service
    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn enrich(&self, hit: SearchHit) -> RetrievedPage {
        let metadata = match self.metadata.find(&hit.payload.image).await {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %hit.payload.image, error = %e, "Metadata lookup failed");
                None
            }
        };
        RetrievedPage { hit, metadata }
    }

    async fn answer(
        &self,
        vision: &dyn VisionAnswerProvider,
        page: &RetrievedPage,
        query: &str,
    ) -> Result<String> {
        let path = &page.hit.payload.image;
        let image = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io_with_source(format!("Failed to read page image {path}"), e))?;
        with_timeout(
            "vision_answer",
            self.vision_timeout,
            vision.answer(&image, query),
        )
        .await
    }
}

#[async_trait]
impl RetrievalServiceInterface for RetrievalService {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        generate_answer: bool,
    ) -> Result<Retrieval> {
        let hits = self.search.search(query, &self.collection, top_k).await?;
        let pages = join_all(hits.into_iter().map(|hit| self.enrich(hit))).await;

        let mut retrieval = Retrieval {
            pages,
            answer: None,
            answer_error: None,
        };

        if generate_answer {
            match (self.vision.as_deref(), retrieval.pages.first()) {
                (Some(vision), Some(top)) => match self.answer(vision, top, query).await {
                    Ok(answer) => retrieval.answer = Some(answer),
                    Err(e) => {
                        warn!(error = %e, "Answer generation failed");
                        retrieval.answer_error = Some(e.to_string());
                    }
                },
                (None, _) => {
                    retrieval.answer_error = Some("answer generation is not enabled".to_string());
                }
                (Some(_), None) => {}
            }
        }

        info!(
            collection = %self.collection,
            hits = retrieval.pages.len(),
            answered = retrieval.answer.is_some(),
            "Retrieval completed"
        );
        Ok(retrieval)
    }

    fn answers_enabled(&self) -> bool {
        self.vision.is_some()
    }

    fn model_state(&self) -> ModelState {
        self.generator.state()
    }
}
