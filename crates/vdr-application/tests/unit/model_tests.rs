//! Tests for the Embedding Generator lifecycle

use std::sync::Arc;

use vdr_application::use_cases::{EmbeddingGenerator, ModelState};
use vdr_domain::error::Error;
use vdr_providers::embedding::NullEmbeddingProvider;

use crate::support::{KeyedEmbeddingProvider, TIMEOUT, page_image};

#[tokio::test]
async fn test_load_moves_to_ready() {
    let generator = EmbeddingGenerator::new(Arc::new(NullEmbeddingProvider::new()), TIMEOUT);
    assert_eq!(generator.state(), ModelState::Unloaded);

    generator.load().await.unwrap();
    assert_eq!(generator.state(), ModelState::Ready);

    // Loading again is a no-op
    generator.load().await.unwrap();
    assert_eq!(generator.state(), ModelState::Ready);
}

#[tokio::test]
async fn test_inference_before_load_is_rejected() {
    let generator = EmbeddingGenerator::new(Arc::new(NullEmbeddingProvider::new()), TIMEOUT);
    let err = generator.embed_query("anything").await.unwrap_err();
    assert!(matches!(err, Error::ModelLoad { .. }));
}

#[tokio::test]
async fn test_failed_load_is_terminal() {
    let provider = KeyedEmbeddingProvider {
        fail_load: true,
        ..Default::default()
    };
    let generator = EmbeddingGenerator::new(Arc::new(provider), TIMEOUT);

    let err = generator.load().await.unwrap_err();
    assert!(matches!(err, Error::ModelLoad { .. }));
    assert!(matches!(generator.state(), ModelState::Failed(ref reason) if reason.contains("weights missing")));

    // No transition out of Failed
    assert!(matches!(
        generator.load().await,
        Err(Error::ModelLoad { .. })
    ));
    assert!(matches!(
        generator.embed_images(&[page_image(1)]).await,
        Err(Error::ModelLoad { .. })
    ));
    assert_eq!(generator.state().as_str(), "failed");
}

#[tokio::test]
async fn test_dimension_mismatch_fails_the_load() {
    // Provider reports 128 but produces 16-wide vectors
    struct Mismatched(NullEmbeddingProvider);

    #[async_trait::async_trait]
    impl vdr_domain::ports::providers::EmbeddingProvider for Mismatched {
        async fn embed_images(
            &self,
            images: &[vdr_domain::value_objects::PageImage],
        ) -> vdr_domain::Result<Vec<vdr_domain::value_objects::EmbeddingVector>> {
            self.0.embed_images(images).await
        }

        async fn embed_query(
            &self,
            text: &str,
        ) -> vdr_domain::Result<vdr_domain::value_objects::EmbeddingVector> {
            self.0.embed_query(text).await
        }

        fn dimensions(&self) -> usize {
            128
        }

        fn model_name(&self) -> &str {
            "mismatched"
        }

        fn provider_name(&self) -> &str {
            "mismatched"
        }
    }

    let inner = NullEmbeddingProvider::new().with_dimensions(16);
    let generator = EmbeddingGenerator::new(Arc::new(Mismatched(inner)), TIMEOUT);
    assert!(matches!(
        generator.load().await,
        Err(Error::ModelLoad { .. })
    ));
}

#[tokio::test]
async fn test_embed_images_returns_one_vector_per_page() {
    let generator = EmbeddingGenerator::new(Arc::new(NullEmbeddingProvider::new()), TIMEOUT);
    generator.load().await.unwrap();

    let pages = [page_image(1), page_image(2), page_image(1)];
    let vectors = generator.embed_images(&pages).await.unwrap();
    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.is_multi() && v.dimensions() == 128));
    assert_eq!(vectors[0], vectors[2]);
    assert_ne!(vectors[0], vectors[1]);
}
