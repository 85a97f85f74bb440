//! In-memory vector store provider implementation
//!
//! Exhaustive-scan vector storage for development and testing. Data is not
//! persisted and is lost on restart.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vdr_domain::value_objects::{
    CollectionInfo, CollectionSpec, EmbeddingVector, IndexedPoint, SearchHit,
};

/// Points of one collection, keyed by id
struct MemoryCollection {
    spec: CollectionSpec,
    points: BTreeMap<u64, IndexedPoint>,
}

/// In-memory vector store provider
///
/// Scores with cosine similarity. Multi-vectors are compared with a
/// max-similarity comparator averaged over the query sub-vectors, so an
/// exact match scores 1.0 in both modes.
#[derive(Clone)]
pub struct InMemoryVectorStoreProvider {
    collections: Arc<DashMap<String, MemoryCollection>>,
}

impl InMemoryVectorStoreProvider {
    /// Create a new in-memory vector store provider
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryVectorStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm = compute_norm(a) * compute_norm(b);
    if norm == 0.0 { 0.0 } else { dot / norm }
}

/// Late-interaction score: best document match per query row, averaged
fn max_sim(query: &[&[f32]], document: &[&[f32]]) -> f32 {
    if query.is_empty() || document.is_empty() {
        return 0.0;
    }
    let total: f32 = query
        .iter()
        .map(|q| {
            document
                .iter()
                .map(|d| cosine_similarity(q, d))
                .fold(f32::NEG_INFINITY, f32::max)
        })
        .sum();
    total / query.len() as f32
}

fn similarity(query: &EmbeddingVector, document: &EmbeddingVector) -> f32 {
    match (query, document) {
        (EmbeddingVector::Single(q), EmbeddingVector::Single(d)) => cosine_similarity(q, d),
        _ => max_sim(&query.rows(), &document.rows()),
    }
}

/// Min-heap entry for top-k selection
#[derive(Debug)]
struct ScoredItem {
    score: f32,
    id: u64,
}

impl PartialEq for ScoredItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredItem {
    // Reversed so BinaryHeap pops the worst item; lower ids win ties
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[async_trait]
impl VectorStoreAdmin for InMemoryVectorStoreProvider {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.contains_key(name))
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let mut infos: Vec<CollectionInfo> = self
            .collections
            .iter()
            .map(|entry| {
                CollectionInfo::new(
                    entry.key().clone(),
                    Some(entry.points.len() as u64),
                    Some(entry.spec.vector_size),
                    self.provider_name(),
                )
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn count_points(&self, collection: &str) -> Result<u64> {
        self.collections
            .get(collection)
            .map(|c| c.points.len() as u64)
            .ok_or_else(|| Error::collection_not_found(collection))
    }

    async fn next_free_id(&self, collection: &str) -> Result<u64> {
        self.collections
            .get(collection)
            .map(|c| c.points.last_key_value().map_or(0, |(id, _)| id + 1))
            .ok_or_else(|| Error::collection_not_found(collection))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStoreProvider {
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()> {
        match self.collections.entry(spec.name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::collection_exists(&spec.name))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(MemoryCollection {
                    spec: spec.clone(),
                    points: BTreeMap::new(),
                });
                Ok(())
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::collection_not_found(name))
    }

    async fn upsert_points(&self, collection: &str, points: &[IndexedPoint]) -> Result<()> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::collection_not_found(collection))?;

        let vector_size = coll.spec.vector_size;
        if let Some(bad) = points
            .iter()
            .find(|p| p.vector.rows().iter().any(|row| row.len() != vector_size))
        {
            return Err(Error::invalid_argument(format!(
                "point {} does not match vector size {vector_size} of collection '{collection}'",
                bad.id
            )));
        }

        for point in points {
            coll.points.insert(point.id, point.clone());
        }
        Ok(())
    }

    async fn query_points(
        &self,
        collection: &str,
        query: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| Error::collection_not_found(collection))?;

        if limit == 0 {
            return Ok(Vec::new());
        }

        // Min-heap top-k: O(n log k)
        let mut heap: BinaryHeap<ScoredItem> = BinaryHeap::with_capacity(limit + 1);
        for point in coll.points.values() {
            heap.push(ScoredItem {
                score: similarity(query, &point.vector),
                id: point.id,
            });
            if heap.len() > limit {
                heap.pop();
            }
        }

        let mut items = heap.into_vec();
        items.sort();

        Ok(items
            .into_iter()
            .filter_map(|item| {
                coll.points.get(&item.id).map(|point| SearchHit {
                    id: point.id,
                    score: item.score,
                    payload: point.payload.clone(),
                })
            })
            .collect())
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use vdr_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};

fn memory_factory(
    _config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    Ok(Arc::new(InMemoryVectorStoreProvider::new()))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static MEMORY_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "memory",
    description: "In-memory exhaustive-scan store (development and testing)",
    factory: memory_factory,
};
