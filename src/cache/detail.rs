//! Cached denormalized detail views.
//!
//! A `DetailSource` knows how to load a root entity with its associations
//! and flatten the result; `DetailAssembler` puts the read-through /
//! write-through protocol around it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::TypedCache;
use crate::error::{AppError, AppResult};
use crate::models::IncludeSpec;

/// Relational side of a detail view.
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Rows loaded for one root entity
    type Graph: Send;
    /// Flattened view, also the cached payload
    type View: Serialize + DeserializeOwned + Send + Sync;

    /// The include spec whose views are shared through the cache. It also
    /// lists every association the root entity has.
    fn default_include(&self) -> IncludeSpec;

    /// `Ok(None)` when the root row does not exist.
    async fn fetch_with_includes(
        &self,
        id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<Self::Graph>>;

    fn assemble(&self, graph: Self::Graph) -> Self::View;
}

#[async_trait]
impl<S: DetailSource + ?Sized> DetailSource for Arc<S> {
    type Graph = S::Graph;
    type View = S::View;

    fn default_include(&self) -> IncludeSpec {
        (**self).default_include()
    }

    async fn fetch_with_includes(
        &self,
        id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<Self::Graph>> {
        (**self).fetch_with_includes(id, include).await
    }

    fn assemble(&self, graph: Self::Graph) -> Self::View {
        (**self).assemble(graph)
    }
}

pub struct DetailAssembler<S: DetailSource> {
    source: S,
    cache: TypedCache<S::View>,
}

impl<S: DetailSource> DetailAssembler<S> {
    pub fn new(source: S, cache: TypedCache<S::View>) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &TypedCache<S::View> {
        &self.cache
    }

    /// Returns the detail view for `id`.
    ///
    /// With no include spec (or the default one) the cached view is
    /// returned on a hit without touching the database; on a miss the view
    /// is loaded, assembled and written through. Any other include spec is
    /// served straight from the database and never cached, so the shared
    /// entry always holds the full view.
    ///
    /// An include naming an association the root entity does not have is a
    /// `BadRequest`. Otherwise only relational failures are returned.
    pub async fn get_details(
        &self,
        id: i32,
        include: Option<&IncludeSpec>,
    ) -> AppResult<Option<S::View>> {
        let default = self.source.default_include();

        if let Some(spec) = include.filter(|spec| **spec != default) {
            let foreign: Vec<&str> = spec
                .iter()
                .filter(|a| !default.contains(*a))
                .map(|a| a.as_str())
                .collect();
            if !foreign.is_empty() {
                return Err(AppError::BadRequest {
                    message: format!("Include not available here: {}", foreign.join(",")),
                });
            }

            tracing::debug!(kind = self.cache.kind(), id, include = %spec, "Uncached detail projection");
            let graph = self.source.fetch_with_includes(id, spec).await?;
            return Ok(graph.map(|g| self.source.assemble(g)));
        }

        self.cache
            .read_through(id, || async {
                let graph = self.source.fetch_with_includes(id, &default).await?;
                Ok(graph.map(|g| self.source.assemble(g)))
            })
            .await
    }

    pub async fn invalidate(&self, id: i32) {
        self.cache.invalidate_cache(id).await;
    }
}

impl<S: DetailSource + Clone> Clone for DetailAssembler<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            cache: self.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cache::typed::test_support::{FailingStore, RecordingObserver};
    use crate::cache::{CacheConnection, MemoryStore};
    use crate::error::AppError;
    use crate::models::{Association, Instruction, Recipe, RecipeDetail, RecipeGraph};

    /// In-memory relational stand-in that counts fetches.
    struct StubRecipes {
        recipes: Mutex<Vec<RecipeGraph>>,
        fetches: AtomicUsize,
        fail: bool,
    }

    impl StubRecipes {
        fn with(graphs: Vec<RecipeGraph>) -> Self {
            Self {
                recipes: Mutex::new(graphs),
                fetches: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::with(Vec::new())
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    fn full_spec() -> IncludeSpec {
        IncludeSpec::new([
            Association::Nation,
            Association::Region,
            Association::Categories,
            Association::Subcategories,
            Association::Instructions,
            Association::Aliases,
            Association::Images,
            Association::Ingredients,
        ])
    }

    #[async_trait]
    impl DetailSource for StubRecipes {
        type Graph = RecipeGraph;
        type View = RecipeDetail;

        fn default_include(&self) -> IncludeSpec {
            full_spec()
        }

        async fn fetch_with_includes(
            &self,
            id: i32,
            include: &IncludeSpec,
        ) -> AppResult<Option<RecipeGraph>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Database {
                    operation: "fetch recipe graph".to_string(),
                    source: anyhow::anyhow!("connection reset"),
                });
            }
            let found = self
                .recipes
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.recipe.id == id)
                .cloned();
            Ok(found.map(|mut graph| {
                if !include.contains(Association::Instructions) {
                    graph.instructions.clear();
                }
                graph
            }))
        }

        fn assemble(&self, graph: RecipeGraph) -> RecipeDetail {
            RecipeDetail::assemble(graph)
        }
    }

    fn graph_with_steps(id: i32, steps: &[i32]) -> RecipeGraph {
        let mut graph = RecipeGraph::new(Recipe {
            id,
            name: format!("Recipe {}", id),
            description: None,
            nation_id: None,
            prep_minutes: None,
            cook_minutes: None,
            servings: None,
        });
        graph.instructions = steps
            .iter()
            .map(|step| Instruction {
                id: *step,
                recipe_id: id,
                step: *step,
                body: format!("step {}", step),
            })
            .collect();
        graph
    }

    fn memory_assembler(
        source: StubRecipes,
    ) -> (DetailAssembler<StubRecipes>, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let conn = CacheConnection::new(
            Some(Arc::new(MemoryStore::new(100, 3600))),
            observer.clone(),
            3600,
        );
        (
            DetailAssembler::new(source, TypedCache::new("recipeDetail", conn)),
            observer,
        )
    }

    #[tokio::test]
    async fn test_instruction_order_matches_on_cold_and_warm_paths() {
        let (assembler, _) = memory_assembler(StubRecipes::with(vec![graph_with_steps(
            1,
            &[3, 1, 2],
        )]));

        let cold = assembler.get_details(1, None).await.unwrap().unwrap();
        let warm = assembler.get_details(1, None).await.unwrap().unwrap();

        assert_eq!(cold.instructions, vec!["step 1", "step 2", "step 3"]);
        assert_eq!(cold, warm);
    }

    #[tokio::test]
    async fn test_miss_writes_through_and_hit_skips_database() {
        let (assembler, _) =
            memory_assembler(StubRecipes::with(vec![graph_with_steps(1, &[1])]));

        assembler.get_details(1, None).await.unwrap();
        assembler.get_details(1, None).await.unwrap();
        assembler.get_details(1, Some(&full_spec())).await.unwrap();

        assert_eq!(assembler.source().fetches(), 1);
        assert!(assembler.cache().get_cache(1).await.is_some());
    }

    #[tokio::test]
    async fn test_hit_is_not_revalidated() {
        let (assembler, _) =
            memory_assembler(StubRecipes::with(vec![graph_with_steps(1, &[1])]));
        assembler.get_details(1, None).await.unwrap();

        assembler.source().recipes.lock().unwrap().clear();

        let stale = assembler.get_details(1, None).await.unwrap();
        assert!(stale.is_some());

        assembler.invalidate(1).await;
        assert!(assembler.get_details(1, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_not_found_leaves_cache_untouched() {
        let (assembler, _) = memory_assembler(StubRecipes::with(Vec::new()));

        assert!(assembler.get_details(404, None).await.unwrap().is_none());
        assert!(assembler.cache().get_cache(404).await.is_none());

        assembler.get_details(404, None).await.unwrap();
        assert_eq!(assembler.source().fetches(), 2);
    }

    #[tokio::test]
    async fn test_relational_failure_propagates() {
        let (assembler, _) = memory_assembler(StubRecipes::failing());

        let result = assembler.get_details(1, None).await;
        assert!(matches!(result, Err(AppError::Database { .. })));
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_database() {
        let observer = Arc::new(RecordingObserver::default());
        let conn = CacheConnection::new(Some(Arc::new(FailingStore)), observer.clone(), 3600);
        let assembler = DetailAssembler::new(
            StubRecipes::with(vec![graph_with_steps(2, &[2, 1])]),
            TypedCache::new("recipeDetail", conn),
        );

        let view = assembler.get_details(2, None).await.unwrap().unwrap();

        assert_eq!(view.instructions, vec!["step 1", "step 2"]);
        assert_eq!(observer.failure_count(), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_hits_database() {
        let assembler = DetailAssembler::new(
            StubRecipes::with(vec![graph_with_steps(1, &[1])]),
            TypedCache::new("recipeDetail", CacheConnection::disabled()),
        );

        assembler.get_details(1, None).await.unwrap();
        assembler.get_details(1, None).await.unwrap();

        assert_eq!(assembler.source().fetches(), 2);
    }

    #[tokio::test]
    async fn test_non_default_include_bypasses_cache() {
        let (assembler, _) =
            memory_assembler(StubRecipes::with(vec![graph_with_steps(1, &[2, 1])]));
        let narrow = IncludeSpec::new([Association::Nation]);

        let projected = assembler.get_details(1, Some(&narrow)).await.unwrap().unwrap();
        assert!(projected.instructions.is_empty());
        assert!(assembler.cache().get_cache(1).await.is_none());

        let full = assembler.get_details(1, None).await.unwrap().unwrap();
        assert_eq!(full.instructions, vec!["step 1", "step 2"]);

        assembler.get_details(1, Some(&narrow)).await.unwrap();
        assert_eq!(assembler.source().fetches(), 3);
    }

    #[tokio::test]
    async fn test_foreign_association_is_bad_request() {
        let (assembler, _) =
            memory_assembler(StubRecipes::with(vec![graph_with_steps(1, &[1])]));
        let wrong = IncludeSpec::new([Association::Instructions, Association::Nations]);

        match assembler.get_details(1, Some(&wrong)).await {
            Err(AppError::BadRequest { message }) => assert!(message.contains("nations")),
            other => panic!("Expected BadRequest, got {:?}", other.map(|v| v.is_some())),
        }
        assert_eq!(assembler.source().fetches(), 0);
    }

    #[tokio::test]
    async fn test_shared_source_behind_arc() {
        let source = Arc::new(StubRecipes::with(vec![graph_with_steps(1, &[1])]));
        let conn = CacheConnection::new(
            Some(Arc::new(MemoryStore::new(10, 60))),
            Arc::new(RecordingObserver::default()),
            60,
        );
        let assembler =
            DetailAssembler::new(source.clone(), TypedCache::new("recipeDetail", conn));

        assembler.get_details(1, None).await.unwrap();
        assembler.get_details(1, None).await.unwrap();

        assert_eq!(source.fetches(), 1);
    }
}
