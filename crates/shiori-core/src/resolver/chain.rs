//! # Resolution Chain
//!
//! Holds the registered resolvers sorted by priority and dispatches each
//! candidate to them in order. The first resolver that accepts wins; the rest
//! are not consulted.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::error::{Result, ShioriError};
use crate::naming::TvNaming;
use crate::types::{Item, ItemType, ResolveContext};

use super::{
    FolderResolver, ItemInitializer, MovieResolver, ResolverPriority, SeasonResolver,
    SeriesResolver,
};

/// A registered resolver and the priority it runs at.
pub struct ResolverDescriptor {
    priority: ResolverPriority,
    resolver: Box<dyn FolderResolver>,
}

impl ResolverDescriptor {
    pub fn priority(&self) -> ResolverPriority {
        self.priority
    }

    pub fn item_type(&self) -> ItemType {
        self.resolver.item_type()
    }

    pub fn name(&self) -> &'static str {
        self.resolver.name()
    }
}

impl std::fmt::Debug for ResolverDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverDescriptor")
            .field("name", &self.name())
            .field("item_type", &self.item_type())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Priority-ordered, first-match-wins resolver dispatch.
pub struct ResolutionChain {
    descriptors: Vec<ResolverDescriptor>,
    initializer: ItemInitializer,
}

impl ResolutionChain {
    /// Start an empty chain that initializes accepted items with `initializer`.
    pub fn builder(initializer: ItemInitializer) -> ResolutionChainBuilder {
        ResolutionChainBuilder {
            descriptors: Vec::new(),
            initializer,
        }
    }

    /// The standard chain: season, series and (unless disabled) movie resolvers.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::InvalidConfig` if `config` does not validate, or
    /// `ShioriError::RegexError` if the naming patterns fail to compile.
    pub fn with_defaults(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;

        let naming = Arc::new(TvNaming::new(config)?);

        let mut builder = Self::builder(ItemInitializer::new(naming.clone()))
            .register(SeasonResolver::new(naming.clone()))
            .register(
                SeriesResolver::new(naming.clone()).with_naming_heuristic(config.naming_heuristic),
            );

        if config.movies {
            builder = builder.register(MovieResolver::new(naming));
        }

        builder.build()
    }

    /// Registered resolvers in evaluation order.
    pub fn descriptors(&self) -> &[ResolverDescriptor] {
        &self.descriptors
    }

    /// Returns the type of the first resolver that accepts `context`.
    #[must_use]
    pub fn classify(&self, context: &ResolveContext) -> Option<ItemType> {
        for descriptor in &self.descriptors {
            if let Some(item_type) = descriptor.resolver.try_classify(context) {
                debug!(
                    resolver = descriptor.name(),
                    priority = %descriptor.priority,
                    %item_type,
                    path = %context.path().display(),
                    "classified"
                );
                return Some(item_type);
            }
            trace!(resolver = descriptor.name(), path = %context.path().display(), "rejected");
        }
        None
    }

    /// Classifies `context` and returns the initialized item, or `None` for a
    /// plain folder.
    #[must_use]
    pub fn resolve(&self, context: &ResolveContext) -> Option<Item> {
        let item_type = self.classify(context)?;
        Some(self.initializer.initialize(Item::new(item_type), context))
    }
}

/// Collects resolvers for a [`ResolutionChain`].
pub struct ResolutionChainBuilder {
    descriptors: Vec<ResolverDescriptor>,
    initializer: ItemInitializer,
}

impl ResolutionChainBuilder {
    /// Register a resolver at its own default priority.
    pub fn register(self, resolver: impl FolderResolver + 'static) -> Self {
        let priority = resolver.priority();
        self.register_with_priority(resolver, priority)
    }

    /// Register a resolver at an explicit priority.
    pub fn register_with_priority(
        mut self,
        resolver: impl FolderResolver + 'static,
        priority: ResolverPriority,
    ) -> Self {
        self.descriptors.push(ResolverDescriptor {
            priority,
            resolver: Box::new(resolver),
        });
        self
    }

    /// Sorts resolvers by priority; equal priorities keep registration order.
    ///
    /// # Errors
    ///
    /// Returns `ShioriError::DuplicateItemType` if two resolvers produce the
    /// same item type.
    pub fn build(mut self) -> Result<ResolutionChain> {
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.item_type()) {
                return Err(ShioriError::DuplicateItemType(descriptor.item_type()));
            }
        }

        self.descriptors.sort_by_key(|d| d.priority);

        Ok(ResolutionChain {
            descriptors: self.descriptors,
            initializer: self.initializer,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::{FileEntry, ItemId, MetadataProvider, ParentRef};

    /// Resolver stub with a fixed answer that counts its invocations.
    struct StubResolver {
        item_type: ItemType,
        priority: ResolverPriority,
        accept: bool,
        calls: Arc<AtomicUsize>,
    }

    impl StubResolver {
        fn new(item_type: ItemType, priority: ResolverPriority, accept: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let stub = Self {
                item_type,
                priority,
                accept,
                calls: calls.clone(),
            };
            (stub, calls)
        }
    }

    impl FolderResolver for StubResolver {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn item_type(&self) -> ItemType {
            self.item_type
        }

        fn priority(&self) -> ResolverPriority {
            self.priority
        }

        fn try_classify(&self, _context: &ResolveContext) -> Option<ItemType> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.accept.then_some(self.item_type)
        }
    }

    fn initializer() -> ItemInitializer {
        ItemInitializer::new(Arc::new(TvNaming::new(&ResolverConfig::default()).unwrap()))
    }

    fn default_chain() -> ResolutionChain {
        ResolutionChain::with_defaults(&ResolverConfig::default()).unwrap()
    }

    fn collection() -> ParentRef {
        ParentRef::Folder(ItemId(1))
    }

    #[test]
    fn lower_priority_number_wins_and_shadows_the_rest() {
        let (movie, movie_calls) = StubResolver::new(ItemType::Movie, ResolverPriority::THIRD, true);
        let (series, series_calls) = StubResolver::new(ItemType::Series, ResolverPriority::FIRST, true);

        // Registered out of order on purpose.
        let chain = ResolutionChain::builder(initializer())
            .register(movie)
            .register(series)
            .build()
            .unwrap();

        let ctx = ResolveContext::directory("/lib/Anything").with_parent(collection());
        assert_eq!(chain.classify(&ctx), Some(ItemType::Series));
        assert_eq!(series_calls.load(Ordering::SeqCst), 1);
        assert_eq!(movie_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rejection_falls_through_to_next_resolver() {
        let (season, season_calls) = StubResolver::new(ItemType::Season, ResolverPriority::FIRST, false);
        let (movie, movie_calls) = StubResolver::new(ItemType::Movie, ResolverPriority::SECOND, true);

        let chain = ResolutionChain::builder(initializer())
            .register(season)
            .register(movie)
            .build()
            .unwrap();

        let ctx = ResolveContext::directory("/lib/Anything").with_parent(collection());
        let item = chain.resolve(&ctx).unwrap();
        assert_eq!(item.item_type, ItemType::Movie);
        assert_eq!(season_calls.load(Ordering::SeqCst), 1);
        assert_eq!(movie_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let (a, _) = StubResolver::new(ItemType::Movie, ResolverPriority::SECOND, true);
        let (b, b_calls) = StubResolver::new(ItemType::Series, ResolverPriority::SECOND, true);

        let chain = ResolutionChain::builder(initializer())
            .register(a)
            .register(b)
            .build()
            .unwrap();

        let ctx = ResolveContext::directory("/lib/Anything").with_parent(collection());
        assert_eq!(chain.classify(&ctx), Some(ItemType::Movie));
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_priority_overrides_default() {
        let (series, _) = StubResolver::new(ItemType::Series, ResolverPriority::FIRST, true);
        let (movie, _) = StubResolver::new(ItemType::Movie, ResolverPriority::THIRD, true);

        let chain = ResolutionChain::builder(initializer())
            .register_with_priority(series, ResolverPriority::LAST)
            .register(movie)
            .build()
            .unwrap();

        let order: Vec<ItemType> = chain.descriptors().iter().map(|d| d.item_type()).collect();
        assert_eq!(order, vec![ItemType::Movie, ItemType::Series]);
    }

    #[test]
    fn duplicate_item_types_are_rejected() {
        let (a, _) = StubResolver::new(ItemType::Series, ResolverPriority::FIRST, true);
        let (b, _) = StubResolver::new(ItemType::Series, ResolverPriority::SECOND, true);

        let result = ResolutionChain::builder(initializer())
            .register(a)
            .register(b)
            .build();
        assert!(matches!(
            result,
            Err(ShioriError::DuplicateItemType(ItemType::Series))
        ));
    }

    #[test]
    fn default_chain_order() {
        let chain = default_chain();
        let order: Vec<(ItemType, ResolverPriority)> = chain
            .descriptors()
            .iter()
            .map(|d| (d.item_type(), d.priority()))
            .collect();
        assert_eq!(
            order,
            vec![
                (ItemType::Season, ResolverPriority::FIRST),
                (ItemType::Series, ResolverPriority::SECOND),
                (ItemType::Movie, ResolverPriority::THIRD),
            ]
        );
    }

    #[test]
    fn movies_can_be_disabled() {
        let chain = ResolutionChain::with_defaults(&ResolverConfig::new().with_movies(false)).unwrap();
        assert!(chain.descriptors().iter().all(|d| d.item_type() != ItemType::Movie));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ResolverConfig::new().with_video_extensions(Vec::<String>::new());
        assert!(matches!(
            ResolutionChain::with_defaults(&config),
            Err(ShioriError::InvalidConfig(_))
        ));
    }

    #[test]
    fn series_with_tvdb_marker_resolves_with_provider_id() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/tv/Show Name [tvdbid=12345]").with_parent(collection());

        let item = chain.resolve(&ctx).unwrap();
        assert_eq!(item.item_type, ItemType::Series);
        assert_eq!(item.provider_ids.get("Tvdb").map(String::as_str), Some("12345"));
    }

    #[test]
    fn series_xml_resolves_without_provider_ids() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/tv/Show Name")
            .with_parent(collection())
            .with_metadata_files(["SERIES.XML"]);

        let item = chain.resolve(&ctx).unwrap();
        assert_eq!(item.item_type, ItemType::Series);
        assert!(item.provider_ids.is_empty());
    }

    #[test]
    fn random_folder_resolves_to_nothing() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/tv/Random Folder")
            .with_parent(collection())
            .with_children([FileEntry::file("notes.txt")]);
        assert!(chain.resolve(&ctx).is_none());
    }

    #[test]
    fn season_under_series_is_not_a_series() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/tv/Show/Season 1")
            .with_parent(ParentRef::Item {
                id: ItemId(5),
                item_type: ItemType::Series,
            })
            .with_children([FileEntry::file("Show.S01E01.mkv")]);

        let item = chain.resolve(&ctx).unwrap();
        assert_eq!(item.item_type, ItemType::Season);
        assert_eq!(item.index_number, Some(1));
    }

    #[test]
    fn series_shaped_folder_beats_movie() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/media/Show")
            .with_parent(collection())
            .with_children([
                FileEntry::file("Show.S01E01.mkv"),
                FileEntry::file("Show.S01E02.mkv"),
            ]);
        assert_eq!(chain.classify(&ctx), Some(ItemType::Series));
    }

    #[test]
    fn movie_folder_resolves() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/movies/The Matrix (1999) [imdbid=tt0133093]")
            .with_parent(collection())
            .with_children([FileEntry::file("The Matrix (1999).mkv")]);

        let item = chain.resolve(&ctx).unwrap();
        assert_eq!(item.item_type, ItemType::Movie);
        assert_eq!(item.name, "The Matrix");
        assert_eq!(item.production_year, Some(1999));
        assert_eq!(item.provider_id(MetadataProvider::Imdb), Some("tt0133093"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let chain = default_chain();
        let ctx = ResolveContext::directory("/tv/Show Name [tvdbid=12345]")
            .with_parent(collection())
            .with_metadata_files(["series.xml", "folder.jpg"])
            .with_children([FileEntry::dir("Season 1"), FileEntry::dir("Season 2")]);

        let first = chain.resolve(&ctx).unwrap();
        let second = chain.resolve(&ctx).unwrap();
        assert_eq!(first.item_type, second.item_type);
        assert_eq!(first.provider_ids, second.provider_ids);
        assert_eq!(first, second);
    }

    #[test]
    fn non_directory_and_top_level_resolve_to_nothing() {
        let chain = default_chain();

        let ctx = ResolveContext::file("/tv/Show [tvdbid=1].mkv").with_parent(collection());
        assert!(chain.resolve(&ctx).is_none());

        let ctx = ResolveContext::directory("/tv")
            .with_parent(ParentRef::Root)
            .with_metadata_files(["series.xml"])
            .with_children([FileEntry::dir("Season 1"), FileEntry::file("movie.mkv")]);
        assert!(chain.resolve(&ctx).is_none());
    }

    #[test]
    fn chain_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolutionChain>();
    }
}
