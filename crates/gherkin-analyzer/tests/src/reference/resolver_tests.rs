    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{
        dialect::{DialectId, StepDialect, expression::PatternCache},
        host::ScopeId,
        reference::{
            span,
            step_def::{DeclarationHandle, StepDefinition},
        },
        vfs::FileId,
    };

    struct StubHost {
        scope: Option<ScopeId>,
    }

    impl ResolveHost for StubHost {
        fn modification_stamp(&self) -> u64 {
            1
        }

        fn enclosing_scope(
            &self,
            _occurrence: &StepOccurrence,
        ) -> Option<ScopeId> {
            self.scope.clone()
        }
    }

    struct StubDialect {
        id: DialectId,
        definitions: Vec<StepDefinition>,
        supported: bool,
        loads: Arc<AtomicUsize>,
        comparisons: Arc<AtomicUsize>,
        patterns: PatternCache,
    }

    impl StubDialect {
        fn new(
            id: DialectId,
            definitions: Vec<StepDefinition>,
        ) -> Self {
            Self {
                id,
                definitions,
                supported: true,
                loads: Arc::new(AtomicUsize::new(0)),
                comparisons: Arc::new(AtomicUsize::new(0)),
                patterns: PatternCache::new(),
            }
        }
    }

    impl StepDialect for StubDialect {
        fn id(&self) -> DialectId {
            self.id
        }

        fn step_text(
            &self,
            occurrence: &StepOccurrence,
        ) -> Option<String> {
            span::reference_text(occurrence).map(str::to_owned)
        }

        fn load_definitions(
            &self,
            _document: &FileId,
            _scope: &ScopeId,
        ) -> Vec<StepDefinition> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.definitions.clone()
        }

        fn supports(
            &self,
            _occurrence: &StepOccurrence,
        ) -> bool {
            self.supported
        }

        fn matches(
            &self,
            definition: &StepDefinition,
            step_text: &str,
        ) -> bool {
            self.comparisons.fetch_add(1, Ordering::SeqCst);
            self.patterns.matches(&definition.pattern, step_text)
        }
    }

    fn declaration(name: &str) -> DeclarationHandle {
        DeclarationHandle {
            file: FileId::new("mem://steps.rs"),
            line: 1,
            name: name.to_owned(),
        }
    }

    fn definition(
        id: DialectId,
        pattern: &str,
        decl: DeclarationHandle,
    ) -> StepDefinition {
        StepDefinition {
            dialect: id,
            pattern: pattern.to_owned(),
            declaration: decl,
        }
    }

    fn occurrence(text: &str) -> StepOccurrence {
        StepOccurrence::parse(FileId::new("mem://cart.feature"), 0, text)
    }

    fn host() -> StubHost {
        StubHost {
            scope: Some(ScopeId::new("steps")),
        }
    }

    fn resolve(
        host: &StubHost,
        registry: &DialectRegistry,
        occurrence: &StepOccurrence,
    ) -> Result<ResolutionResult, Cancelled> {
        let index = DefinitionIndex::new();
        resolve_occurrence(host, registry, &index, occurrence, 1, &CancellationToken::new())
    }

    #[test]
    fn matching_dialect_wins_over_non_matching_one() {
        let a = DialectId::new("a");
        let b = DialectId::new("b");
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(StubDialect::new(a, vec![definition(
            a,
            "I buy {int} apples",
            declaration("buy_apples"),
        )])));
        registry.register(Arc::new(StubDialect::new(b, vec![definition(
            b,
            "/I sell .*/",
            declaration("sell_anything"),
        )])));

        let resolved = resolve(&host(), &registry, &occurrence("Given I buy 3 apples")).expect("resolution");

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.declarations()[0].name, "buy_apples");
    }

    #[test]
    fn duplicate_declarations_collapse_to_one() {
        let a = DialectId::new("a");
        let b = DialectId::new("b");
        let shared = declaration("shared_step");
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(StubDialect::new(a, vec![definition(a, "I pay", shared.clone())])));
        registry.register(Arc::new(StubDialect::new(b, vec![definition(b, "/^I pay$/", shared.clone())])));

        let resolved = resolve(&host(), &registry, &occurrence("When I pay")).expect("resolution");

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.declarations()[0], shared);
    }

    #[test]
    fn no_scope_short_circuits_before_loading_definitions() {
        let id = DialectId::new("a");
        let dialect = StubDialect::new(id, vec![definition(id, "I pay", declaration("pay"))]);
        let loads = Arc::clone(&dialect.loads);
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(dialect));

        let no_scope = StubHost {
            scope: None,
        };
        let resolved = resolve(&no_scope, &registry, &occurrence("When I pay")).expect("resolution");

        assert!(resolved.is_empty());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_step_text_short_circuits_before_loading_definitions() {
        let id = DialectId::new("a");
        let dialect = StubDialect::new(id, vec![definition(id, "I pay", declaration("pay"))]);
        let loads = Arc::clone(&dialect.loads);
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(dialect));

        let resolved = resolve(&host(), &registry, &occurrence("Given")).expect("resolution");

        assert!(resolved.is_empty());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsupported_dialect_is_skipped_without_comparisons() {
        let id = DialectId::new("a");
        let mut dialect = StubDialect::new(id, vec![definition(id, "I pay", declaration("pay"))]);
        dialect.supported = false;
        let comparisons = Arc::clone(&dialect.comparisons);
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(dialect));

        let resolved = resolve(&host(), &registry, &occurrence("When I pay")).expect("resolution");

        assert!(resolved.is_empty());
        assert_eq!(comparisons.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unregistered_dialect_tag_is_skipped() {
        let a = DialectId::new("a");
        let rogue = DialectId::new("rogue");
        // A definition tagged with a dialect nobody registered.
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(StubDialect::new(a, vec![definition(
            rogue,
            "I pay",
            declaration("pay"),
        )])));

        let resolved = resolve(&host(), &registry, &occurrence("When I pay")).expect("resolution");

        assert!(resolved.is_empty());
    }

    #[test]
    fn cancellation_aborts_before_any_comparison() {
        let id = DialectId::new("a");
        let dialect = StubDialect::new(id, vec![definition(id, "I pay", declaration("pay"))]);
        let comparisons = Arc::clone(&dialect.comparisons);
        let mut registry = DialectRegistry::new();
        registry.register(Arc::new(dialect));

        let index = DefinitionIndex::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = resolve_occurrence(&host(), &registry, &index, &occurrence("When I pay"), 1, &cancel);

        assert_eq!(outcome, Err(Cancelled));
        assert_eq!(comparisons.load(Ordering::SeqCst), 0);
    }
