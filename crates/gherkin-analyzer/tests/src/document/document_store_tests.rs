    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(ScopeId::new("steps"))
    }

    #[test]
    fn stamp_advances_on_every_structural_change() {
        let store = store();
        assert_eq!(store.modification_stamp(), 0);

        let file = FileId::new("mem://a.feature");
        store.open(file.clone(), "Given a basket\n".to_owned());
        assert_eq!(store.modification_stamp(), 1);

        store.update(file.clone(), "Given a bigger basket\n".to_owned());
        assert_eq!(store.modification_stamp(), 2);

        store.close(&file);
        assert_eq!(store.modification_stamp(), 3);
    }

    #[test]
    fn update_replaces_the_parsed_steps() {
        let store = store();
        let file = FileId::new("mem://a.feature");
        store.open(file.clone(), "Given a basket\n".to_owned());
        store.update(file.clone(), "When I pay\nThen I leave\n".to_owned());

        let document = store.get(&file).expect("document");
        assert_eq!(document.steps().len(), 2);
    }

    #[test]
    fn scope_exists_only_for_tracked_documents() {
        let store = store();
        let document = store.open(FileId::new("mem://a.feature"), "Given a basket\n".to_owned());
        let step = &document.steps()[0];
        assert_eq!(store.enclosing_scope(step), Some(ScopeId::new("steps")));

        let foreign = StepOccurrence::parse(FileId::new("mem://other.feature"), 0, "Given a basket");
        assert_eq!(store.enclosing_scope(&foreign), None);

        store.close(document.file());
        assert_eq!(store.enclosing_scope(step), None);
    }
