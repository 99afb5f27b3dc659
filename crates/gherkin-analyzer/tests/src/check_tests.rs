    use super::*;

    use tempfile::TempDir;

    fn write(
        root: &Path,
        rel: &str,
        content: &str,
    ) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture dirs");
        }
        std::fs::write(path, content).expect("write fixture");
    }

    fn fixture_tree() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        write(
            dir.path(),
            "features/shopping.feature",
            r#"Feature: Shopping

  Scenario: Buy apples
    Given a basket
    When I buy 3 apples
    Then the total is 9
    And something nobody implemented
"#,
        );
        write(
            dir.path(),
            "steps/shop_steps.rs",
            r#"use cucumber::{given, when};

#[given("a basket")]
fn basket(world: &mut ShopWorld) {}

#[when(expr = "I buy {int} apples")]
async fn buy_apples(world: &mut ShopWorld, count: u32) {}
"#,
        );
        write(
            dir.path(),
            "steps/totals.steps.js",
            r#"const { Then } = require('@cucumber/cucumber');

Then('the total is {int}', function (total) {});
"#,
        );
        dir
    }

    #[test]
    fn reports_every_step_with_its_status() {
        let dir = fixture_tree();
        let report = run_check(
            &dir.path().join("features"),
            &dir.path().join("steps"),
            &DialectToggles::default(),
        )
        .expect("check");

        assert_eq!(report.resolved, 3);
        assert_eq!(report.ambiguous, 0);
        assert_eq!(report.unresolved, 1);
        assert!(!report.is_clean());

        let steps = &report.files[0].steps;
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].status, StepStatus::Resolved);
        assert_eq!(steps[0].declarations[0].name, "basket");
        assert_eq!(steps[1].status, StepStatus::Resolved);
        assert_eq!(steps[1].declarations[0].name, "buy_apples");
        assert_eq!(steps[2].status, StepStatus::Resolved);
        assert_eq!(steps[3].status, StepStatus::Unresolved);
        assert!(steps[3].declarations.is_empty());
    }

    #[test]
    fn dialects_can_be_disabled() {
        let dir = fixture_tree();
        let toggles = DialectToggles {
            rust: true,
            js: false,
        };
        let report = run_check(&dir.path().join("features"), &dir.path().join("steps"), &toggles).expect("check");

        // The JS-implemented total step is now unresolved too.
        assert_eq!(report.resolved, 2);
        assert_eq!(report.unresolved, 2);
    }

    #[test]
    fn two_dialects_defining_one_step_is_ambiguous() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "features/pay.feature", "Feature: Pay\n\n  Scenario: Pay\n    When I pay\n");
        write(dir.path(), "steps/pay_steps.rs", "#[when(\"I pay\")]\nfn pay(world: &mut World) {}\n");
        write(dir.path(), "steps/pay.steps.js", "When('I pay', function () {});\n");

        let report = run_check(
            &dir.path().join("features"),
            &dir.path().join("steps"),
            &DialectToggles::default(),
        )
        .expect("check");

        assert_eq!(report.ambiguous, 1);
        assert_eq!(report.files[0].steps[0].declarations.len(), 2);
        assert!(report.is_clean());
    }

    #[test]
    fn missing_feature_tree_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let outcome = run_check(
            &dir.path().join("features"),
            &dir.path().join("steps"),
            &DialectToggles::default(),
        );
        assert!(matches!(outcome, Err(CheckError::NoFeatures(_))));
    }

    #[test]
    fn list_definitions_spans_all_enabled_dialects() {
        let dir = fixture_tree();
        let definitions = list_definitions(&dir.path().join("steps"), &DialectToggles::default());

        assert_eq!(definitions.len(), 3);
        let rust_count = definitions.iter().filter(|d| d.dialect.as_str() == "rust").count();
        let js_count = definitions.iter().filter(|d| d.dialect.as_str() == "js").count();
        assert_eq!(rust_count, 2);
        assert_eq!(js_count, 1);
    }
