    use expect_test::expect;

    use super::*;

    #[test]
    fn literal_expression_matches_exactly() {
        let re = compile_pattern("I pay").expect("regex");
        assert!(re.is_match("I pay"));
        assert!(!re.is_match("I pay twice"));
        assert!(!re.is_match("then I pay"));
    }

    #[test]
    fn int_parameter() {
        let re = compile_pattern("I buy {int} apples").expect("regex");
        assert!(re.is_match("I buy 3 apples"));
        assert!(re.is_match("I buy -12 apples"));
        assert!(!re.is_match("I buy three apples"));
    }

    #[test]
    fn float_word_and_string_parameters() {
        let re = compile_pattern("{word} costs {float}").expect("regex");
        assert!(re.is_match("bread costs 1.25"));
        assert!(re.is_match("milk costs 2"));
        assert!(!re.is_match("two words costs 1.25"));

        let re = compile_pattern("I search for {string}").expect("regex");
        assert!(re.is_match("I search for \"green apples\""));
        assert!(re.is_match("I search for 'green apples'"));
        assert!(!re.is_match("I search for green apples"));
    }

    #[test]
    fn anonymous_parameter_matches_anything() {
        let re = compile_pattern("I see {}").expect("regex");
        assert!(re.is_match("I see a basket full of apples"));
    }

    #[test]
    fn optional_text() {
        let re = compile_pattern("I have 2 cucumber(s)").expect("regex");
        assert!(re.is_match("I have 2 cucumber"));
        assert!(re.is_match("I have 2 cucumbers"));
        assert!(!re.is_match("I have 2 cucumberss"));
    }

    #[test]
    fn alternation() {
        let re = compile_pattern("I have a cat/dog in my basket").expect("regex");
        assert!(re.is_match("I have a cat in my basket"));
        assert!(re.is_match("I have a dog in my basket"));
        assert!(!re.is_match("I have a catdog in my basket"));
    }

    #[test]
    fn escaped_braces_are_literal() {
        let re = compile_pattern(r"I press \{int\}").expect("regex");
        assert!(re.is_match("I press {int}"));
        assert!(!re.is_match("I press 3"));
    }

    #[test]
    fn slash_delimited_patterns_are_raw_regexes() {
        let re = compile_pattern(r"/^I sell (\d+) apples$/").expect("regex");
        assert!(re.is_match("I sell 4 apples"));
        assert!(!re.is_match("I buy 4 apples"));
    }

    #[test]
    fn unknown_parameter_type_compiles_to_nothing() {
        assert!(compile_pattern("I see a {color} basket").is_none());
    }

    #[test]
    fn unterminated_parameter_compiles_to_nothing() {
        assert!(compile_pattern("I buy {int apples").is_none());
    }

    #[test]
    fn translated_regex_source() {
        let source = expression_to_regex("I buy {int} apples").expect("source");
        expect![[r#"^I buy -?\d+ apples$"#]].assert_eq(&source);

        let source = expression_to_regex("I have a cat/dog").expect("source");
        expect![[r#"^I have a (?:cat|dog)$"#]].assert_eq(&source);
    }

    #[test]
    fn cache_remembers_failures_and_hits() {
        let cache = PatternCache::new();
        assert!(cache.matches("I buy {int} apples", "I buy 3 apples"));
        assert!(cache.matches("I buy {int} apples", "I buy 4 apples"));
        assert!(!cache.matches("{broken", "anything"));
        assert!(!cache.matches("{broken", "anything else"));
    }
