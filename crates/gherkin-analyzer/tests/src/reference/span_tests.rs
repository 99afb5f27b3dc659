    use super::*;
    use crate::vfs::FileId;

    fn occurrence(text: &str) -> StepOccurrence {
        StepOccurrence::parse(FileId::new("mem://cart.feature"), 0, text)
    }

    #[test]
    fn excludes_keyword_and_trailing_whitespace() {
        let step = occurrence("Given I buy 3 apples   ");
        let range = reference_span(&step).expect("span");
        assert_eq!(step.slice(range), "I buy 3 apples");
    }

    #[test]
    fn keeps_internal_whitespace_and_parameters() {
        let step = occurrence("When I buy <count>  apples");
        let range = reference_span(&step).expect("span");
        assert_eq!(step.slice(range), "I buy <count>  apples");
    }

    #[test]
    fn stops_before_trailing_comment() {
        let step = occurrence("Then the basket is full # paid in cash");
        assert_eq!(reference_text(&step), Some("the basket is full"));
    }

    #[test]
    fn star_keyword_is_excluded_like_the_others() {
        let step = occurrence("* I pay");
        assert_eq!(reference_text(&step), Some("I pay"));
    }

    #[test]
    fn keyword_only_step_has_no_span() {
        assert_eq!(reference_span(&occurrence("Given")), None);
        assert_eq!(reference_span(&occurrence("Given   ")), None);
        assert_eq!(reference_span(&occurrence("")), None);
    }

    #[test]
    fn span_is_local_to_the_step() {
        let step = StepOccurrence::parse(FileId::new("mem://cart.feature"), 120, "And I pay");
        let range = reference_span(&step).expect("span");
        assert_eq!(range, TextRange::new(4, 9));
    }
