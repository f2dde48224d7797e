use line_diff::{compare, AnnotatedLine, Comparison};
use proptest::prelude::*;

fn lines() -> impl Strategy<Value = Vec<String>> {
    // Small alphabet so that common, similar and unrelated lines all show up
    prop::collection::vec("[ab c]{0,6}", 0..8)
}

fn strip_tags(text: &str) -> String {
    text.replace("<removed>", "")
        .replace("</removed>", "")
        .replace("<added>", "")
        .replace("</added>", "")
}

/// Original lines recovered from one output column, in output order
fn recovered(column: &[AnnotatedLine]) -> Vec<(usize, String)> {
    column
        .iter()
        .filter_map(|line| line.source.map(|index| (index, strip_tags(&line.text))))
        .collect()
}

fn expected(lines: &[String]) -> Vec<(usize, String)> {
    lines.iter().cloned().enumerate().collect()
}

proptest! {
    #[test]
    fn every_line_appears_once_in_order(left in lines(), right in lines()) {
        let result: Comparison = compare(&left, &right).unwrap();

        prop_assert!(result.left.len() >= left.len());
        prop_assert!(result.right.len() >= right.len());
        prop_assert_eq!(recovered(&result.left), expected(&left));
        prop_assert_eq!(recovered(&result.right), expected(&right));
    }

    #[test]
    fn placeholders_are_empty(left in lines(), right in lines()) {
        let result = compare(&left, &right).unwrap();

        for line in result.left.iter().chain(&result.right) {
            if line.is_placeholder() {
                prop_assert!(line.text.is_empty());
                prop_assert!(line.source.is_none());
            }
        }
    }

    #[test]
    fn compare_is_deterministic(left in lines(), right in lines()) {
        prop_assert_eq!(compare(&left, &right).unwrap(), compare(&left, &right).unwrap());
    }

    #[test]
    fn identical_inputs_are_unchanged(lines in lines()) {
        let result = compare(&lines, &lines).unwrap();

        prop_assert!(!result.has_changes());
        prop_assert_eq!(result.left_texts(), result.right_texts());
    }
}
