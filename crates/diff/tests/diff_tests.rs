use line_diff::{
    align, compare, extract_ranges, insert_tags, ndiff, CompareConfig, DiffToken, Differ,
    HighlightRange, LineDiffer, LineStatus, Markers, TagPair,
};
use pretty_assertions::assert_eq;

const NONE: [&str; 0] = [];

#[test]
fn test_extract_ranges() {
    let ranges = extract_ranges("  ++--^^ ");

    assert_eq!(
        ranges,
        vec![
            HighlightRange::new(2, 3),
            HighlightRange::new(4, 5),
            HighlightRange::new(6, 7),
        ]
    );
    assert!(extract_ranges("no markers here").is_empty());
}

#[test]
fn test_insert_tags() {
    let tags = TagPair::new("<<", ">>");

    let one = insert_tags("hello", &[HighlightRange::new(1, 2)], &tags).unwrap();
    assert_eq!(one, "h<<el>>lo");

    let two = insert_tags(
        "hello",
        &[HighlightRange::new(0, 0), HighlightRange::new(2, 2)],
        &tags,
    )
    .unwrap();
    assert_eq!(two, "<<h>>e<<l>>lo");
}

#[test]
fn test_changed_line_from_token_stream() {
    // Hand-built stream marking the whole last word of each line
    let tokens = vec![
        DiffToken::Removed("cat sat"),
        DiffToken::Hint("    ^^^".to_string()),
        DiffToken::Added("cat mat"),
        DiffToken::Hint("    ^^^".to_string()),
    ];

    let result = align(&tokens, &["cat sat"], &["cat mat"], &Markers::xml()).unwrap();

    assert_eq!(result.left_texts(), vec!["cat <removed>sat</removed>"]);
    assert_eq!(result.right_texts(), vec!["cat <added>mat</added>"]);
}

#[test]
fn test_changed_line_end_to_end() {
    let result = compare(&["cat sat"], &["cat mat"]).unwrap();

    assert_eq!(result.left_texts(), vec!["cat <removed>s</removed>at"]);
    assert_eq!(result.right_texts(), vec!["cat <added>m</added>at"]);
    assert_eq!(result.left[0].status, LineStatus::Changed);
    assert_eq!(result.right[0].status, LineStatus::Changed);
    assert_eq!(result.removed_lines(), 1);
    assert_eq!(result.added_lines(), 1);
}

#[test]
fn test_pure_insertion() {
    let result = compare(&NONE, &["new"]).unwrap();

    assert_eq!(result.left_texts(), vec![""]);
    assert_eq!(result.right_texts(), vec!["<added>new</added>"]);
    assert!(result.left[0].is_placeholder());
    assert_eq!(result.right[0].source, Some(0));
}

#[test]
fn test_pure_deletion() {
    let result = compare(&["gone"], &NONE).unwrap();

    assert_eq!(result.left_texts(), vec!["<removed>gone</removed>"]);
    assert_eq!(result.right_texts(), vec![""]);
    assert_eq!(result.left[0].status, LineStatus::Removed);
}

#[test]
fn test_consecutive_deletions() {
    let result = compare(&["keep", "drop one", "drop two"], &["keep"]).unwrap();

    assert_eq!(
        result.left_texts(),
        vec![
            "keep",
            "<removed>drop one</removed>",
            "<removed>drop two</removed>"
        ]
    );
    assert_eq!(result.right_texts(), vec!["keep", "", ""]);
}

#[test]
fn test_empty_inputs() {
    let result = compare(&NONE, &NONE).unwrap();

    assert!(result.left.is_empty());
    assert!(result.right.is_empty());
    assert!(!result.has_changes());
}

#[test]
fn test_identical_inputs() {
    let lines = ["Line 1", "Line 2", "Line 3"];
    let result = compare(&lines, &lines).unwrap();

    assert_eq!(result.left_texts(), lines.to_vec());
    assert_eq!(result.right_texts(), lines.to_vec());
    assert!(!result.has_changes());
}

#[test]
fn test_unrelated_replacement() {
    // Too dissimilar to pair, so the removal is shown unhighlighted
    let result = compare(&["first"], &["12345"]).unwrap();

    assert_eq!(result.left_texts(), vec!["first", ""]);
    assert_eq!(result.right_texts(), vec!["", "<added>12345</added>"]);
    assert_eq!(result.left[0].status, LineStatus::Unpaired);
}

#[test]
fn test_mixed_document() {
    let left = vec!["one", "two words", "three"];
    let right = vec!["one", "two wordz", "three", "four"];

    let result = compare(&left, &right).unwrap();

    assert_eq!(
        result.left_texts(),
        vec!["one", "two word<removed>s</removed>", "three", ""]
    );
    assert_eq!(
        result.right_texts(),
        vec!["one", "two word<added>z</added>", "three", "<added>four</added>"]
    );
}

#[test]
fn test_ndiff_snapshot() {
    let left = ["one", "two words", "three"];
    let right = ["one", "two wordz", "three", "four"];

    let tokens = Differ::default().diff(&left, &right);

    insta::assert_snapshot!(ndiff(&tokens), @r"
      one
    - two words
    ?         ^
    + two wordz
    ?         ^
      three
    + four
    ");
}

#[test]
fn test_idempotent() {
    let left = vec!["alpha beta", "gamma", "delta"];
    let right = vec!["alpha beat", "delta", "epsilon"];

    let first = compare(&left, &right).unwrap();
    let second = compare(&left, &right).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_batch_matches_single() {
    let config = CompareConfig::default().markers(Markers::streamlit());
    let pairs = vec![
        (vec!["cat sat"], vec!["cat mat"]),
        (vec!["gone"], vec![]),
        (vec![], vec!["new"]),
    ];

    let results = config.compare_batch(&pairs);

    assert_eq!(results.len(), 3);
    for ((left, right), result) in pairs.iter().zip(results) {
        assert_eq!(result.unwrap(), config.compare(left, right).unwrap());
    }
}
