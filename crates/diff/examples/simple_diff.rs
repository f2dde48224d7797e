use anyhow::Result;
use line_diff::{compare, ndiff, CompareConfig, Differ, LineDiffer, LineStatus, Markers};

fn main() -> Result<()> {
    // Two sample texts to compare
    let ground_truth = vec![
        "This is the first line.",
        "Here is the second line.",
        "And the third line.",
    ];
    let candidate = vec![
        "This is the first line.",
        "Here is the secnd line!",
        "And the third line.",
        "Plus a new fourth line.",
    ];

    // Show the raw token stream
    println!("Token stream:");
    print!("{}", ndiff(&Differ::default().diff(&ground_truth, &candidate)));

    // Annotate with the default tags
    let comparison = compare(&ground_truth, &candidate)?;

    println!("\nGround truth:");
    for (n, line) in comparison.left.iter().enumerate() {
        println!("  {:>2} → {}", n + 1, line.text);
    }

    println!("\nCandidate:");
    for (n, line) in comparison.right.iter().enumerate() {
        println!("  {:>2} → {}", n + 1, line.text);
    }

    // Same comparison with terminal colors
    let colored = CompareConfig::default()
        .markers(Markers::ansi())
        .compare(&ground_truth, &candidate)?;

    println!("\nColored rows:");
    for (left, right) in colored.left.iter().zip(&colored.right) {
        let marker = match (left.status, right.status) {
            (LineStatus::Unchanged, _) => ' ',
            (LineStatus::Placeholder, _) => '+',
            (_, LineStatus::Placeholder) => '-',
            _ => '~',
        };
        println!("{} {:<40} | {}", marker, left.text, right.text);
    }

    println!("\nStatistics:");
    println!("  Rows: {}", comparison.left.len().max(comparison.right.len()));
    println!("  Removed lines: {}", comparison.removed_lines());
    println!("  Added lines: {}", comparison.added_lines());

    Ok(())
}
