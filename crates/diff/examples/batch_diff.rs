use anyhow::Result;
use line_diff::CompareConfig;
use std::env;
use std::time::Instant;

fn main() -> Result<()> {
    let count: usize = env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(500);

    println!("Generating {} record pairs...", count);
    let pairs: Vec<(Vec<String>, Vec<String>)> = (0..count)
        .map(|i| {
            let truth: Vec<String> = (0..20)
                .map(|line| format!("Record {} line {} with some text", i, line))
                .collect();
            let mut candidate = truth.clone();
            // Corrupt one line per record
            candidate[i % 20] = format!("Record {} line {} with sone txt", i, i % 20);
            (truth, candidate)
        })
        .collect();

    println!("Comparing in parallel...");
    let start = Instant::now();
    let results = CompareConfig::default().compare_batch(&pairs);
    let elapsed = start.elapsed();

    let mut changed = 0;
    for result in results {
        let comparison = result?;
        if comparison.has_changes() {
            changed += 1;
        }
    }

    println!("Compared {} pairs in {:.2?}", count, elapsed);
    println!("  Pairs with changes: {}", changed);

    Ok(())
}
