//! List rules command implementation.

use anyhow::Result;
use monolint::rules::all_rules;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    println!("Available rules:\n");

    for rule in all_rules() {
        println!("{}", rule.name());
        println!("{}", "-".repeat(rule.name().len()));
        println!("{}\n", rule.doc_markdown());

        for example in rule.doc_example_configs() {
            let config = serde_json::to_string(&example.config)?;
            println!("  \"{}\": {}", rule.name(), config);
            println!("      {}", example.description);
        }
        println!();
    }

    println!("Configure rules in .monolint.json, e.g.:");
    println!("  {{\"rules\": {{\"serverless-same-name\": false}}}}");

    Ok(())
}
