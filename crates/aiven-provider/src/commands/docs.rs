use aiven_provider_core::{SchemaDocument, render_markdown};
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub fn handle(schema: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(schema)
        .with_context(|| format!("failed to read {}", schema.display()))?;
    let document: SchemaDocument = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a provider schema document", schema.display()))?;
    tracing::debug!(
        "Rendering {} resources and {} data sources",
        document.resource_schemas.len(),
        document.data_source_schemas.len()
    );

    let markdown = render_markdown(&document);
    match output {
        Some(path) => {
            std::fs::write(path, markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {}",
                "✓ Wrote".green(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", markdown),
    }
    Ok(())
}
