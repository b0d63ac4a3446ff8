use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dataset: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(dataset)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Category", "Pairs", "Example"]);

    for (i, category) in catalog.categories().iter().enumerate() {
        let example = category
            .pairs()
            .first()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        table.add_row(vec![
            (i + 1).to_string(),
            category.name().to_string(),
            category.pairs().len().to_string(),
            example,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} categories, {} spectrum pairs",
        catalog.len(),
        catalog.total_pairs()
    );

    Ok(())
}
