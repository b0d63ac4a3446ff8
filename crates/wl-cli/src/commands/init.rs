use std::fs;
use std::path::Path;

use serde_json::json;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("file '{}' already exists", path.display()));
    }

    let starter = json!({
        "categories": {
            "Senses": [
                ["Hot", "Cold"],
                ["Quiet", "Loud"],
                ["Bitter", "Sweet"]
            ],
            "Everyday": [
                ["Useless", "Useful"],
                ["Cheap", "Expensive"],
                ["Boring", "Exciting"]
            ]
        }
    });
    let text = serde_json::to_string_pretty(&starter).map_err(|e| e.to_string())?;

    fs::write(path, text + "\n")
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created dataset {}", path.display());
    println!();
    println!("Get started:");
    println!("  # Add categories and [\"left\", \"right\"] pairs");
    println!("  wl categories --dataset {}", path.display());
    println!("  wl play --dataset {}", path.display());

    Ok(())
}
