use crate::cli::{args::ListArgs, global::GlobalArgs};
use alterm::Settings;

pub fn handle(
    args: ListArgs,
    _global: &GlobalArgs,
    _settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = alterm::catalog();

    if args.json {
        let families: Vec<serde_json::Value> = catalog
            .iter()
            .map(|(family, ids)| {
                serde_json::json!({
                    "family": family.name(),
                    "operations": ids,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&families)?);
        return Ok(());
    }

    let total: usize = catalog.iter().map(|(_, ids)| ids.len()).sum();
    println!("Available operations ({}):", total);
    for (family, ids) in &catalog {
        println!("\n{}:", family.name());
        for id in ids {
            println!("  {}", id);
        }
    }
    println!("\nBase<N> accepts any of 2, 8, 10, 16, 32, 36, 58, 62, 64, 85 and URL.");

    Ok(())
}
