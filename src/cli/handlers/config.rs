use crate::cli::{args::ConfigArgs, global::GlobalArgs};
use alterm::Settings;

pub fn handle(
    args: ConfigArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        let output = serde_json::json!({
            "source": global.config.as_deref().unwrap_or("defaults with overrides"),
            "settings": settings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}
