use crate::cli::global::GlobalArgs;
use alterm::Settings;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Loads settings from `--config` if given, otherwise from the standard locations.
pub fn load_settings(global: &GlobalArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            Settings::load_from_file(Path::new(expanded.as_ref())).map_err(|e| {
                let message = format!("Cannot load settings from '{}': {}", path, e);
                message.into()
            })
        }
        None => Settings::load_with_overrides(),
    }
}

/// Reads the input bytes from a file or stdin, enforcing `--max-size`.
pub fn read_input(
    file: Option<&PathBuf>,
    global: &GlobalArgs,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(file_path) = file {
        if global.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;

            if file_size > global.max_size {
                if global.force {
                    tracing::warn!(
                        "Processing large file ({} bytes, limit: {} bytes)",
                        file_size,
                        global.max_size
                    );
                } else {
                    return Err(format!(
                        "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
                        file_size, global.max_size
                    )
                    .into());
                }
            }
        }

        return Ok(fs::read(file_path)?);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    if global.max_size > 0 && buffer.len() > global.max_size && !global.force {
        return Err(format!(
            "Input size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
            buffer.len(),
            global.max_size
        )
        .into());
    }

    Ok(buffer)
}
