pub mod config;
pub mod crack;
pub mod detect;
pub mod list;
pub mod run;

use alterm::{AnalysisResult, OutputFormat, RenderOptions, Renderer, Settings};

/// Prints a dispatch result to stdout, or hands the error back for `main` to report.
///
/// In JSON mode errors are printed as a JSON document as well, so scripts
/// always get parseable output.
pub(crate) fn emit(
    result: AnalysisResult,
    json: bool,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = RenderOptions::from(&settings.render);
    if json {
        options.format = OutputFormat::Json;
    }
    let rendered = Renderer::new(options).render(&result)?;

    match result {
        AnalysisResult::Success(_) => {
            println!("{}", rendered);
            Ok(())
        }
        AnalysisResult::Error(e) => {
            if options.format == OutputFormat::Json {
                println!("{}", rendered);
            }
            Err(Box::new(e))
        }
    }
}
