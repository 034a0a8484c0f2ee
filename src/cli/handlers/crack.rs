use crate::cli::{args::InputArgs, config::read_input, global::GlobalArgs};
use alterm::{Dispatcher, NormalizedRequest, Settings};

pub fn handle(
    args: InputArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(args.file.as_ref(), global)?;
    let text = String::from_utf8_lossy(&input);

    let request = NormalizedRequest::new("Caesar Cracker", &text);
    let result = Dispatcher::new(settings.clone()).dispatch(&request);
    super::emit(result, args.json, settings)
}
