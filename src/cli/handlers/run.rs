use crate::cli::{args::RunArgs, config::read_input, global::GlobalArgs};
use alterm::{DispatchError, Dispatcher, RawRequest, Settings, normalize};

pub fn handle(
    args: RunArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &args.text {
        Some(text) => text.clone().into_bytes(),
        None => read_input(args.file.as_ref(), global)?,
    };

    let raw = RawRequest::new(&args.operation, input.as_slice())
        .base(args.base.as_deref())
        .mode(args.mode.as_deref())
        .mode2(args.mode2.as_deref());
    let request = normalize(raw).map_err(|e| DispatchError::new(&args.operation, e))?;

    let result = Dispatcher::new(settings.clone()).dispatch(&request);
    super::emit(result, args.json, settings)
}
