use clap::Parser;
use glyph_serve::core::{ConfigValidatorExt, init_tracing};

mod cli;
mod handlers;

use cli::{Cli, Commands};
use handlers::{handle_predict, handle_serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.service.resolve()?.validate_and_wrap()?;

    match cli.command {
        None | Some(Commands::Serve) => handle_serve(config).await?,
        Some(Commands::Predict { kind, image }) => handle_predict(&config, kind, &image)?,
    }
    Ok(())
}
