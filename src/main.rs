use anyhow::{Context, Result};
use clap::Parser;

use carta::cli::{CliArgs, RenderMode};
use carta::Carta;

#[tokio::main]
async fn main() -> Result<()> {
    carta::tracing::init();

    let job = CliArgs::parse().into_job()?;
    let markdown = std::fs::read_to_string(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;

    let carta = Carta::new(job.options);
    let html = match job.mode {
        RenderMode::Async => carta.render(&markdown).await?,
        RenderMode::Ssr => carta.render_ssr(&markdown)?,
    };

    print!("{}", html);
    Ok(())
}
