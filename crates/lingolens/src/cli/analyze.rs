//! The `lingolens analyze` command: image analysis without questions.

use clap::{ArgGroup, Args, ValueEnum};
use lingolens_core::{output, Config};
use std::path::PathBuf;

use super::{build_pipeline, fail, load_image};

/// Output shape for the analyze command.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AnalyzeFormat {
    /// Full analysis record with request id and bounding box
    Json,
    /// The context shape consumed by question generation
    Question,
}

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("image").required(true).args(["base64", "file"])))]
pub struct AnalyzeArgs {
    /// Base64-encoded image data (a data: URL prefix is accepted)
    #[arg(long)]
    pub base64: Option<String>,

    /// Path to an image file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "question")]
    pub format: AnalyzeFormat,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let pretty = config.output.pretty;

    let image = match load_image(args.base64.as_deref(), args.file.as_deref()) {
        Ok(image) => image,
        Err(e) => fail(e, pretty),
    };

    let pipeline = build_pipeline(config);

    let analysis = match pipeline.analyze_image(&image).await {
        Ok(analysis) => analysis,
        Err(e) => fail(format!("Image processing failed: {e}"), pretty),
    };

    let mut stdout = std::io::stdout();
    match args.format {
        AnalyzeFormat::Json => output::write_json(&mut stdout, &analysis, pretty)?,
        AnalyzeFormat::Question => output::write_json(&mut stdout, &analysis.context(), pretty)?,
    }
    Ok(())
}
