use clap::{Args, Parser, Subcommand};
use glyph_serve::core::config::{OrtSessionConfig, ServiceConfig};
use glyph_serve::core::errors::GlyphResult;
use glyph_serve::domain::ModelKind;
use std::path::PathBuf;

/// HTTP inference service for handwritten digits and letters.
#[derive(Parser, Debug)]
#[command(name = "glyph-serve", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the models and start the HTTP server (default)
    Serve,
    /// Classify a local image file and print the JSON result
    Predict {
        /// Which classifier to use
        #[arg(long, value_parser = parse_kind, default_value = "digit")]
        kind: ModelKind,
        /// Path to the image file
        image: PathBuf,
    },
}

/// Settings shared by every subcommand. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct ServiceArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "GLYPH_HOST", global = true)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, env = "GLYPH_PORT", global = true)]
    pub port: Option<u16>,

    /// Directory containing the model files
    #[arg(long, env = "GLYPH_MODEL_DIR", global = true)]
    pub model_dir: Option<PathBuf>,

    /// File name of the digit model inside the model directory
    #[arg(long, global = true)]
    pub digit_model: Option<String>,

    /// File name of the letter model inside the model directory
    #[arg(long, global = true)]
    pub letter_model: Option<String>,

    /// ONNX Runtime sessions per model
    #[arg(long, global = true)]
    pub session_pool_size: Option<usize>,

    /// Intra-op threads per session
    #[arg(long, global = true)]
    pub intra_threads: Option<usize>,

    /// Maximum request body size in bytes
    #[arg(long, global = true)]
    pub body_limit_bytes: Option<usize>,
}

impl ServiceArgs {
    /// Resolves the effective configuration: defaults, then the config
    /// file, then flags and environment.
    pub fn resolve(&self) -> GlyphResult<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_json_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = &self.model_dir {
            config.model_dir = dir.clone();
        }
        if let Some(name) = &self.digit_model {
            config.digit_model = name.clone();
        }
        if let Some(name) = &self.letter_model {
            config.letter_model = name.clone();
        }
        if let Some(size) = self.session_pool_size {
            config.inference.session_pool_size = size;
        }
        if let Some(threads) = self.intra_threads {
            let session = config
                .inference
                .ort_session
                .take()
                .unwrap_or_else(OrtSessionConfig::new);
            config.inference.ort_session = Some(session.with_intra_threads(threads));
        }
        if let Some(limit) = self.body_limit_bytes {
            config.body_limit_bytes = limit;
        }
        Ok(config)
    }
}

fn parse_kind(s: &str) -> Result<ModelKind, String> {
    s.parse()
}
