//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Remove the background from an image using the remove.bg API.
#[derive(Parser, Debug)]
#[command(name = "removebg", version, about)]
pub struct Cli {
    /// Image to process.
    pub input: PathBuf,

    /// Output file path (defaults to `<input>_transparent.png` next to the input).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds (defaults to the config value, then 30).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check argument combinations clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if the output would overwrite the input or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.output.as_deref() == Some(self.input.as_path()) {
            return Err(format!(
                "Output path {} is the input file; pick a different output",
                self.input.display()
            ));
        }
        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}
