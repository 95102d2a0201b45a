//! The background removal operation: validate, upload once, write the result.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::RemoveBgError;
use crate::ports::background_remover::{BackgroundRemover, RemovalRequest, SIZE_AUTO};

/// MIME type sent when the input extension is not a known image format.
const FALLBACK_MIME: &str = "application/octet-stream";

/// What a successful removal produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Where the processed image was written.
    pub output: PathBuf,
    /// Number of bytes written.
    pub bytes_written: u64,
}

/// Remove the background of `input` and write the processed image to `output`.
///
/// The input must exist; otherwise [`RemoveBgError::NotFound`] is returned
/// without calling `remover`. An output naming the input file under any
/// spelling is rejected as `InvalidArgument`, also before the call. The output is created or truncated only after
/// the remote call succeeds, and receives the returned bytes verbatim.
///
/// # Errors
///
/// Returns `NotFound` for a missing input, `Io` for local read/write
/// failures, and whatever the remover reports for the remote step.
pub async fn remove_background(
    remover: &dyn BackgroundRemover,
    input: &Path,
    output: &Path,
) -> Result<RemovalOutcome, RemoveBgError> {
    if !input.exists() {
        return Err(RemoveBgError::NotFound { path: input.to_path_buf() });
    }
    if resolves_to_same_file(input, output) {
        return Err(RemoveBgError::InvalidArgument(format!(
            "Output {} is the same file as input {}",
            output.display(),
            input.display()
        )));
    }

    info!(input = %input.display(), "processing image");
    let image = std::fs::read(input)?;
    let request = RemovalRequest {
        image,
        file_name: upload_file_name(input),
        mime_type: mime_type_for(input).to_string(),
        size: SIZE_AUTO.to_string(),
    };
    debug!(bytes = request.image.len(), mime = %request.mime_type, "read input");

    let removed = remover.remove(&request).await?;

    std::fs::write(output, &removed.data)?;
    info!(output = %output.display(), bytes = removed.data.len(), "wrote processed image");

    Ok(RemovalOutcome { output: output.to_path_buf(), bytes_written: removed.data.len() as u64 })
}

/// True when `output` is the existing `input` file, however it is spelled.
///
/// A non-existent output cannot alias an existing input.
fn resolves_to_same_file(input: &Path, output: &Path) -> bool {
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

fn upload_file_name(input: &Path) -> String {
    input
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned())
}

fn mime_type_for(input: &Path) -> &'static str {
    image::ImageFormat::from_path(input).map_or(FALLBACK_MIME, |f| f.to_mime_type())
}
