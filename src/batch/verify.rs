//! Output artifact checks run after a successful generator exit

use crate::batch::layout::OutputArtifacts;
use std::fmt;
use std::path::PathBuf;

/// Why an expected artifact does not count as produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactProblem {
    /// Nothing exists at the path
    Missing(PathBuf),
    /// A file exists but is not a decodable image
    Unreadable {
        /// Artifact path
        path: PathBuf,
        /// Decoder error message
        reason: String,
    },
}

impl fmt::Display for ArtifactProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "missing: {}", path.display()),
            Self::Unreadable { path, reason } => {
                write!(f, "unreadable: {} ({reason})", path.display())
            }
        }
    }
}

/// Check both artifacts, returning every problem found
///
/// With `decode_images` set, existing files must also have a readable image
/// header. An empty result means the output is complete.
pub fn check_outputs(artifacts: &OutputArtifacts, decode_images: bool) -> Vec<ArtifactProblem> {
    artifacts
        .paths()
        .into_iter()
        .filter_map(|path| {
            if !path.exists() {
                return Some(ArtifactProblem::Missing(path.to_path_buf()));
            }
            if decode_images {
                if let Err(err) = image::image_dimensions(path) {
                    return Some(ArtifactProblem::Unreadable {
                        path: path.to_path_buf(),
                        reason: err.to_string(),
                    });
                }
            }
            None
        })
        .collect()
}
