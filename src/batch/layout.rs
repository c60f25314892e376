//! Input discovery and path derivation
//!
//! The base name of an input (its file name without the `.ply` extension) is
//! the only join key: annotation and output paths are pure functions of it.

use crate::io::configuration::{
    ANNOTATED_SUFFIX, ANNOTATION_EXTENSION, DENSITY_SUFFIX, IMAGE_EXTENSION, INPUT_EXTENSION,
};
use crate::io::error::{BatchError, Result};
use std::path::{Path, PathBuf};

/// The two images expected from one successful generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifacts {
    /// Top-down density image
    pub density: PathBuf,
    /// Density image with annotation outlines drawn on top
    pub annotated: PathBuf,
}

impl OutputArtifacts {
    /// Both artifact paths, density image first
    pub fn paths(&self) -> [&Path; 2] {
        [self.density.as_path(), self.annotated.as_path()]
    }
}

/// Directory triple a batch run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLayout {
    /// Directory scanned for point-cloud files
    pub input_dir: PathBuf,
    /// Directory holding the annotation sidecars
    pub annotation_dir: PathBuf,
    /// Directory the generator writes images into
    pub output_dir: PathBuf,
}

impl BatchLayout {
    /// Create a layout from its three directories
    pub fn new(
        input_dir: impl Into<PathBuf>,
        annotation_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            annotation_dir: annotation_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// List point-cloud files in the input directory, sorted by path
    ///
    /// Only regular files whose extension is exactly `ply` are returned, so two
    /// inputs never share a base name.
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory cannot be read
    pub fn discover_inputs(&self) -> Result<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(&self.input_dir).map_err(|source| BatchError::InputDirectory {
                path: self.input_dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| BatchError::FileSystem {
                    path: self.input_dir.clone(),
                    operation: "directory listing",
                    source,
                })?
                .path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Annotation file expected for `base_name`
    pub fn annotation_path(&self, base_name: &str) -> PathBuf {
        self.annotation_dir
            .join(format!("{base_name}.{ANNOTATION_EXTENSION}"))
    }

    /// Output images expected for `base_name`
    pub fn output_artifacts(&self, base_name: &str) -> OutputArtifacts {
        OutputArtifacts {
            density: self
                .output_dir
                .join(format!("{base_name}{DENSITY_SUFFIX}.{IMAGE_EXTENSION}")),
            annotated: self
                .output_dir
                .join(format!("{base_name}{ANNOTATED_SUFFIX}.{IMAGE_EXTENSION}")),
        }
    }

    /// Create the output directory and any missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| BatchError::OutputDirectory {
            path: self.output_dir.clone(),
            source,
        })
    }
}

/// File name of `path` without its final extension
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
