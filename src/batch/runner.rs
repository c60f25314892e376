//! Sequential iterate-match-invoke-verify loop
//!
//! One generator run completes before the next item starts. Item outcomes are
//! recorded and reported, never propagated: only run-level conditions (unusable
//! directories, a broken status writer) end the loop early.

use crate::batch::generator::{Generator, GeneratorRequest};
use crate::batch::layout::{self, BatchLayout};
use crate::batch::outcome::{ItemOutcome, ItemReport, RunReport, RunSummary};
use crate::batch::verify::check_outputs;
use crate::io::error::Result;
use crate::io::progress::ProgressReporter;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Drives one generator over every input in a layout
pub struct BatchRunner<G: Generator> {
    layout: BatchLayout,
    generator: G,
    verify_images: bool,
}

impl<G: Generator> BatchRunner<G> {
    /// Create a runner over `layout` using `generator`
    pub const fn new(layout: BatchLayout, generator: G) -> Self {
        Self {
            layout,
            generator,
            verify_images: false,
        }
    }

    /// Also require produced images to have a readable header
    #[must_use]
    pub const fn with_image_verification(mut self, enabled: bool) -> Self {
        self.verify_images = enabled;
        self
    }

    /// Directories this runner works on
    pub const fn layout(&self) -> &BatchLayout {
        &self.layout
    }

    /// The generator in use
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Process every discovered input once, in path order
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created, the input
    /// directory cannot be read, or a status line cannot be written. Failures
    /// of individual items are reported in the returned [`RunReport`].
    pub fn run<W: Write>(&mut self, reporter: &mut ProgressReporter<W>) -> Result<RunReport> {
        self.layout.ensure_output_dir()?;
        let inputs = self.layout.discover_inputs()?;
        let total = inputs.len();
        info!(
            "Discovered {total} inputs in {}",
            self.layout.input_dir.display()
        );
        reporter.discovered(total)?;

        let mut report = RunReport {
            items: Vec::with_capacity(total),
            summary: RunSummary::new(total),
        };

        for (position, input) in inputs.into_iter().enumerate() {
            let item = self.process_item(position + 1, total, input, reporter)?;
            reporter.item_finished(&item)?;
            report.summary.record(item.outcome.kind());
            report.items.push(item);
        }

        reporter.summary(&report.summary)?;
        Ok(report)
    }

    fn process_item<W: Write>(
        &mut self,
        index: usize,
        total: usize,
        input: PathBuf,
        reporter: &mut ProgressReporter<W>,
    ) -> Result<ItemReport> {
        let base_name = layout::base_name(&input);
        let annotation = self.layout.annotation_path(&base_name);

        if !annotation.is_file() {
            info!("Skipping {base_name}: {} not found", annotation.display());
            return Ok(ItemReport {
                index,
                total,
                input,
                base_name,
                outcome: ItemOutcome::SkippedMissingAnnotation { annotation },
            });
        }

        reporter.item_started(index, &base_name)?;

        let request = GeneratorRequest {
            input: absolute(&input),
            annotations: absolute(&annotation),
            output_dir: self.layout.output_dir.clone(),
        };
        let started = Instant::now();
        let generated = self.generator.generate(&request);
        debug!(
            "Generator for {base_name} finished in {:.2?} with {:?}",
            started.elapsed(),
            generated.status
        );
        if !generated.stdout.is_empty() {
            debug!("Generator output for {base_name}:\n{}", generated.stdout.trim_end());
        }

        let outcome = if generated.status.is_success() {
            let artifacts = self.layout.output_artifacts(&base_name);
            let problems = check_outputs(&artifacts, self.verify_images);
            if problems.is_empty() {
                ItemOutcome::Success { artifacts }
            } else {
                info!("{base_name}: {} expected output(s) not usable", problems.len());
                ItemOutcome::IncompleteOutput { problems }
            }
        } else {
            info!("{base_name}: generator failed with {:?}", generated.status);
            ItemOutcome::Failed {
                status: generated.status,
                stderr: generated.stderr,
            }
        };

        Ok(ItemReport {
            index,
            total,
            input,
            base_name,
            outcome,
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
