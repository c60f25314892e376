//! Command-line interface for batch density image generation

use crate::batch::generator::{CommandGenerator, GeneratorOptions};
use crate::batch::layout::BatchLayout;
use crate::batch::outcome::RunReport;
use crate::batch::runner::BatchRunner;
use crate::io::configuration::{DEFAULT_ANNOTATION_DIR, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressReporter;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "densebatch")]
#[command(
    author,
    version,
    about = "Generate density images for every annotated point cloud in a directory"
)]
/// Command-line arguments for the batch runner
///
/// Every flag is optional; without any the runner reads `downloaded_ply_files/`
/// and `sections/` and writes to `density_images/`.
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory containing the .ply point clouds
    #[arg(long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory containing one <name>.json annotation file per point cloud
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ANNOTATION_DIR)]
    pub annotation_dir: PathBuf,

    /// Directory receiving <name>_density.png and <name>_annotated.png
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the spinner shown while the generator runs
    #[arg(long)]
    pub no_spinner: bool,

    /// Exit with an error if any item failed or produced incomplete output
    #[arg(long)]
    pub strict: bool,

    /// Require produced images to be decodable, not just present
    #[arg(long)]
    pub verify_images: bool,

    /// Do not pass the high-resolution flag to the generator
    #[arg(long)]
    pub no_high_res: bool,

    /// Base resolution multiplier forwarded to the generator
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Ask the generator to keep only connected components near the origin
    #[arg(long)]
    pub connected_components: bool,

    /// Ask the generator to drop statistical outliers
    #[arg(long)]
    pub remove_outliers: bool,

    /// Ask the generator not to flip the Y axis
    #[arg(long)]
    pub no_flip_y: bool,

    /// Generator command prefix (default: python3 src/generate_density_image.py)
    #[arg(last = true, value_name = "COMMAND")]
    pub generator: Vec<String>,
}

impl Cli {
    /// Install the logger at the level selected by `--verbose`
    ///
    /// Calling this more than once keeps the first logger.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp_secs()
            .try_init();
    }

    /// Check if the spinner should be displayed
    pub const fn should_show_spinner(&self) -> bool {
        !self.no_spinner
    }

    /// Directories selected on the command line
    pub fn layout(&self) -> BatchLayout {
        BatchLayout::new(
            self.input_dir.clone(),
            self.annotation_dir.clone(),
            self.output_dir.clone(),
        )
    }

    /// Generator switches selected on the command line
    pub const fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            high_res: !self.no_high_res,
            resolution: self.resolution,
            connected_components: self.connected_components,
            remove_outliers: self.remove_outliers,
            flip_y: !self.no_flip_y,
        }
    }
}

/// Runs one batch as configured by the command line
pub struct FileProcessor {
    cli: Cli,
}

impl FileProcessor {
    /// Create a new processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed arguments
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Process the batch, writing status lines to standard output
    ///
    /// # Errors
    ///
    /// Returns an error if arguments are invalid, a directory is unusable, or
    /// `--strict` was given and some item did not succeed
    pub fn process(&self) -> Result<()> {
        let stdout = std::io::stdout();
        self.process_to(stdout.lock()).map(|_| ())
    }

    /// Process the batch, writing status lines to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if arguments are invalid, a directory is unusable, or
    /// `--strict` was given and some item did not succeed
    pub fn process_to<W: Write>(&self, out: W) -> Result<RunReport> {
        self.validate()?;

        let generator =
            CommandGenerator::from_command(&self.cli.generator, self.cli.generator_options());
        let mut runner = BatchRunner::new(self.cli.layout(), generator)
            .with_image_verification(self.cli.verify_images);
        let mut reporter = ProgressReporter::new(out, self.cli.should_show_spinner());

        let report = runner.run(&mut reporter)?;
        if self.cli.strict {
            report.summary.require_clean()?;
        }
        Ok(report)
    }

    fn validate(&self) -> Result<()> {
        if self.cli.resolution == Some(0) {
            return Err(invalid_parameter(
                "resolution",
                &0,
                &"must be greater than zero",
            ));
        }
        if self.cli.generator.first().is_some_and(String::is_empty) {
            return Err(invalid_parameter(
                "generator",
                &"",
                &"program name must not be empty",
            ));
        }
        Ok(())
    }
}
