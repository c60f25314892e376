//! External density-image generator contract
//!
//! The generator is an opaque collaborator: it receives the input path, a named
//! annotation argument, a named output directory argument and a quality flag.
//! Exit code 0 means success; the only side effects are the two output images.

use crate::io::configuration::{
    ANNOTATIONS_FLAG, CONNECTED_COMPONENTS_FLAG, DEFAULT_GENERATOR_PROGRAM,
    DEFAULT_GENERATOR_SCRIPT, HIGH_RES_FLAG, NO_FLIP_Y_FLAG, OUTPUT_DIR_FLAG, REMOVE_OUTLIERS_FLAG,
    RESOLUTION_FLAG,
};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Paths handed to the generator for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRequest {
    /// Point-cloud file, absolute where it could be resolved
    pub input: PathBuf,
    /// Annotation file, absolute where it could be resolved
    pub annotations: PathBuf,
    /// Directory the images are written to
    pub output_dir: PathBuf,
}

/// Optional generator switches forwarded on every invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Request high-resolution output
    pub high_res: bool,
    /// Base resolution multiplier, generator default when `None`
    pub resolution: Option<u32>,
    /// Keep only the connected components around the scan origin
    pub connected_components: bool,
    /// Drop statistical outliers before rendering
    pub remove_outliers: bool,
    /// Flip the Y axis to align with annotation coordinates
    pub flip_y: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            high_res: true,
            resolution: None,
            connected_components: false,
            remove_outliers: false,
            flip_y: true,
        }
    }
}

impl GeneratorOptions {
    /// Command-line switches for these options, in a stable order
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.high_res {
            args.push(HIGH_RES_FLAG.into());
        }
        if let Some(resolution) = self.resolution {
            args.push(RESOLUTION_FLAG.into());
            args.push(resolution.to_string().into());
        }
        if self.connected_components {
            args.push(CONNECTED_COMPONENTS_FLAG.into());
        }
        if self.remove_outliers {
            args.push(REMOVE_OUTLIERS_FLAG.into());
        }
        if !self.flip_y {
            args.push(NO_FLIP_Y_FLAG.into());
        }
        args
    }
}

/// How a generator run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorStatus {
    /// Exited with code 0
    Success,
    /// Exited with a non-zero code
    ExitCode(i32),
    /// Terminated without an exit code
    Signal,
    /// The process could not be started
    LaunchFailed(String),
}

impl GeneratorStatus {
    /// Whether the run counts as successful
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorReport {
    /// How the run ended
    pub status: GeneratorStatus,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl GeneratorReport {
    /// Report for a run that exited with code 0 and printed nothing
    pub const fn success() -> Self {
        Self {
            status: GeneratorStatus::Success,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Report for a run that exited with `code` and wrote `stderr`
    pub fn exit_code(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: GeneratorStatus::ExitCode(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Something that turns a point cloud and its annotations into images
pub trait Generator {
    /// Run once for `request`, blocking until it finishes
    fn generate(&mut self, request: &GeneratorRequest) -> GeneratorReport;
}

/// Generator backed by an external process
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: OsString,
    prefix_args: Vec<OsString>,
    options: GeneratorOptions,
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::from_command(&[], GeneratorOptions::default())
    }
}

impl CommandGenerator {
    /// Build from a command prefix such as `["python3", "render.py"]`
    ///
    /// An empty prefix selects the bundled density script run by `python3`.
    pub fn from_command(command: &[String], options: GeneratorOptions) -> Self {
        match command.split_first() {
            Some((program, rest)) => Self {
                program: program.into(),
                prefix_args: rest.iter().map(OsString::from).collect(),
                options,
            },
            None => Self {
                program: DEFAULT_GENERATOR_PROGRAM.into(),
                prefix_args: vec![DEFAULT_GENERATOR_SCRIPT.into()],
                options,
            },
        }
    }

    /// Program that is executed
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Forwarded generator options
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Full argument vector passed to the program for `request`
    pub fn arguments(&self, request: &GeneratorRequest) -> Vec<OsString> {
        let mut args = self.prefix_args.clone();
        args.push(request.input.clone().into_os_string());
        args.push(ANNOTATIONS_FLAG.into());
        args.push(request.annotations.clone().into_os_string());
        args.push(OUTPUT_DIR_FLAG.into());
        args.push(request.output_dir.clone().into_os_string());
        args.extend(self.options.to_args());
        args
    }
}

impl Generator for CommandGenerator {
    fn generate(&mut self, request: &GeneratorRequest) -> GeneratorReport {
        let args = self.arguments(request);
        debug!("Running {} {args:?}", self.program.to_string_lossy());

        let output = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                return GeneratorReport {
                    status: GeneratorStatus::LaunchFailed(format!(
                        "failed to start '{}': {err}",
                        self.program.to_string_lossy()
                    )),
                    stdout: String::new(),
                    stderr: String::new(),
                };
            }
        };

        let status = match output.status.code() {
            Some(0) => GeneratorStatus::Success,
            Some(code) => GeneratorStatus::ExitCode(code),
            None => GeneratorStatus::Signal,
        };

        GeneratorReport {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
