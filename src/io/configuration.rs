//! Directory layout, naming conventions and runtime configuration defaults

// Directory layout relative to the working directory
/// Directory scanned for point-cloud inputs
pub const DEFAULT_INPUT_DIR: &str = "downloaded_ply_files";
/// Directory holding one annotation file per input
pub const DEFAULT_ANNOTATION_DIR: &str = "sections";
/// Directory receiving generated images, created if absent
pub const DEFAULT_OUTPUT_DIR: &str = "density_images";

// File naming
/// Extension identifying point-cloud inputs (matched case-sensitively)
pub const INPUT_EXTENSION: &str = "ply";
/// Extension of the annotation sidecar files
pub const ANNOTATION_EXTENSION: &str = "json";
/// Extension of both generated images
pub const IMAGE_EXTENSION: &str = "png";
/// Suffix of the top-down density image
pub const DENSITY_SUFFIX: &str = "_density";
/// Suffix of the density image overlaid with annotations
pub const ANNOTATED_SUFFIX: &str = "_annotated";

// Generator command line
/// Interpreter used when no generator command is given
pub const DEFAULT_GENERATOR_PROGRAM: &str = "python3";
/// Script passed to the default interpreter
pub const DEFAULT_GENERATOR_SCRIPT: &str = "src/generate_density_image.py";
/// Named argument carrying the annotation path
pub const ANNOTATIONS_FLAG: &str = "--annotations";
/// Named argument carrying the output directory
pub const OUTPUT_DIR_FLAG: &str = "--output_dir";
/// Quality flag passed on every invocation unless disabled
pub const HIGH_RES_FLAG: &str = "--high_res";
/// Base resolution multiplier argument
pub const RESOLUTION_FLAG: &str = "--resolution";
/// Enables connected-component filtering in the generator
pub const CONNECTED_COMPONENTS_FLAG: &str = "--use_connected_components";
/// Enables statistical outlier removal in the generator
pub const REMOVE_OUTLIERS_FLAG: &str = "--remove_outliers";
/// Disables the generator's Y flip used to align with annotations
pub const NO_FLIP_Y_FLAG: &str = "--no_flip_y";

// Progress display
/// Spinner redraw interval in milliseconds
pub const SPINNER_TICK_MS: u64 = 100;
/// Longest stderr excerpt echoed for a failed item, in bytes
pub const MAX_STDERR_EXCERPT: usize = 4096;
