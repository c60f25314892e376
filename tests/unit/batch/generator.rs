//! Tests for the generator argument contract and subprocess execution

#[cfg(test)]
mod tests {
    use densebatch::batch::generator::{
        CommandGenerator, Generator, GeneratorOptions, GeneratorReport, GeneratorRequest,
        GeneratorStatus,
    };
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn request() -> GeneratorRequest {
        GeneratorRequest {
            input: PathBuf::from("/data/ply/room.ply"),
            annotations: PathBuf::from("/data/sections/room.json"),
            output_dir: PathBuf::from("density_images"),
        }
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    // Tests the default command runs the density script through python3
    // Verified by dropping the script from the default prefix
    #[test]
    fn test_default_command() {
        let generator = CommandGenerator::default();

        assert_eq!(generator.program(), "python3");
        assert_eq!(
            generator.arguments(&request()),
            os(&[
                "src/generate_density_image.py",
                "/data/ply/room.ply",
                "--annotations",
                "/data/sections/room.json",
                "--output_dir",
                "density_images",
                "--high_res",
            ])
        );
    }

    // Tests a custom command prefix replaces program and leading args
    // Verified by appending the default script after the custom prefix
    #[test]
    fn test_custom_command() {
        let command = vec!["render".to_string(), "--fast".to_string()];
        let generator = CommandGenerator::from_command(&command, GeneratorOptions::default());

        assert_eq!(generator.program(), "render");
        let args = generator.arguments(&request());
        assert_eq!(args.first(), Some(&OsString::from("--fast")));
        assert_eq!(args.get(1), Some(&OsString::from("/data/ply/room.ply")));
    }

    // Tests every forwarded option in order
    // Verified by emitting --no_flip_y when flip_y is set
    #[test]
    fn test_options_to_args() {
        let options = GeneratorOptions {
            high_res: true,
            resolution: Some(200),
            connected_components: true,
            remove_outliers: true,
            flip_y: false,
        };

        assert_eq!(
            options.to_args(),
            os(&[
                "--high_res",
                "--resolution",
                "200",
                "--use_connected_components",
                "--remove_outliers",
                "--no_flip_y",
            ])
        );
    }

    // Tests disabling the quality flag leaves no switches
    // Verified by always emitting --high_res
    #[test]
    fn test_options_without_high_res() {
        let options = GeneratorOptions {
            high_res: false,
            ..GeneratorOptions::default()
        };

        assert!(options.to_args().is_empty());
    }

    // Tests report constructors and status classification
    // Verified by treating exit code 0 as failure
    #[test]
    fn test_report_status() {
        assert!(GeneratorReport::success().status.is_success());
        let failed = GeneratorReport::exit_code(3, "bad");
        assert_eq!(failed.status, GeneratorStatus::ExitCode(3));
        assert_eq!(failed.stderr, "bad");
        assert!(!GeneratorStatus::Signal.is_success());
        assert!(!GeneratorStatus::LaunchFailed(String::new()).is_success());
    }

    // Tests a missing program becomes a launch failure
    // Verified by panicking on spawn errors
    #[test]
    fn test_launch_failure() {
        let command = vec!["densebatch-test-no-such-generator-binary".to_string()];
        let mut generator = CommandGenerator::from_command(&command, GeneratorOptions::default());

        let report = generator.generate(&request());
        assert!(matches!(report.status, GeneratorStatus::LaunchFailed(_)));
    }

    // Tests exit codes and stderr are captured from a real process
    // Verified by discarding stderr
    #[cfg(unix)]
    #[test]
    fn test_exit_code_and_stderr_captured() {
        let command: Vec<String> = ["sh", "-c", "echo \"$2\" >&2; echo done; exit 4", "sh"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut generator = CommandGenerator::from_command(&command, GeneratorOptions::default());

        let report = generator.generate(&request());
        assert_eq!(report.status, GeneratorStatus::ExitCode(4));
        assert_eq!(report.stderr.trim(), "--annotations");
        assert_eq!(report.stdout.trim(), "done");
    }

    // Tests a zero exit is reported as success
    // Verified by mapping every exit code to ExitCode
    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let command = vec!["true".to_string()];
        let mut generator = CommandGenerator::from_command(&command, GeneratorOptions::default());

        assert!(generator.generate(&request()).status.is_success());
    }
}
