//! Tests for input discovery and base-name path derivation

#[cfg(test)]
mod tests {
    use densebatch::BatchError;
    use densebatch::batch::layout::{BatchLayout, base_name};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn layout_in(root: &Path) -> BatchLayout {
        BatchLayout::new(root.join("ply"), root.join("sections"), root.join("out"))
    }

    // Tests discovery keeps only .ply files and sorts them
    // Verified by removing the sort
    #[test]
    fn test_discover_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let layout = layout_in(temp_dir.path());
        fs::create_dir(&layout.input_dir).unwrap();
        for name in ["c.ply", "a.ply", "b.ply", "notes.txt", "d.ply.bak", "noext"] {
            fs::write(layout.input_dir.join(name), "x").unwrap();
        }

        let inputs = layout.discover_inputs().unwrap();
        assert_eq!(
            inputs,
            vec![
                layout.input_dir.join("a.ply"),
                layout.input_dir.join("b.ply"),
                layout.input_dir.join("c.ply"),
            ]
        );
    }

    // Tests extension matching is exact so base names stay unique
    // Verified by lowercasing extensions before comparison
    #[test]
    fn test_discover_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let layout = layout_in(temp_dir.path());
        fs::create_dir(&layout.input_dir).unwrap();
        fs::write(layout.input_dir.join("upper.PLY"), "x").unwrap();
        fs::write(layout.input_dir.join("lower.ply"), "x").unwrap();

        let inputs = layout.discover_inputs().unwrap();
        assert_eq!(inputs, vec![layout.input_dir.join("lower.ply")]);
    }

    // Tests directories named like inputs are ignored
    // Verified by dropping the is_file check
    #[test]
    fn test_discover_ignores_directories() {
        let temp_dir = TempDir::new().unwrap();
        let layout = layout_in(temp_dir.path());
        fs::create_dir_all(layout.input_dir.join("nested.ply")).unwrap();

        assert!(layout.discover_inputs().unwrap().is_empty());
    }

    // Tests a missing input directory reports which directory failed
    // Verified by returning an empty list instead
    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let layout = layout_in(temp_dir.path());

        match layout.discover_inputs() {
            Err(BatchError::InputDirectory { path, .. }) => assert_eq!(path, layout.input_dir),
            other => unreachable!("Expected InputDirectory error, got {other:?}"),
        }
    }

    // Tests annotation path derivation
    // Verified by using the input extension for annotations
    #[test]
    fn test_annotation_path() {
        let layout = BatchLayout::new("in", "sections", "out");
        assert_eq!(
            layout.annotation_path("room_01"),
            PathBuf::from("sections/room_01.json")
        );
    }

    // Tests output artifact derivation
    // Verified by swapping the two suffixes
    #[test]
    fn test_output_artifacts() {
        let layout = BatchLayout::new("in", "sections", "density_images");
        let artifacts = layout.output_artifacts("room_01");

        assert_eq!(
            artifacts.density,
            PathBuf::from("density_images/room_01_density.png")
        );
        assert_eq!(
            artifacts.annotated,
            PathBuf::from("density_images/room_01_annotated.png")
        );
        assert_eq!(
            artifacts.paths(),
            [artifacts.density.as_path(), artifacts.annotated.as_path()]
        );
    }

    // Tests base name strips exactly one extension
    // Verified by splitting on the first dot
    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("dir/room.ply")), "room");
        assert_eq!(base_name(Path::new("scan.2024.ply")), "scan.2024");
        assert_eq!(base_name(Path::new("plain")), "plain");
    }

    // Tests output directory creation including parents, and idempotence
    // Verified by using create_dir instead of create_dir_all
    #[test]
    fn test_ensure_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let layout = BatchLayout::new("in", "sections", temp_dir.path().join("a/b/out"));

        layout.ensure_output_dir().unwrap();
        layout.ensure_output_dir().unwrap();
        assert!(layout.output_dir.is_dir());
    }

    // Tests a file blocking the output directory is reported
    // Verified by ignoring create_dir_all errors
    #[test]
    fn test_ensure_output_dir_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let layout = BatchLayout::new("in", "sections", &blocker);

        assert!(matches!(
            layout.ensure_output_dir(),
            Err(BatchError::OutputDirectory { .. })
        ));
    }
}
