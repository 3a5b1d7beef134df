use std::fs;
use std::path::Path;

use pgm_core::error::SliceError;
use pgm_core::pointcloud::point::Point;
use pgm_exporter::{MapSlicer, PgmSlicer};

fn diagonal_slicer() -> PgmSlicer {
    let mut slicer = PgmSlicer::new();
    slicer
        .load(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
            Point::new(3.0, 3.0, 3.0),
        ])
        .unwrap();
    slicer
}

fn read_pgm_pixels(path: &Path) -> (usize, usize, Vec<u8>) {
    let contents = fs::read_to_string(path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("P2"));
    let mut dims = lines.next().unwrap().split_whitespace();
    let width: usize = dims.next().unwrap().parse().unwrap();
    let height: usize = dims.next().unwrap().parse().unwrap();
    assert_eq!(lines.next(), Some("255"));
    let pixels: Vec<u8> = lines
        .flat_map(|line| line.split_whitespace())
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(pixels.len(), width * height);
    (width, height, pixels)
}

#[test]
fn test_convert_writes_pgm_and_yaml() {
    let slicer = diagonal_slicer();
    let dir = tempfile::tempdir().unwrap();

    let (pgm_path, yaml_path) = slicer
        .convert(0.0, 3.0, 1.0, dir.path(), "test_map.pgm", 0.65, 0.2, 0)
        .unwrap();

    assert!(pgm_path.exists());
    assert!(yaml_path.exists());

    let contents = fs::read_to_string(&pgm_path).unwrap();
    assert_eq!(contents.lines().next(), Some("P2"));

    let (width, height, pixels) = read_pgm_pixels(&pgm_path);
    assert_eq!((width, height), (3, 3));
    assert_eq!(pixels.iter().filter(|&&v| v == 0).count(), 4);
    assert!(pixels.iter().all(|&v| v == 0 || v == 254));
}

#[test]
fn test_convert_yaml_fields() {
    let slicer = diagonal_slicer();
    let dir = tempfile::tempdir().unwrap();

    let (_, yaml_path) = slicer
        .convert(0.0, 3.0, 0.5, dir.path(), "map.pgm", 0.65, 0.2, 1)
        .unwrap();

    let contents = fs::read_to_string(&yaml_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "image: map.pgm",
            "resolution: 0.5",
            "origin: [0, 0, 0.0]",
            "negate: 1",
            "occupied_thresh: 0.65",
            "free_thresh: 0.2",
        ]
    );
}

#[test]
fn test_convert_negate_is_exact_complement() {
    let slicer = diagonal_slicer();
    let dir = tempfile::tempdir().unwrap();

    let (plain_path, _) = slicer
        .convert(0.0, 3.0, 1.0, dir.path(), "plain.pgm", 0.65, 0.2, 0)
        .unwrap();
    let (negated_path, _) = slicer
        .convert(0.0, 3.0, 1.0, dir.path(), "negated.pgm", 0.65, 0.2, 1)
        .unwrap();

    let (_, _, plain) = read_pgm_pixels(&plain_path);
    let (_, _, negated) = read_pgm_pixels(&negated_path);
    assert_eq!(plain.len(), negated.len());
    for (a, b) in plain.iter().zip(negated.iter()) {
        match a {
            0 => assert_eq!(*b, 254),
            254 => assert_eq!(*b, 0),
            other => panic!("unexpected pixel value {}", other),
        }
    }
}

#[test]
fn test_convert_empty_subset_yields_degenerate_grid() {
    let slicer = diagonal_slicer();
    let dir = tempfile::tempdir().unwrap();

    // No point has z in [10, 20]; conversion must still succeed.
    let (pgm_path, yaml_path) = slicer
        .convert(10.0, 20.0, 1.0, dir.path(), "empty.pgm", 0.65, 0.2, 0)
        .unwrap();

    assert!(yaml_path.exists());
    let (width, height, pixels) = read_pgm_pixels(&pgm_path);
    assert_eq!((width, height), (1, 1));
    assert_eq!(pixels, vec![254]);

    // Anchored at the stored cloud's bounding box.
    let contents = fs::read_to_string(&yaml_path).unwrap();
    assert!(contents.contains("origin: [0, 0, 0.0]"));
}

#[test]
fn test_convert_missing_output_dir_is_io_error() {
    let slicer = diagonal_slicer();
    let result = slicer.convert(
        0.0,
        3.0,
        1.0,
        Path::new("/nonexistent/output/dir"),
        "map.pgm",
        0.65,
        0.2,
        0,
    );
    assert!(matches!(result, Err(SliceError::Io(_))));
}

#[test]
fn test_convert_invalid_resolution() {
    let slicer = diagonal_slicer();
    let dir = tempfile::tempdir().unwrap();
    let result = slicer.convert(0.0, 3.0, 0.0, dir.path(), "map.pgm", 0.65, 0.2, 0);
    assert!(matches!(result, Err(SliceError::InvalidResolution(_))));
}

#[test]
fn test_convert_min_occupied_points_threshold() {
    let mut slicer = PgmSlicer::new();
    slicer
        .load(vec![
            Point::new(0.1, 0.1, 0.0),
            Point::new(0.2, 0.2, 0.0),
            Point::new(1.5, 1.5, 0.0),
        ])
        .unwrap();
    slicer.min_occupied_points = 2;

    let dir = tempfile::tempdir().unwrap();
    let (pgm_path, _) = slicer
        .convert(0.0, 1.0, 1.0, dir.path(), "sparse.pgm", 0.65, 0.2, 0)
        .unwrap();

    // Only the doubly-hit cell counts as occupied.
    let (_, _, pixels) = read_pgm_pixels(&pgm_path);
    assert_eq!(pixels.iter().filter(|&&v| v == 0).count(), 1);
}
