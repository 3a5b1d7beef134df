use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;
use std::thread;

use chrono::Local;
use clap::Parser;
use crossbeam::channel::{bounded, Receiver};
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use pgm_core::pointcloud::point::PointCloud;
use pgm_exporter::{MapSlicer, PgmSlicer};
use pgm_parser::parsers::csv::CsvParserProvider;
use pgm_parser::parsers::las::LasParserProvider;
use pgm_parser::parsers::{get_extension, Extension, ParserProvider as _};

#[derive(Parser, Debug)]
#[command(
    name = "Point Cloud to PGM",
    about = "A tool for slicing point clouds into 2D occupancy-grid maps",
    author = "Ryo Funai",
    version = "0.0.1"
)]
struct Cli {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    #[arg(short, long, required = true, value_name = "DIR")]
    output: String,

    #[arg(long, default_value = "map.pgm")]
    filename: String,

    /// Lower bound of the elevation slab. Defaults to the cloud's minimum z.
    #[arg(long)]
    min_z: Option<f64>,

    /// Upper bound of the elevation slab. Defaults to the cloud's maximum z.
    #[arg(long)]
    max_z: Option<f64>,

    /// Map resolution in meters per pixel.
    #[arg(short, long, default_value_t = 0.05)]
    resolution: f64,

    #[arg(long, default_value_t = 0.65)]
    occupied_thresh: f64,

    #[arg(long, default_value_t = 0.2)]
    free_thresh: f64,

    #[arg(long, default_value_t = 0)]
    negate: u8,

    /// Minimum number of projected points for a cell to count as occupied.
    #[arg(long, default_value_t = 1)]
    min_points: u32,
}

fn check_and_get_extension(paths: &[PathBuf]) -> Result<Extension, String> {
    let mut extensions = vec![];
    for path in paths.iter() {
        let extension = path.extension().and_then(OsStr::to_str);
        match extension {
            Some(ext) => extensions.push(ext),
            None => return Err("File extension is not found".to_string()),
        }
    }
    extensions.sort();
    extensions.dedup();

    if extensions.len() > 1 {
        return Err("Multiple extensions are not supported".to_string());
    }

    get_extension(extensions[0])
        .ok_or_else(|| format!("Unsupported file extension: {}", extensions[0]))
}

fn expand_globs(input_patterns: Vec<String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob(&pattern).expect("Failed to read glob pattern") {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => eprintln!("Error: {:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

/// Parses the input files off the main thread and delivers the result over
/// a channel, so a front end can keep its event loop responsive.
fn spawn_loader(
    extension: Extension,
    input_files: Vec<PathBuf>,
) -> Receiver<Result<PointCloud, String>> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        let parser = match extension {
            Extension::Las | Extension::Laz => {
                let provider = LasParserProvider {
                    filenames: input_files,
                };
                provider.get_parser()
            }
            Extension::Csv | Extension::Txt => {
                let provider = CsvParserProvider {
                    filenames: input_files,
                };
                provider.get_parser()
            }
        };
        let result = parser.parse().map_err(|e| e.to_string());
        let _ = sender.send(result);
    });
    receiver
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("input files: {:?}", args.input);
    log::info!("output folder: {}", args.output);
    log::info!("resolution: {} [m/px]", args.resolution);

    let start = std::time::Instant::now();

    let input_files = expand_globs(args.input);
    log::info!("Expanded input files: {:?}", input_files);
    if input_files.is_empty() {
        log::error!("No input files found");
        std::process::exit(1);
    }

    let extension = match check_and_get_extension(&input_files) {
        Ok(extension) => extension,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let output_path = PathBuf::from(args.output);
    if let Err(e) = std::fs::create_dir_all(&output_path) {
        log::error!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    log::info!("start parsing...");
    let start_local = std::time::Instant::now();
    let receiver = spawn_loader(extension, input_files);
    let point_cloud = match receiver.recv() {
        Ok(Ok(point_cloud)) => point_cloud,
        Ok(Err(e)) => {
            log::error!("Failed to parse point cloud: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("Loader thread terminated unexpectedly: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("finish parsing in {:?}", start_local.elapsed());

    let mut slicer = PgmSlicer::new();
    slicer.min_occupied_points = args.min_points;
    if let Err(e) = slicer.load(point_cloud.points) {
        log::error!("Failed to load point cloud: {}", e);
        std::process::exit(1);
    }

    let store = slicer.store();
    let overall_min = store.overall_z_min().unwrap_or(0.0);
    let overall_max = store.overall_z_max().unwrap_or(0.0);
    log::info!(
        "loaded {} points, z range [{}, {}]",
        store.point_count(),
        overall_min,
        overall_max
    );

    // The slab bounds are the front end's responsibility: clamp them into
    // the cloud's z range and swap if inverted before calling the core.
    let mut min_z = args
        .min_z
        .unwrap_or(overall_min)
        .clamp(overall_min, overall_max);
    let mut max_z = args
        .max_z
        .unwrap_or(overall_max)
        .clamp(overall_min, overall_max);
    if min_z > max_z {
        std::mem::swap(&mut min_z, &mut max_z);
    }
    log::info!("slab range: [{}, {}]", min_z, max_z);
    log::info!("points in slab: {}", slicer.filter(min_z, max_z).len());

    log::info!("start converting...");
    let start_local = std::time::Instant::now();
    match slicer.convert(
        min_z,
        max_z,
        args.resolution,
        &output_path,
        &args.filename,
        args.occupied_thresh,
        args.free_thresh,
        args.negate,
    ) {
        Ok((pgm_path, yaml_path)) => {
            log::info!("wrote PGM: {:?}", pgm_path);
            log::info!("wrote metadata: {:?}", yaml_path);
        }
        Err(e) => {
            log::error!("Failed to convert point cloud: {}", e);
            std::process::exit(1);
        }
    }
    log::info!("Finish converting in {:?}", start_local.elapsed());

    log::info!("Elapsed: {:?}", start.elapsed());
}
