use std::{collections::HashMap, error::Error, path::PathBuf};

use csv::ReaderBuilder;

use pgm_core::pointcloud::point::{Point, PointCloud};

use super::{Parser, ParserProvider};

pub struct CsvParserProvider {
    pub filenames: Vec<PathBuf>,
}

impl ParserProvider for CsvParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(CsvParser {
            filenames: self.filenames.clone(),
        })
    }
}

pub struct CsvParser {
    pub filenames: Vec<PathBuf>,
}

impl Parser for CsvParser {
    fn parse(&self) -> Result<PointCloud, Box<dyn Error>> {
        let mut points = Vec::new();
        for filename in &self.filenames {
            read_points(filename, &mut points)?;
        }
        Ok(PointCloud::new(points))
    }
}

fn read_points(filename: &PathBuf, points: &mut Vec<Point>) -> Result<(), Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(filename)?;
    let headers = reader.headers()?.clone();

    match create_field_mapping(&headers)? {
        Some(mapping) => {
            for record in reader.records() {
                let record = record?;
                points.push(parse_point(&record, &mapping)?);
            }
        }
        None => {
            // Headerless file: columns are x, y, z in order, and the first
            // row is already data, so reopen without header handling.
            let mapping = positional_mapping();
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .trim(csv::Trim::All)
                .from_path(filename)?;
            for record in reader.records() {
                let record = record?;
                points.push(parse_point(&record, &mapping)?);
            }
        }
    }

    Ok(())
}

fn positional_mapping() -> HashMap<String, usize> {
    HashMap::from([
        ("x".to_string(), 0),
        ("y".to_string(), 1),
        ("z".to_string(), 2),
    ])
}

/// Maps the x/y/z coordinate columns from the header row. `Ok(None)` means
/// the file has no header row (the first row parses as coordinates).
fn create_field_mapping(
    headers: &csv::StringRecord,
) -> Result<Option<HashMap<String, usize>>, Box<dyn Error>> {
    let mut mapping = HashMap::new();

    for (index, header) in headers.iter().enumerate() {
        let normalized_header = header.to_lowercase().replace(['_', '-'], "");
        for attr_name in ["x", "y", "z"] {
            if normalized_header == attr_name {
                mapping.insert(attr_name.to_string(), index);
                break;
            }
        }
    }

    let looks_like_data = headers.len() >= 3
        && headers
            .iter()
            .take(3)
            .all(|field| field.parse::<f64>().is_ok());
    if mapping.len() < 3 && looks_like_data {
        return Ok(None);
    }

    for attr_name in ["x", "y", "z"] {
        if !mapping.contains_key(attr_name) {
            return Err(format!(
                "Required attribute '{}' is missing in CSV headers or mapping.",
                attr_name
            )
            .into());
        }
    }

    Ok(Some(mapping))
}

fn parse_point(
    record: &csv::StringRecord,
    mapping: &HashMap<String, usize>,
) -> Result<Point, Box<dyn Error>> {
    let x = parse_field(record, mapping, "x")?;
    let y = parse_field(record, mapping, "y")?;
    let z = parse_field(record, mapping, "z")?;
    Ok(Point::new(x, y, z))
}

fn parse_field(
    record: &csv::StringRecord,
    mapping: &HashMap<String, usize>,
    field_name: &str,
) -> Result<f64, Box<dyn Error>> {
    let index = *mapping
        .get(field_name)
        .ok_or_else(|| format!("Missing '{}' field", field_name))?;
    let value_str = record
        .get(index)
        .ok_or_else(|| format!("Missing '{}' field", field_name))?;
    let value = value_str
        .parse()
        .map_err(|e| format!("Failed to parse '{}': {}", field_name, e))?;
    Ok(value)
}
