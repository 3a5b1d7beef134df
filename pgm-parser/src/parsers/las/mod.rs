use std::{error::Error, path::PathBuf};

use las::Reader;

use pgm_core::pointcloud::point::{Point, PointCloud};

use super::{Parser, ParserProvider};

pub struct LasParserProvider {
    pub filenames: Vec<PathBuf>,
}

impl ParserProvider for LasParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(LasParser {
            filenames: self.filenames.clone(),
        })
    }
}

pub struct LasParser {
    pub filenames: Vec<PathBuf>,
}

impl Parser for LasParser {
    fn parse(&self) -> Result<PointCloud, Box<dyn Error>> {
        let mut points = Vec::new();
        for filename in &self.filenames {
            let mut reader = Reader::from_path(filename)?;
            for las_point in reader.points() {
                let las_point = las_point?;
                points.push(Point::new(las_point.x, las_point.y, las_point.z));
            }
        }
        Ok(PointCloud::new(points))
    }
}
