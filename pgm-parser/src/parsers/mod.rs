use std::error::Error;

use pgm_core::pointcloud::point::PointCloud;

pub mod csv;
pub mod las;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Las,
    Laz,
    Csv,
    Txt,
}

pub fn get_extension(ext: &str) -> Option<Extension> {
    match ext.to_ascii_lowercase().as_str() {
        "las" => Some(Extension::Las),
        "laz" => Some(Extension::Laz),
        "csv" => Some(Extension::Csv),
        "txt" | "xyz" => Some(Extension::Txt),
        _ => None,
    }
}

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<PointCloud, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_extension_is_case_insensitive() {
        assert_eq!(get_extension("LAS"), Some(Extension::Las));
        assert_eq!(get_extension("laz"), Some(Extension::Laz));
        assert_eq!(get_extension("Csv"), Some(Extension::Csv));
        assert_eq!(get_extension("xyz"), Some(Extension::Txt));
        assert_eq!(get_extension("ply"), None);
    }
}
