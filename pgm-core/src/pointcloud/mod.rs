pub mod decimation;
pub mod filter;
pub mod point;
pub mod store;
