//! Input reading and row normalization

pub mod normalize;
pub mod reader;

pub use normalize::normalize;
pub use reader::read_table;
