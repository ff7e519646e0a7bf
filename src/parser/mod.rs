// Dataset item parsing
pub mod item_parser;

pub use item_parser::{ItemParser, Parser};
