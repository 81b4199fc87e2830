pub mod segmenter;
pub mod catalog;
pub mod reader;
pub mod session;
pub mod render;
pub mod export;

// Re-export main types for convenient access
pub use segmenter::{
    segment, BoundaryRules, RawSentence, Segmenter
};

pub use catalog::{parse_catalog, find_guide, GuideEntry};
pub use reader::{GuideLibrary, ReaderConfig};
pub use session::{ReaderSession, Selection};
