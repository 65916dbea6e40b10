//! Blog export to markdown conversion
//!
//! Converts posts exported from a blog (`---` front matter, `[java]` code tags, `[notice]`
//! and `[caption]` blocks) into markdown with a fixed front matter header.

mod front_matter;
mod line_converter;
mod options;
mod report;

pub use front_matter::{FrontMatterAction, FrontMatterState};
pub use line_converter::{
    output_path_for, ConversionPaths, ConversionResult, ConvertError, LineConverter,
};
pub use options::ConvertOptions;
pub use report::{ConversionReport, ConversionStatistics, ConvertWarning, WarningKind};
