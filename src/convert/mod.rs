//! Data-URL to SVG markup conversion.
//!
//! The conversion core: a pure decoder from `data:image/svg+xml,...` strings
//! to plain markup, plus the types it produces. No XML validation happens
//! here or anywhere else; decoded markup is passed through verbatim.

mod decoder;
mod markup;

pub use decoder::{ConvertError, DATA_URL_PREFIX, decode};
pub use markup::SvgMarkup;

/// Outcome of one conversion cycle, consumed by listeners.
pub type ConversionResult = Result<SvgMarkup, ConvertError>;

/// Sample data URL (a map-pin icon), matching the one the tool's docs use.
pub const EXAMPLE_DATA_URL: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' fill='%23aaaab6' viewBox='0 0 384 512'%3E%3Cpath d='M215.7 499.2C267 435 384 279.4 384 192 384 86 298 0 192 0S0 86 0 192c0 87.4 117 243 168.3 307.2 12.3 15.3 35.1 15.3 47.4 0M192 128a64 64 0 1 1 0 128 64 64 0 1 1 0-128'/%3E%3C/svg%3E";
