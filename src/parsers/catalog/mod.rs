//! Pickett/JPL-CDMS catalog line list decoding
//!
//! - [`layout`] - fixed-column split of a single line
//! - [`intensity`] - line strength, Einstein A and upper state energy
//! - [`decoder`] - whole-file orchestration with all-or-nothing semantics

pub mod decoder;
pub mod intensity;
pub mod layout;

pub use decoder::{CatalogDecoder, decode_catalog};
pub use intensity::LineStrength;
pub use layout::RawCatalogLine;
