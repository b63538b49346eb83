//! Document tree model for wordwiki.
//!
//! Parses the HTML-like output of the upstream document converter into a
//! tree of classified nodes, and carries the pre-conversion passes that
//! annotate that tree: image identity stamping and heading collection.
//!
//! # Example
//!
//! ```
//! let mut root = ww_dom::parse("<p><img src=\"a.png\"/></p>").unwrap();
//! let catalog = ww_dom::stamp_image_identities(&mut root, "Doc");
//! assert_eq!(catalog[0].standardized_name, "Doc-1.png");
//! ```

mod entities;
mod error;
mod headings;
mod images;
mod node;
mod parser;

pub use entities::normalize_entities;
pub use error::ParseError;
pub use headings::{HeadingRecord, collect_headings, nearest_heading, sanitize_file_name};
pub use images::{
    IMAGE_ID_ATTR, IMAGE_NAME_ATTR, ImageIdentity, stamp_image_identities, standardized_name,
};
pub use node::{DocumentNode, Element, NodeKind};
pub use parser::parse;
