//! Image identity stamping.
//!
//! Walks a document tree in document order and stamps each image element
//! with a 1-based identifier and a standardized asset name. The archive
//! extractor numbers images the same way on its own pass, so the two
//! sides meet on identical names without ever sharing state.
//!
//! Stamping must run before any structural rewriting of the tree; a
//! changed traversal order would desynchronize the two numberings.

use tracing::debug;

use crate::node::{DocumentNode, Element, NodeKind};

/// Attribute stamped with the 1-based document-order identifier.
pub const IMAGE_ID_ATTR: &str = "image-id";

/// Attribute stamped with the standardized asset name.
pub const IMAGE_NAME_ATTR: &str = "image-name";

/// Raster extensions the archive extractor recognizes.
const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

/// One stamped image, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIdentity {
    /// 1-based document-order identifier.
    pub id: usize,
    /// Standardized asset name, `<stem>-<id>.<ext>`.
    pub standardized_name: String,
}

/// Stamp every image element with identity attributes.
///
/// Identifiers are assigned in document order starting at 1. Returns the
/// catalog of stamped identities so callers can correlate against the
/// extractor's positionally aligned asset list without re-walking the
/// tree. Attributes are added in place; no node is removed or reordered.
pub fn stamp_image_identities(root: &mut Element, stem: &str) -> Vec<ImageIdentity> {
    let mut catalog = Vec::new();
    stamp_subtree(root, stem, &mut catalog);
    debug!("stamped {} image identities", catalog.len());
    catalog
}

fn stamp_subtree(element: &mut Element, stem: &str, catalog: &mut Vec<ImageIdentity>) {
    for child in &mut element.children {
        let DocumentNode::Element(child) = child else {
            continue;
        };
        if child.kind == NodeKind::Image {
            let id = catalog.len() + 1;
            let name = standardized_name(stem, id, extension_for(child.attr("src")));
            child.set_attr(IMAGE_ID_ATTR, id.to_string());
            child.set_attr(IMAGE_NAME_ATTR, name.clone());
            catalog.push(ImageIdentity {
                id,
                standardized_name: name,
            });
        }
        stamp_subtree(child, stem, catalog);
    }
}

/// The standardized asset name for an image.
///
/// Both this crate and the archive extractor derive names through this
/// one scheme, keyed only on the shared stem and document position.
#[must_use]
pub fn standardized_name(stem: &str, id: usize, ext: &str) -> String {
    format!("{stem}-{id}.{ext}")
}

fn extension_for(src: Option<&str>) -> &'static str {
    let Some(src) = src else { return "png" };
    let ext = src.rsplit('.').next().unwrap_or("");
    RASTER_EXTENSIONS
        .iter()
        .find(|known| ext.eq_ignore_ascii_case(known))
        .copied()
        .unwrap_or("png")
}
