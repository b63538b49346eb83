//! Error types for document tree parsing.

/// Error parsing converter output into a document tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// XML parse error.
    #[error("XML parse error")]
    Xml(#[from] quick_xml::Error),

    /// Encoding error while decoding reader content.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
