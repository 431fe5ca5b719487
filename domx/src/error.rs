/// Errors raised while building or rendering a tree.
///
/// Every variant is a caller error; nothing in the crate retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// A reserved (`__name__`-style) tag name was requested from a [`crate::Dom`].
    #[error("Bad tag: {0}")]
    BadTagName(String),
    /// Content was supplied to an element that already has content.
    #[error("Content mutation not allowed")]
    ContentMutation {
        /// The tag of the element that rejected the content.
        tag: String,
    },
    /// Content was supplied to a void element.
    #[error("{tag} can not have content body")]
    VoidElementContent {
        /// The tag of the void element.
        tag: String,
    },
    /// A value that is not an element, raw content or text was used as content.
    #[error("Unknown type for variable: {value}")]
    UnknownContentType {
        /// Debug representation of the offending value.
        value: String,
    },
    /// A render was requested with a chunk size of zero.
    #[error("Invalid buffer size {size}")]
    InvalidBufferSize {
        /// The rejected size.
        size: usize,
    },
}
