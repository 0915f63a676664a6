use thiserror::Error;

/// Errors that can occur while parsing a VML document
///
/// Parsing is all-or-nothing: a document that fails with any of these adds
/// nothing to the arena.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Input had no element at all
    #[error("Document contains no element")]
    Empty,

    /// A second top-level element followed the root
    #[error("Document has more than one top-level element, found <{element}> after the root")]
    MultipleRoots { element: String },

    /// `<![CDATA[` without a matching `]]>`
    #[error("Unterminated CDATA section at byte {offset}")]
    UnterminatedCdata { offset: usize },

    /// `<!` followed by anything other than a comment or CDATA section
    #[error("Unknown directive at byte {offset}")]
    UnknownDirective { offset: usize },

    /// A raw `<` inside a tag, or a `>` inside a quoted attribute value
    #[error("Bracket inside tag at byte {offset}, use entities")]
    BracketInTag { offset: usize },

    /// Closing tag does not match the innermost open element
    #[error("Element nesting error: expected </{expected}>, found </{found}>")]
    NestingMismatch { expected: String, found: String },

    /// Attribute list of an element could not be parsed
    #[error("Malformed attribute list in element <{element}>")]
    AttributeParse { element: String },

    /// Input ended inside a tag or with elements still open
    #[error("Unterminated element <{element}>")]
    Unterminated { element: String },
}
