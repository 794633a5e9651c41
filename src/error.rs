use thiserror::Error;

/// Structural errors reported while assembling an [`XmlTree`](crate::dom::XmlTree).
///
/// Matching itself never fails; these only surface from
/// [`TreeBuilder::finish`](crate::dom::TreeBuilder::finish).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("end element without a matching start element")]
    UnexpectedEnd,

    #[error("tag mismatch: <{expected}> closed with </{found}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("unclosed element: <{name}>")]
    Unclosed { name: String },

    #[error("attribute '{name}' does not directly follow a start element")]
    MisplacedAttribute { name: String },

    #[error("element has more than {max} attributes", max = u16::MAX)]
    TooManyAttributes,

    #[error("document exceeds the arena limit of {max} nodes", max = u32::MAX)]
    TooManyNodes,
}
