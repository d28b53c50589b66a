//! File-mutation operations behind the editor endpoints.
//!
//! Every operation is a synchronous read-modify-write of the HTML or CSS
//! source file: parse, mutate the in-memory tree, serialize, write. There is
//! deliberately no locking or rollback; the server handles one request at a
//! time.

pub mod clean;
pub mod ids;
pub mod reorder;
pub mod style;

use thiserror::Error;

/// Attribute correlating browser selections with on-disk nodes.
pub const EDITOR_ID_ATTR: &str = "data-editor-id";

/// Failures of an editor mutation, mapped to HTTP status codes by the server.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no element with editor id \"{0}\"")]
    UnknownId(String),

    #[error("element \"{0}\" has no class attribute to target")]
    MissingClass(String),

    #[error("cannot move an element into its own subtree")]
    CyclicMove,

    #[error("cannot place elements inside <{0}>")]
    VoidTarget(String),

    #[error("invalid value for property \"{property}\": {message}")]
    CssValue { property: String, message: String },

    #[error("failed to parse stylesheet: {0}")]
    CssParse(String),

    #[error("failed to print stylesheet: {0}")]
    CssPrint(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// HTTP status for this failure: caller mistakes are 400, everything
    /// else is on us.
    pub fn status(&self) -> u16 {
        match self {
            Self::UnknownId(_)
            | Self::MissingClass(_)
            | Self::CyclicMove
            | Self::VoidTarget(_)
            | Self::CssValue { .. } => 400,
            Self::CssParse(_) | Self::CssPrint(_) | Self::Io(_) => 500,
        }
    }
}
