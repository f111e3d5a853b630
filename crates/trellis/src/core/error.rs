use std::result::Result as StdResult;

use thiserror::Error;

use crate::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A node id that is not (or no longer) in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Measure or arrange was requested on a node the root cannot reach.
    #[error("node is detached from the layout root: {0:?}")]
    Detached(NodeId),

    /// Arrange was requested before a measure following the last invalidation.
    #[error("node arranged before it was measured: {0:?}")]
    NotMeasured(NodeId),

    /// More than one stretch child inside a single stack layout.
    #[error("more than one stretch control under {parent:?}: {first:?} and {second:?}")]
    MultipleStretch {
        /// The stack layout node.
        parent: NodeId,
        /// The first stretch child encountered.
        first: NodeId,
        /// The offending second stretch child.
        second: NodeId,
    },

    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },

    /// A child appears twice in a child list.
    #[error("duplicate child {child:?} under {parent:?}")]
    DuplicateChild {
        /// Parent node.
        parent: NodeId,
        /// Duplicated child.
        child: NodeId,
    },

    /// A control was accessed while its own measure or arrange was running.
    #[error("re-entrant control access: {0:?}")]
    ReentrantControl(NodeId),

    /// Operation not permitted on this node.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Invalid input error.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Scene parsing or construction failure.
    #[error("scene: {0}")]
    Scene(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Scene(e.to_string())
    }
}
