//! Error Types
//!
//! Every failure a bake can run into is described here, grouped by the stage
//! that produces it:
//!
//! - [`ExtractError`]: turning evaluated geometry into a standalone mesh
//! - [`EvalError`]: evaluating the dependency graph at a frame
//! - [`SceneError`]: reading or writing the persistent scene store
//! - [`BakeError`]: the run-level error surfaced to the user
//!
//! Extraction failures are recovered per instance and never reach the user as a
//! [`BakeError`]; they are counted in the run report instead.

use thiserror::Error;

/// Failure while copying evaluated geometry into a mesh snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A triangle refers to a vertex that does not exist.
    #[error("Face index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        /// The offending index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// The index buffer is not a whole number of triangles.
    #[error("Index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// A vertex position is NaN or infinite.
    #[error("Vertex {0} has a non-finite position")]
    NonFiniteVertex(usize),

    /// The object has no evaluated counterpart in this evaluation.
    #[error("Object '{0}' was not evaluated")]
    NotEvaluated(String),
}

/// Failure while evaluating the dependency graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A procedural modifier references a node group the evaluator does not know.
    #[error("Object '{object}' uses unknown node group '{node_group}'")]
    UnknownNodeGroup {
        /// Name of the object carrying the modifier
        object: String,
        /// Name of the missing node group
        node_group: String,
    },

    /// A generator reported an error for the given frame.
    #[error("Node group '{node_group}' failed at frame {frame}: {message}")]
    Generator {
        /// Name of the failing node group
        node_group: String,
        /// Frame being evaluated
        frame: i32,
        /// Generator supplied message
        message: String,
    },

    /// The evaluation does not contain the requested object.
    #[error("Object '{0}' is missing from the evaluated graph")]
    MissingObject(String),
}

/// Failure while accessing the persistent scene store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The object handle is stale.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// The collection handle is stale.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}

/// The run-level error of a bake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BakeError {
    /// Nothing in the selection can be baked. Raised before the scene is touched.
    #[error("Please select objects containing geometry nodes instances.")]
    NoEligibleSelection,

    /// Dependency graph evaluation failed.
    #[error(transparent)]
    Evaluation(#[from] EvalError),

    /// The scene store rejected an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Alias for `Result<T, BakeError>`.
pub type Result<T> = std::result::Result<T, BakeError>;
