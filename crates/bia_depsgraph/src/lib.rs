//! Dependency-graph evaluation.
//!
//! The host's evaluator is consumed through the [`DependencyGraph`] trait. During
//! a bake it is only reachable through an [`EvaluationContext`], which owns the
//! exclusive borrow of the frame cursor: every frame change goes through
//! [`EvaluationContext::advance_to`], and the returned [`EvaluatedGraph`] keeps
//! the context borrowed until it is dropped.
//!
//! [`ProceduralGraph`] is a self-contained evaluator running registered
//! [`Generator`]s in place of geometry-node groups.

pub mod context;
pub mod evaluation;
pub mod procedural;

pub use context::{DependencyGraph, EvaluatedGraph, EvaluationContext};
pub use evaluation::{EvaluatedObject, Evaluation, ExtractionResult, LiveInstance};
pub use procedural::{GeneratedInstance, Generator, GeneratorInput, GeneratorOutput, ProceduralGraph};
