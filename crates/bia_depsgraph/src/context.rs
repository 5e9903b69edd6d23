use std::marker::PhantomData;
use std::ops::Deref;

use bia_core::EvalError;
use bia_scene::Scene;

use crate::evaluation::Evaluation;

/// The host's dependency-graph evaluator.
///
/// The frame cursor is process-wide state: whatever frame is set here is the
/// frame every reader of the scene sees.
pub trait DependencyGraph {
    /// Current frame cursor.
    fn frame(&self) -> i32;

    /// Moves the frame cursor.
    fn set_frame(&mut self, frame: i32);

    /// Evaluates `scene` at the current frame.
    ///
    /// An object that fails to evaluate is reported in [`Evaluation::errors`]
    /// and does not fail the evaluation of the others. `Err` is for failures
    /// of the graph as a whole.
    fn evaluate(&mut self, scene: &Scene) -> Result<Evaluation, EvalError>;

    /// Whether live instances carry stable ids. Older evaluators do not.
    fn supports_stable_ids(&self) -> bool {
        true
    }
}

/// Exclusive access to the frame cursor for the duration of a bake.
pub struct EvaluationContext<'g> {
    graph: &'g mut dyn DependencyGraph,
}

impl<'g> EvaluationContext<'g> {
    pub fn new(graph: &'g mut dyn DependencyGraph) -> Self {
        Self { graph }
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> i32 {
        self.graph.frame()
    }

    #[inline]
    #[must_use]
    pub fn supports_stable_ids(&self) -> bool {
        self.graph.supports_stable_ids()
    }

    /// Evaluates the scene at the current frame without moving the cursor.
    pub fn evaluate_current(&mut self, scene: &Scene) -> Result<EvaluatedGraph<'_>, EvalError> {
        let evaluation = self.graph.evaluate(scene)?;
        Ok(EvaluatedGraph::new(evaluation))
    }

    /// Moves the frame cursor to `frame` and evaluates the scene there.
    pub fn advance_to(&mut self, scene: &Scene, frame: i32) -> Result<EvaluatedGraph<'_>, EvalError> {
        self.graph.set_frame(frame);
        self.evaluate_current(scene)
    }
}

/// An evaluation borrowed from its [`EvaluationContext`].
///
/// While it is alive the context cannot evaluate again, so live instances can
/// never outlive the frame they belong to.
pub struct EvaluatedGraph<'ctx> {
    evaluation: Evaluation,
    _context: PhantomData<&'ctx mut ()>,
}

impl EvaluatedGraph<'_> {
    fn new(evaluation: Evaluation) -> Self {
        Self {
            evaluation,
            _context: PhantomData,
        }
    }
}

impl Deref for EvaluatedGraph<'_> {
    type Target = Evaluation;

    fn deref(&self) -> &Evaluation {
        &self.evaluation
    }
}
