//! User-facing actions.

use bia_core::BakeSettings;
use bia_depsgraph::DependencyGraph;
use bia_scene::Scene;

use crate::about::PLUGIN_DESCRIPTION;
use crate::bake::bake_instance_animation;
use crate::report::BakeReport;

/// What an action reports back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorOutcome {
    Finished(String),
    Cancelled(String),
}

impl OperatorOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Finished(message) | Self::Cancelled(message) => message,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// The "bake" action.
#[derive(Debug, Clone, Default)]
pub struct BakeInstanceAnimation {
    pub settings: BakeSettings,
}

impl BakeInstanceAnimation {
    #[must_use]
    pub fn new(settings: BakeSettings) -> Self {
        Self { settings }
    }

    /// Runs the bake and returns the report alongside the user message.
    pub fn run(
        &self,
        scene: &mut Scene,
        graph: &mut dyn DependencyGraph,
    ) -> (OperatorOutcome, Option<BakeReport>) {
        match bake_instance_animation(scene, graph, &self.settings) {
            Ok(report) => {
                let outcome = match report.first_error() {
                    Some(err) => OperatorOutcome::Cancelled(format!("Baking failed: {err}")),
                    None => OperatorOutcome::Finished(format!(
                        "Instance animation baking completed! {} frames processed.",
                        report.frames_processed()
                    )),
                };
                (outcome, Some(report))
            }
            Err(err) => (OperatorOutcome::Cancelled(format!("Baking failed: {err}")), None),
        }
    }

    pub fn execute(&self, scene: &mut Scene, graph: &mut dyn DependencyGraph) -> OperatorOutcome {
        self.run(scene, graph).0
    }
}

/// The informational action: shows the static description, one line per label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowReadme;

impl ShowReadme {
    pub fn lines(self) -> impl Iterator<Item = &'static str> {
        PLUGIN_DESCRIPTION.lines()
    }

    /// Finishes with the whole description as the message.
    #[must_use]
    pub fn execute(self) -> OperatorOutcome {
        OperatorOutcome::Finished(PLUGIN_DESCRIPTION.to_owned())
    }
}
