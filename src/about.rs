/// Static description shown by [`crate::operator::ShowReadme`].
pub const PLUGIN_DESCRIPTION: &str = "Bake Instance Animation

Bakes the instances a geometry-node setup generates into ordinary objects with keyframe animation.

Main features:
- Instance baking: every generated instance becomes an independent mesh object
- Animation preservation: each object follows its own instance, frame by frame
- Collection management: baked objects are gathered in a dedicated collection
- Parameter configuration: collection name and frame range are configurable
- Feedback: a summary is reported when the bake finishes or fails

Leave the collection name blank to bake into 'bake_animation'.";
