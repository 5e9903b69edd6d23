/// Transform property a keyframe track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    Location,
    RotationEuler,
    Scale,
}

impl TransformChannel {
    /// Every channel, in the order keyframes are inserted.
    pub const ALL: [Self; 3] = [Self::Location, Self::RotationEuler, Self::Scale];

    /// Property path of the channel on the host object.
    #[must_use]
    pub fn data_path(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::RotationEuler => "rotation_euler",
            Self::Scale => "scale",
        }
    }
}
