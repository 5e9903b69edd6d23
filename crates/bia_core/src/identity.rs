//! Instance identity.
//!
//! A procedural generator may reorder, add or remove instances between two
//! evaluations, so the position of an instance in the evaluator's output says
//! nothing about which logical instance it is. The only thing that does is the
//! evaluator provided stable id, and only when the evaluator provides one.

use std::fmt;

/// Identity of a live instance as reported by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceIdentity {
    /// The evaluator guarantees this id for the same logical instance on every frame.
    Stable(u32),
    /// No id is available. Such an instance can never be found again on another frame.
    Unstable,
}

impl InstanceIdentity {
    /// Builds an identity from an optional evaluator id.
    #[inline]
    #[must_use]
    pub fn from_stable_id(id: Option<u32>) -> Self {
        id.map_or(Self::Unstable, Self::Stable)
    }

    #[inline]
    #[must_use]
    pub fn stable_id(self) -> Option<u32> {
        match self {
            Self::Stable(id) => Some(id),
            Self::Unstable => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_stable(self) -> bool {
        matches!(self, Self::Stable(_))
    }
}

impl fmt::Display for InstanceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable(id) => write!(f, "#{id}"),
            Self::Unstable => f.write_str("<unstable>"),
        }
    }
}

/// The identity a baked output object remembers about its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// The object was created from a procedural instance.
    Instance(InstanceIdentity),
    /// The object holds the geometry the generator emits directly, not as instances.
    Geometry,
}

impl IdentityKey {
    #[inline]
    #[must_use]
    pub fn is_instance(self) -> bool {
        matches!(self, Self::Instance(_))
    }
}
