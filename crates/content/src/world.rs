use foundation::Rgb;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// The closed set of navigable worlds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldId {
    Personal,
    Skills,
    Projects,
    Experience,
}

impl WorldId {
    pub const ALL: [WorldId; 4] = [
        WorldId::Personal,
        WorldId::Skills,
        WorldId::Projects,
        WorldId::Experience,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorldId::Personal => "personal",
            WorldId::Skills => "skills",
            WorldId::Projects => "projects",
            WorldId::Experience => "experience",
        }
    }

    pub fn parse(s: &str) -> Option<WorldId> {
        WorldId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Surface signature tag: 0 personal, 1 skills, 2 projects, 3 experience.
    pub fn world_type(self) -> u32 {
        match self {
            WorldId::Personal => 0,
            WorldId::Skills => 1,
            WorldId::Projects => 2,
            WorldId::Experience => 3,
        }
    }

    /// DOM element id of the HTML section this world scrolls to.
    pub fn section_anchor(self) -> &'static str {
        match self {
            WorldId::Personal => "about",
            WorldId::Skills => "skills",
            WorldId::Projects => "projects",
            WorldId::Experience => "experience",
        }
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-world rendering parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Noise frequency applied to unit-sphere positions.
    pub noise_scale: f64,
    /// Displacement along the normal per unit of noise.
    pub displacement: f64,
    pub roughness: f64,
    pub metalness: f64,
    /// Axial tilt about X (radians).
    pub tilt: f64,
    /// Idle spin about Y (radians per second).
    pub spin: f64,
}

/// A validated world record. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub id: WorldId,
    pub label: String,
    pub position: Vec3,
    pub color: Rgb,
    pub scale: f64,
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WorldRecord {
    pub id: WorldId,
    pub label: String,
    pub position: [f64; 3],
    pub color: String,
    pub scale: f64,
    pub profile: Profile,
}
