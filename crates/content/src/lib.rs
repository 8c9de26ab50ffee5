//! Static portfolio content: the worlds rendered in the solar system and the
//! read-only tables behind the HTML sections.

mod world;

pub use world::{Profile, World, WorldId};

use foundation::Rgb;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use world::WorldRecord;

/// The content bundled into the binary.
pub const EMBEDDED_JSON: &str = include_str!("../data/portfolio.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PortfolioDocument {
    worlds: Vec<WorldRecord>,
    about: About,
    skills: Vec<SkillCategory>,
    projects: Vec<Project>,
    experience: Vec<Experience>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    Parse(String),
    MissingWorld(WorldId),
    DuplicateWorld(WorldId),
    InvalidProfile {
        world: WorldId,
        field: &'static str,
        value: f64,
    },
    InvalidColor {
        world: WorldId,
        value: String,
    },
    NonFinitePosition(WorldId),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Parse(msg) => write!(f, "content parse error: {msg}"),
            ContentError::MissingWorld(id) => write!(f, "world `{id}` is not defined"),
            ContentError::DuplicateWorld(id) => write!(f, "world `{id}` is defined twice"),
            ContentError::InvalidProfile { world, field, value } => {
                write!(f, "world `{world}`: profile field `{field}` has invalid value {value}")
            }
            ContentError::InvalidColor { world, value } => {
                write!(f, "world `{world}`: color `{value}` is not #rrggbb")
            }
            ContentError::NonFinitePosition(id) => {
                write!(f, "world `{id}` has a non-finite position or scale")
            }
        }
    }
}

impl std::error::Error for ContentError {}

/// Validated content. Worlds are kept in [`WorldId::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioContent {
    worlds: Vec<World>,
    pub about: About,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
}

impl PortfolioContent {
    pub fn load_embedded() -> Result<Self, ContentError> {
        Self::from_json(EMBEDDED_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let doc: PortfolioDocument =
            serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;

        let mut slots: [Option<World>; 4] = Default::default();
        for record in doc.worlds {
            let slot = &mut slots[record.id.world_type() as usize];
            if slot.is_some() {
                return Err(ContentError::DuplicateWorld(record.id));
            }
            *slot = Some(validate_world(record)?);
        }

        let mut worlds = Vec::with_capacity(slots.len());
        for (id, slot) in WorldId::ALL.into_iter().zip(slots) {
            worlds.push(slot.ok_or(ContentError::MissingWorld(id))?);
        }

        Ok(Self {
            worlds,
            about: doc.about,
            skills: doc.skills,
            projects: doc.projects,
            experience: doc.experience,
        })
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// Every id is present after validation.
    pub fn world(&self, id: WorldId) -> &World {
        &self.worlds[id.world_type() as usize]
    }

    pub fn section_anchor(&self, id: WorldId) -> &'static str {
        id.section_anchor()
    }
}

fn validate_world(record: WorldRecord) -> Result<World, ContentError> {
    let id = record.id;
    let position = Vec3::from_array(record.position);
    if !position.is_finite() || !record.scale.is_finite() || record.scale <= 0.0 {
        return Err(ContentError::NonFinitePosition(id));
    }

    let color = Rgb::from_hex(&record.color).ok_or_else(|| ContentError::InvalidColor {
        world: id,
        value: record.color.clone(),
    })?;

    let p = record.profile;
    let invalid = |field: &'static str, value: f64| ContentError::InvalidProfile {
        world: id,
        field,
        value,
    };
    if !(p.noise_scale.is_finite() && p.noise_scale > 0.0) {
        return Err(invalid("noise_scale", p.noise_scale));
    }
    if !(p.displacement.is_finite() && p.displacement >= 0.0) {
        return Err(invalid("displacement", p.displacement));
    }
    if !(0.0..=1.0).contains(&p.roughness) {
        return Err(invalid("roughness", p.roughness));
    }
    if !(0.0..=1.0).contains(&p.metalness) {
        return Err(invalid("metalness", p.metalness));
    }
    if !p.tilt.is_finite() {
        return Err(invalid("tilt", p.tilt));
    }
    if !p.spin.is_finite() {
        return Err(invalid("spin", p.spin));
    }

    Ok(World {
        id,
        label: record.label,
        position,
        color,
        scale: record.scale,
        profile: p,
    })
}
