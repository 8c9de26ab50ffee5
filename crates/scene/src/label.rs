use content::WorldId;
use foundation::Rgb;
use foundation::math::Vec3;

use crate::SceneGraph;
use crate::planet::Planet;

/// Label offset below the planet centre, in the planet group's local space.
pub const LABEL_OFFSET: Vec3 = Vec3 {
    x: 0.0,
    y: -1.5,
    z: 0.0,
};

pub const PLATE_HEIGHT: f64 = 0.42;
pub const TEXT_SIZE: f64 = 0.19;

const IDLE_BORDER: Rgb = Rgb::from_rgb8(0x1e, 0x29, 0x3b);
const FILL: Rgb = Rgb::from_rgb8(0x0b, 0x11, 0x20);
const FILL_OPACITY: f64 = 0.88;
const TEXT_HIGHLIGHT: Rgb = Rgb::from_rgb8(0xf1, 0xf5, 0xf9);
const TEXT_IDLE: Rgb = Rgb::from_rgb8(0x94, 0xa3, 0xb8);

/// Billboard colours for one label.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelStyle {
    pub border: Rgb,
    pub border_opacity: f64,
    pub fill: Rgb,
    pub fill_opacity: f64,
    pub text: Rgb,
}

impl LabelStyle {
    pub fn new(world_color: Rgb, highlighted: bool) -> Self {
        if highlighted {
            Self {
                border: world_color,
                border_opacity: 0.5,
                fill: FILL,
                fill_opacity: FILL_OPACITY,
                text: TEXT_HIGHLIGHT,
            }
        } else {
            Self {
                border: IDLE_BORDER,
                border_opacity: 0.18,
                fill: FILL,
                fill_opacity: FILL_OPACITY,
                text: TEXT_IDLE,
            }
        }
    }
}

/// A camera-facing name plate hanging below a planet.
///
/// `anchor` follows the planet group, so it tracks the hover scale pulse
/// but not the axial tilt.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetLabel {
    pub world: WorldId,
    pub text: String,
    pub anchor: Vec3,
    pub highlighted: bool,
    pub style: LabelStyle,
}

impl PlanetLabel {
    pub fn for_planet(graph: &SceneGraph, planet: &Planet) -> Self {
        let world = planet.world();
        let anchor = graph
            .world_matrix(planet.nodes().group)
            .map(|m| m.transform_point(LABEL_OFFSET))
            .unwrap_or(world.position + LABEL_OFFSET * planet.scale());
        Self {
            world: world.id,
            text: world.label.clone(),
            anchor,
            highlighted: planet.highlighted(),
            style: LabelStyle::new(world.color, planet.highlighted()),
        }
    }

    /// Border plate width in world units; grows with the text.
    pub fn plate_width(&self) -> f64 {
        self.text.chars().count() as f64 * 0.145 + 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn idle_and_highlighted_styles_differ() {
        let amber = Rgb::from_rgb8(0xf5, 0x9e, 0x0b);
        let idle = LabelStyle::new(amber, false);
        assert_eq!(idle.border.to_hex(), "#1e293b");
        assert_eq!(idle.text.to_hex(), "#94a3b8");
        assert_eq!(idle.border_opacity, 0.18);

        let lit = LabelStyle::new(amber, true);
        assert_eq!(lit.border, amber);
        assert_eq!(lit.text.to_hex(), "#f1f5f9");
        assert_eq!(lit.border_opacity, 0.5);
        assert_eq!(lit.fill, idle.fill);
    }
}
