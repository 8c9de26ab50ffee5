use content::{World, WorldId};
use foundation::math::Vec3;
use foundation::math::easing::damp;
use procedural::clouds::CLOUD_SPIN;

use crate::SceneGraph;
use crate::atmosphere::{AtmosphereGlow, GlowConfig};
use crate::features::WorldFeature;
use crate::picking::PickTarget;
use crate::prefabs::{PlanetNodes, spawn_planet};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlanetConfig {
    /// Scale multiplier while hovered.
    pub hover_scale: f64,
    pub hover_decay: f64,
    /// Selection ring opacity while highlighted.
    pub ring_opacity: f64,
    pub ring_decay: f64,
    pub glow: GlowConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            hover_scale: 1.06,
            hover_decay: 0.002,
            ring_opacity: 0.35,
            ring_decay: 0.003,
            glow: GlowConfig::default(),
        }
    }
}

/// One world's nodes plus its animated interaction state.
///
/// Hover alone drives the scale pulse; hover or active selection drives the
/// atmosphere glow and the selection ring.
#[derive(Debug, Clone)]
pub struct Planet {
    world: World,
    config: PlanetConfig,
    nodes: PlanetNodes,
    feature: WorldFeature,
    glow: AtmosphereGlow,
    hovered: bool,
    active: bool,
    scale: f64,
    ring_opacity: f64,
}

impl Planet {
    pub fn spawn(graph: &mut SceneGraph, world: &World, config: PlanetConfig) -> Self {
        let nodes = spawn_planet(graph, world, config.glow.idle);
        let feature = WorldFeature::spawn(graph, nodes.tilt, world);
        Self {
            world: world.clone(),
            config,
            nodes,
            feature,
            glow: AtmosphereGlow::new(config.glow),
            hovered: false,
            active: false,
            scale: world.scale,
            ring_opacity: 0.0,
        }
    }

    pub fn id(&self) -> WorldId {
        self.world.id
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn nodes(&self) -> &PlanetNodes {
        &self.nodes
    }

    pub fn feature(&self) -> &WorldFeature {
        &self.feature
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.refresh_highlight();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.refresh_highlight();
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn highlighted(&self) -> bool {
        self.hovered || self.active
    }

    pub fn glow_intensity(&self) -> f64 {
        self.glow.intensity()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn ring_opacity(&self) -> f64 {
        self.ring_opacity
    }

    fn refresh_highlight(&mut self) {
        self.glow.set_highlighted(self.highlighted());
    }

    /// Bounding sphere for picking, padded by the displacement amplitude.
    pub fn pick_target(&self) -> PickTarget {
        PickTarget {
            world: self.world.id,
            center: self.world.position,
            radius: self.scale * (1.0 + self.world.profile.displacement),
        }
    }

    pub fn update(&mut self, graph: &mut SceneGraph, dt_s: f64, time_s: f64) {
        let target_scale = if self.hovered {
            self.world.scale * self.config.hover_scale
        } else {
            self.world.scale
        };
        self.scale = damp(self.scale, target_scale, self.config.hover_decay, dt_s);

        let target_ring = if self.highlighted() {
            self.config.ring_opacity
        } else {
            0.0
        };
        self.ring_opacity = damp(self.ring_opacity, target_ring, self.config.ring_decay, dt_s);
        let intensity = self.glow.update(dt_s);

        if let Some(t) = graph.transform_mut(self.nodes.group) {
            t.scale = Vec3::splat(self.scale);
        }
        if let Some(t) = graph.transform_mut(self.nodes.surface) {
            t.rotation.y += dt_s * self.world.profile.spin;
        }
        if let Some(clouds) = self.nodes.clouds
            && let Some(t) = graph.transform_mut(clouds)
        {
            t.rotation.y += dt_s * CLOUD_SPIN;
        }
        if let Some(d) = graph.drawable_mut(self.nodes.atmosphere) {
            d.set_fade(intensity);
        }
        if let Some(d) = graph.drawable_mut(self.nodes.selection_ring) {
            d.set_fade(self.ring_opacity);
        }
        self.feature.update(graph, time_s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MaterialKind;
    use crate::label::PlanetLabel;
    use content::PortfolioContent;

    fn planet(id: WorldId) -> (SceneGraph, Planet) {
        let content = PortfolioContent::load_embedded().unwrap();
        let mut graph = SceneGraph::new();
        let planet = Planet::spawn(&mut graph, content.world(id), PlanetConfig::default());
        (graph, planet)
    }

    #[test]
    fn hover_grows_scale_and_lights_ring() {
        let (mut graph, mut planet) = planet(WorldId::Skills);
        let base = planet.scale();
        planet.set_hovered(true);
        for _ in 0..120 {
            planet.update(&mut graph, 1.0 / 60.0, 0.0);
        }
        assert!(planet.scale() > base);
        assert!(planet.scale() <= base * 1.06 + 1e-12);
        assert!(planet.ring_opacity() > 0.3);
        assert!(planet.glow_intensity() > 0.8);

        let ring = graph.drawable(planet.nodes().selection_ring).unwrap();
        assert!(matches!(ring.material, MaterialKind::Basic { opacity, .. } if opacity > 0.3));
    }

    #[test]
    fn active_selection_glows_without_scaling() {
        let (mut graph, mut planet) = planet(WorldId::Projects);
        let base = planet.scale();
        planet.set_active(true);
        for _ in 0..120 {
            planet.update(&mut graph, 1.0 / 60.0, 0.0);
        }
        assert_eq!(planet.scale(), base);
        assert!(planet.highlighted());
        assert!(planet.glow_intensity() > 0.8);
    }

    #[test]
    fn label_hangs_below_and_follows_hover() {
        let (mut graph, mut planet) = planet(WorldId::Projects);
        let label = PlanetLabel::for_planet(&graph, &planet);
        assert_eq!(label.text, "Projects");
        assert!(!label.highlighted);
        assert!((label.anchor - Vec3::new(4.0, -1.5 * 1.45, 1.0)).length() < 1e-12);

        planet.set_hovered(true);
        for _ in 0..120 {
            planet.update(&mut graph, 1.0 / 60.0, 0.0);
        }
        let label = PlanetLabel::for_planet(&graph, &planet);
        assert!(label.highlighted);
        assert_eq!(label.style.border, planet.world().color);
        let expected_y = -1.5 * planet.scale();
        assert!((label.anchor.y - expected_y).abs() < 1e-12);
        assert!(label.anchor.y < -1.5 * 1.45);
    }

    #[test]
    fn pick_radius_covers_displacement() {
        let (_, planet) = planet(WorldId::Experience);
        let target = planet.pick_target();
        assert!(target.radius > planet.scale());
    }
}
