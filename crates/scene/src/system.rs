use std::fmt;

use content::{ContentError, PortfolioContent, WorldId};
use foundation::time::Time;
use procedural::SceneLights;
use runtime::{Event, EventBus, Frame};
use tracing::{debug, info};

use crate::SceneGraph;
use crate::camera::{CameraChoreographer, CameraPose, ChoreographyConfig};
use crate::entity::NodeId;
use crate::label::PlanetLabel;
use crate::loading::{LoadingConfig, LoadingIndicator};
use crate::picking::{PickHit, PickTarget, Ray, pick_world};
use crate::planet::{Planet, PlanetConfig};
use crate::prefabs::{SunNodes, rotate_starfield, spawn_starfield, spawn_sun};
use crate::selection::{SelectionEvent, SelectionMachine, SelectionState, SelectionTimings};

#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub camera: ChoreographyConfig,
    pub selection: SelectionTimings,
    pub planet: PlanetConfig,
    pub loading: LoadingConfig,
    pub lights: SceneLights,
}

/// Host input, already converted to scene space.
///
/// Pointer variants carry `None` when the pointer is outside the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Input {
    PointerMove(Option<Ray>),
    PointerClick(Option<Ray>),
    LegendSelect(WorldId),
    CancelKey,
}

/// Notifications for the hosting page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    WorldSelected(Option<WorldId>),
    HoverChanged(Option<WorldId>),
    ScrollToSection {
        world: WorldId,
        anchor: &'static str,
    },
    ScrollToTop,
    RendererReady,
}

#[derive(Debug)]
pub enum SceneError {
    Content(ContentError),
    InvalidConfig(&'static str),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Content(e) => write!(f, "content error: {e}"),
            SceneError::InvalidConfig(what) => write!(f, "invalid scene config: {what}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Content(e) => Some(e),
            SceneError::InvalidConfig(_) => None,
        }
    }
}

impl From<ContentError> for SceneError {
    fn from(e: ContentError) -> Self {
        SceneError::Content(e)
    }
}

fn validate(config: &SceneConfig) -> Result<(), SceneError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    let unit_open = |v: f64| v > 0.0 && v < 1.0;
    if !config.camera.overview.is_finite() {
        return Err(SceneError::InvalidConfig("camera overview pose must be finite"));
    }
    if ![
        config.camera.decay,
        config.planet.hover_decay,
        config.planet.ring_decay,
        config.planet.glow.decay,
    ]
    .into_iter()
    .all(unit_open)
    {
        return Err(SceneError::InvalidConfig("decay rates must lie in (0, 1)"));
    }
    if !positive(config.loading.ramp_ms) || !positive(config.loading.fade_ms) {
        return Err(SceneError::InvalidConfig("loading durations must be positive"));
    }
    if config.selection.pre_scroll_ms < 0.0 || config.selection.post_scroll_ms < 0.0 {
        return Err(SceneError::InvalidConfig("selection delays must not be negative"));
    }
    Ok(())
}

/// Composition root: owns the scene graph and every piece of interaction state.
///
/// All mutation happens inside [`handle_input`](Self::handle_input) and
/// [`tick`](Self::tick); the host drains [`SceneEvent`]s after each call.
#[derive(Debug)]
pub struct SolarSystem {
    content: PortfolioContent,
    config: SceneConfig,
    graph: SceneGraph,
    planets: Vec<Planet>,
    sun: SunNodes,
    stars: NodeId,
    camera: CameraChoreographer,
    selection: SelectionMachine,
    loading: LoadingIndicator,
    hovered: Option<WorldId>,
    ready_sent: bool,
    frame: Frame,
    events: EventBus<SceneEvent>,
}

impl SolarSystem {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let content = PortfolioContent::load_embedded()?;
        Self::with_content(content, config)
    }

    pub fn with_content(content: PortfolioContent, config: SceneConfig) -> Result<Self, SceneError> {
        validate(&config)?;

        let mut graph = SceneGraph::new();
        let stars = spawn_starfield(&mut graph);
        let sun = spawn_sun(&mut graph);
        let planets = content
            .worlds()
            .iter()
            .map(|w| Planet::spawn(&mut graph, w, config.planet))
            .collect::<Vec<_>>();
        info!(planets = planets.len(), nodes = graph.len(), "scene built");

        Ok(Self {
            camera: CameraChoreographer::new(config.camera),
            selection: SelectionMachine::new(config.selection),
            loading: LoadingIndicator::new(config.loading, Time::ZERO),
            content,
            config,
            graph,
            planets,
            sun,
            stars,
            hovered: None,
            ready_sent: false,
            frame: Frame::new(0, 0.0),
            events: EventBus::new(),
        })
    }

    pub fn handle_input(&mut self, input: Input) {
        let now = self.time();
        let pointer_blocked = self.loading.blocks_input(now);
        match input {
            Input::PointerMove(_) | Input::PointerClick(_) if pointer_blocked => {
                debug!(?input, "pointer input ignored while loading");
            }
            Input::PointerMove(ray) => {
                let hit = ray.and_then(|r| self.pick(r)).map(|h| h.world);
                self.set_hovered(hit);
            }
            Input::PointerClick(ray) => {
                let out = match ray.and_then(|r| self.pick(r)) {
                    Some(hit) => self.selection.click(hit.world, now),
                    None => self.selection.click_empty(),
                };
                self.apply_selection(out);
            }
            Input::LegendSelect(world) => {
                let out = self.selection.click(world, now);
                self.apply_selection(out);
            }
            Input::CancelKey => {
                let out = self.selection.cancel_key();
                self.apply_selection(out);
            }
        }
    }

    /// Advances timers and every animation by one frame.
    pub fn tick(&mut self, frame: Frame) {
        self.frame = frame;
        let now = frame.time;

        let out = self.selection.advance(now);
        self.apply_selection(out);

        self.camera.update(frame.dt_s);
        for planet in &mut self.planets {
            planet.update(&mut self.graph, frame.dt_s, now.seconds());
        }
        self.sun.update(&mut self.graph, frame.dt_s, now.seconds());
        rotate_starfield(&mut self.graph, self.stars, frame.dt_s);

        if !self.ready_sent && self.loading.is_ready(now) {
            self.ready_sent = true;
            info!("renderer ready");
            self.events.emit(self.frame, SceneEvent::RendererReady);
        }
    }

    /// The host rendered its first frame; readiness follows after a delay.
    pub fn mark_renderer_created(&mut self) {
        self.loading.mark_renderer_created(self.time());
    }

    pub fn pick(&self, ray: Ray) -> Option<PickHit> {
        let targets: Vec<PickTarget> = self.planets.iter().map(Planet::pick_target).collect();
        pick_world(&targets, ray)
    }

    fn set_hovered(&mut self, hovered: Option<WorldId>) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        for planet in &mut self.planets {
            planet.set_hovered(Some(planet.id()) == hovered);
        }
        self.events.emit(self.frame, SceneEvent::HoverChanged(hovered));
    }

    fn apply_selection(&mut self, out: Vec<SelectionEvent>) {
        for event in out {
            let scene_event = match event {
                SelectionEvent::Changed(active) => {
                    for planet in &mut self.planets {
                        planet.set_active(Some(planet.id()) == active);
                    }
                    self.camera
                        .retarget(active.map(|id| self.content.world(id).position));
                    SceneEvent::WorldSelected(active)
                }
                SelectionEvent::ScrollToSection { world, anchor } => {
                    SceneEvent::ScrollToSection { world, anchor }
                }
                SelectionEvent::ScrollToTop => SceneEvent::ScrollToTop,
            };
            self.events.emit(self.frame, scene_event);
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.current()
    }

    pub fn camera(&self) -> &CameraChoreographer {
        &self.camera
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn lights(&self) -> &SceneLights {
        &self.config.lights
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Current name plate for every planet, in content order.
    pub fn labels(&self) -> Vec<PlanetLabel> {
        self.planets
            .iter()
            .map(|p| PlanetLabel::for_planet(&self.graph, p))
            .collect()
    }

    pub fn hovered(&self) -> Option<WorldId> {
        self.hovered
    }

    pub fn time(&self) -> Time {
        self.frame.time
    }

    pub fn drain_events(&mut self) -> Vec<Event<SceneEvent>> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    const DT: f64 = 1.0 / 60.0;

    fn system() -> SolarSystem {
        SolarSystem::new(SceneConfig::default()).unwrap()
    }

    fn run_until(sys: &mut SolarSystem, seconds: f64) -> Vec<SceneEvent> {
        let mut frame = Frame::new(sys.frame.index, DT);
        let mut out = Vec::new();
        while frame.time.seconds() < seconds {
            frame = frame.next();
            sys.tick(frame);
            out.extend(sys.drain_events().into_iter().map(|e| e.payload));
        }
        out
    }

    fn ready(sys: &mut SolarSystem) {
        sys.mark_renderer_created();
        let events = run_until(sys, 0.7);
        assert_eq!(events, vec![SceneEvent::RendererReady]);
    }

    fn payloads(sys: &mut SolarSystem) -> Vec<SceneEvent> {
        sys.drain_events().into_iter().map(|e| e.payload).collect()
    }

    fn ray_at(sys: &SolarSystem, world: WorldId) -> Ray {
        let origin = sys.camera_pose().position;
        Ray::new(origin, sys.content().world(world).position - origin)
    }

    #[test]
    fn projects_click_scrolls_then_resets() {
        let mut sys = system();
        sys.handle_input(Input::LegendSelect(WorldId::Projects));
        assert_eq!(
            payloads(&mut sys),
            vec![SceneEvent::WorldSelected(Some(WorldId::Projects))]
        );

        let scrolled = run_until(&mut sys, 0.65);
        assert_eq!(
            scrolled,
            vec![SceneEvent::ScrollToSection {
                world: WorldId::Projects,
                anchor: "projects",
            }]
        );
        assert_eq!(sys.selection(), SelectionState::Focused(WorldId::Projects));

        let reset = run_until(&mut sys, 1.9);
        assert_eq!(reset, vec![SceneEvent::WorldSelected(None)]);
        assert_eq!(sys.selection(), SelectionState::Idle);
    }

    #[test]
    fn newer_click_supersedes_pending_scroll() {
        let mut sys = system();
        sys.handle_input(Input::LegendSelect(WorldId::Skills));
        run_until(&mut sys, 0.3);
        sys.handle_input(Input::LegendSelect(WorldId::Experience));
        payloads(&mut sys);

        let events = run_until(&mut sys, 1.0);
        assert_eq!(
            events,
            vec![SceneEvent::ScrollToSection {
                world: WorldId::Experience,
                anchor: "experience",
            }]
        );
    }

    #[test]
    fn cancel_key_returns_to_overview_and_top() {
        let mut sys = system();
        sys.handle_input(Input::LegendSelect(WorldId::Personal));
        run_until(&mut sys, 0.3);
        sys.handle_input(Input::CancelKey);
        assert_eq!(
            payloads(&mut sys),
            vec![
                SceneEvent::WorldSelected(None),
                SceneEvent::ScrollToTop
            ]
        );
        assert_eq!(run_until(&mut sys, 3.0), vec![]);
        assert_eq!(sys.camera().desired(), ChoreographyConfig::default().overview);
    }

    #[test]
    fn pointer_input_waits_for_renderer() {
        let mut sys = system();
        let ray = ray_at(&sys, WorldId::Skills);
        sys.handle_input(Input::PointerMove(Some(ray)));
        assert_eq!(sys.hovered(), None);

        ready(&mut sys);
        sys.handle_input(Input::PointerMove(Some(ray)));
        assert_eq!(sys.hovered(), Some(WorldId::Skills));
        assert_eq!(
            payloads(&mut sys),
            vec![SceneEvent::HoverChanged(Some(WorldId::Skills))]
        );

        sys.handle_input(Input::PointerMove(None));
        assert_eq!(sys.hovered(), None);
    }

    #[test]
    fn click_on_planet_focuses_and_empty_click_clears() {
        let mut sys = system();
        ready(&mut sys);
        let ray = ray_at(&sys, WorldId::Skills);
        sys.handle_input(Input::PointerClick(Some(ray)));
        assert_eq!(sys.selection(), SelectionState::Focused(WorldId::Skills));

        let up = Ray::new(sys.camera_pose().position, Vec3::Y);
        sys.handle_input(Input::PointerClick(Some(up)));
        assert_eq!(sys.selection(), SelectionState::Idle);
        assert_eq!(
            payloads(&mut sys),
            vec![
                SceneEvent::WorldSelected(Some(WorldId::Skills)),
                SceneEvent::WorldSelected(None),
            ]
        );
    }

    #[test]
    fn camera_eases_toward_focus_and_back() {
        let mut sys = system();
        let overview = sys.camera_pose();
        sys.handle_input(Input::LegendSelect(WorldId::Experience));
        run_until(&mut sys, 0.5);
        let moved = sys.camera_pose();
        assert!(moved.distance(&overview) > 0.0);
        assert!(sys.camera().distance_to_desired() < sys.camera().desired().distance(&overview));

        run_until(&mut sys, 10.0);
        assert!(sys.camera().distance_to_desired() < 1e-3);
        assert_eq!(sys.camera().desired(), overview);
    }

    #[test]
    fn labels_track_hover_and_selection() {
        let mut sys = system();
        let labels = sys.labels();
        assert_eq!(labels.len(), sys.planets().len());
        assert!(labels.iter().all(|l| !l.highlighted));

        ready(&mut sys);
        let ray = ray_at(&sys, WorldId::Skills);
        sys.handle_input(Input::PointerMove(Some(ray)));
        sys.handle_input(Input::LegendSelect(WorldId::Personal));
        let lit: Vec<WorldId> = sys
            .labels()
            .into_iter()
            .filter(|l| l.highlighted)
            .map(|l| l.world)
            .collect();
        assert_eq!(lit, vec![WorldId::Personal, WorldId::Skills]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SceneConfig::default();
        config.camera.decay = 1.5;
        assert!(matches!(
            SolarSystem::new(config),
            Err(SceneError::InvalidConfig(_))
        ));
    }
}
