//! wasm-bindgen host for the solar-system scene.
//!
//! The page calls the exported functions with pointer, key and legend input;
//! a `requestAnimationFrame` loop ticks [`SolarSystem`], renders through wgpu
//! once `init_renderer` has succeeded, and turns scene events into scrolling
//! and DOM updates.

mod dom;
mod logging;
mod wgpu;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use content::{About, Experience, PortfolioContent, Project, SkillCategory, WorldId};
use gpu::{Camera3D, FrameUniforms, MeshCache, Renderer};
use runtime::FrameClock;
use scene::{Input, Ray, SceneConfig, SceneEvent, SolarSystem};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{LabelView, OverlayView};
use crate::wgpu::{WgpuContext, init_wgpu_from_canvas_id, render_frame, resize_wgpu, surface_size};

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

#[derive(Debug, Default)]
struct AppState {
    system: Option<SolarSystem>,
    clock: FrameClock,
    canvas_width: u32,
    canvas_height: u32,
    wgpu: Option<WgpuContext>,
    mesh_cache: MeshCache,
    renderer_created: bool,
    render_failing: bool,
}

/// Everything the page has to apply after one animation frame.
#[derive(Debug, Default)]
struct FrameOutput {
    events: Vec<SceneEvent>,
    overlay: Option<OverlayView>,
    labels: Vec<LabelView>,
}

impl AppState {
    fn ray_at(&self, x_px: f64, y_px: f64) -> Option<Ray> {
        let system = self.system.as_ref()?;
        Camera3D::from_pose(system.camera_pose(), self.canvas_width, self.canvas_height).screen_ray(
            x_px,
            y_px,
            self.canvas_width,
            self.canvas_height,
        )
    }

    fn send(&mut self, input: Input) {
        if let Some(system) = self.system.as_mut() {
            system.handle_input(input);
        }
    }

    fn step(&mut self, now_ms: f64) -> FrameOutput {
        let Some(system) = self.system.as_mut() else {
            return FrameOutput::default();
        };
        let frame = self.clock.tick(now_ms);
        system.tick(frame);

        if let Some(ctx) = self.wgpu.as_mut() {
            let (width, height) = (self.canvas_width, self.canvas_height);
            let camera = Camera3D::from_pose(system.camera_pose(), width, height);
            let commands = Renderer::collect(system.graph(), &camera);
            let globals = FrameUniforms::new(&camera, system.lights(), system.time().0, width, height);
            match render_frame(ctx, &mut self.mesh_cache, &commands, &globals) {
                Ok(()) => {
                    self.render_failing = false;
                    if !self.renderer_created {
                        self.renderer_created = true;
                        system.mark_renderer_created();
                        info!(draws = commands.commands.len(), "first frame rendered");
                    }
                }
                Err(err) => {
                    if !self.render_failing {
                        warn!(?err, "frame render failed");
                    }
                    self.render_failing = true;
                }
            }
        }

        let now = system.time();
        let loading = system.loading();
        let overlay = OverlayView {
            percent: loading.progress_percent(now),
            opacity: loading.opacity(now),
            blocks_input: loading.blocks_input(now),
            visible: loading.is_visible(now),
        };
        FrameOutput {
            events: system.drain_events().into_iter().map(|e| e.payload).collect(),
            overlay: Some(overlay),
            labels: label_views(system, self.canvas_width, self.canvas_height),
        }
    }
}

/// Projects every planet label onto the canvas.
fn label_views(system: &SolarSystem, width: u32, height: u32) -> Vec<LabelView> {
    let camera = Camera3D::from_pose(system.camera_pose(), width, height);
    system
        .labels()
        .into_iter()
        .map(|label| LabelView {
            world: label.world,
            screen: (width > 0 && height > 0)
                .then(|| camera.project_to_screen(label.anchor, width, height))
                .flatten()
                .map(|p| (p.x, p.y)),
            highlighted: label.highlighted,
            border: label.style.border.to_hex(),
            border_opacity: label.style.border_opacity,
            text_color: label.style.text.to_hex(),
        })
        .collect()
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Thread-local access that yields `R::default()` during teardown instead of
/// panicking.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<AppState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn input_for_key(key: &str) -> Option<Input> {
    match key {
        "Escape" | "Esc" => Some(Input::CancelKey),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct WorldView<'a> {
    id: WorldId,
    label: &'a str,
    color: String,
    section: &'static str,
}

/// The read-only feed the page renders its legend and sections from.
#[derive(Debug, Serialize)]
struct ContentView<'a> {
    worlds: Vec<WorldView<'a>>,
    about: &'a About,
    skills: &'a [SkillCategory],
    projects: &'a [Project],
    experience: &'a [Experience],
}

fn content_view_json(content: &PortfolioContent) -> Result<String, serde_json::Error> {
    let view = ContentView {
        worlds: content
            .worlds()
            .iter()
            .map(|w| WorldView {
                id: w.id,
                label: &w.label,
                color: w.color.to_hex(),
                section: content.section_anchor(w.id),
            })
            .collect(),
        about: &content.about,
        skills: &content.skills,
        projects: &content.projects,
        experience: &content.experience,
    };
    serde_json::to_string(&view)
}

fn request_animation_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(cb.as_ref().unchecked_ref())
}

fn apply_frame_output(output: FrameOutput) {
    for event in &output.events {
        if let Err(err) = dom::dispatch_scene_event(event) {
            warn!(?err, ?event, "failed to apply scene event");
        }
    }
    if let Some(overlay) = &output.overlay
        && let Err(err) = dom::update_loading_overlay(overlay)
    {
        debug!(?err, "loading overlay update failed");
    }
    if let Err(err) = dom::update_planet_labels(&output.labels) {
        debug!(?err, "planet label update failed");
    }
}

fn start_animation_loop() -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        let output = with_state(|s| s.borrow_mut().step(now_ms));
        apply_frame_output(output);
        if let Some(cb) = f.borrow().as_ref()
            && let Err(err) = request_animation_frame(cb)
        {
            error!(?err, "requestAnimationFrame failed; animation stopped");
        }
    }));
    if let Some(cb) = g.borrow().as_ref() {
        request_animation_frame(cb)?;
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    logging::init_logging(logging::DEFAULT_FILTER);

    let system = SolarSystem::new(SceneConfig::default())
        .map_err(|e| JsValue::from_str(&format!("scene init error: {e}")))?;
    info!(worlds = system.planets().len(), "solar system ready");
    with_state(|s| s.borrow_mut().system = Some(system));
    start_animation_loop()
}

/// Replaces the log filter with `filter` (an `EnvFilter` directive string).
#[wasm_bindgen]
pub fn start_with_log_filter(filter: &str) -> Result<(), JsValue> {
    logging::init_logging(filter);
    start()
}

/// Creates the wgpu surface on `canvas_id`. Failure is logged and leaves the
/// loading overlay up.
#[wasm_bindgen]
pub fn init_renderer(canvas_id: String) {
    spawn_local(async move {
        match init_wgpu_from_canvas_id(&canvas_id).await {
            Ok(mut ctx) => with_state(|s| {
                let mut s = s.borrow_mut();
                if s.canvas_width > 0 && s.canvas_height > 0 {
                    resize_wgpu(&mut ctx, s.canvas_width, s.canvas_height);
                } else {
                    (s.canvas_width, s.canvas_height) = surface_size(&ctx);
                }
                info!(canvas = %canvas_id, width = s.canvas_width, height = s.canvas_height, "renderer initialized");
                s.wgpu = Some(ctx);
            }),
            Err(err) => error!(?err, canvas = %canvas_id, "renderer init failed"),
        }
    });
}

#[wasm_bindgen]
pub fn set_canvas_size(width: u32, height: u32) {
    with_state(|s| {
        let mut s = s.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
        if let Some(ctx) = s.wgpu.as_mut() {
            resize_wgpu(ctx, width, height);
        }
    });
}

/// Pointer position in canvas pixels.
#[wasm_bindgen]
pub fn on_pointer_move(x: f64, y: f64) {
    with_state(|s| {
        let mut s = s.borrow_mut();
        let ray = s.ray_at(x, y);
        s.send(Input::PointerMove(ray));
    });
}

#[wasm_bindgen]
pub fn on_pointer_leave() {
    with_state(|s| s.borrow_mut().send(Input::PointerMove(None)));
}

#[wasm_bindgen]
pub fn on_pointer_click(x: f64, y: f64) {
    with_state(|s| {
        let mut s = s.borrow_mut();
        let ray = s.ray_at(x, y);
        s.send(Input::PointerClick(ray));
    });
}

/// Legend entry clicked; `id` is a world id such as `"projects"`.
#[wasm_bindgen]
pub fn on_legend_select(id: &str) -> Result<(), JsValue> {
    let world = WorldId::parse(id).ok_or_else(|| JsValue::from_str(&format!("unknown world `{id}`")))?;
    with_state(|s| s.borrow_mut().send(Input::LegendSelect(world)));
    Ok(())
}

#[wasm_bindgen]
pub fn on_key_down(key: &str) {
    if let Some(input) = input_for_key(key) {
        with_state(|s| s.borrow_mut().send(input));
    }
}

#[wasm_bindgen]
pub fn content_json() -> Result<String, JsValue> {
    let json = with_state(|s| {
        s.borrow()
            .system
            .as_ref()
            .map(|system| content_view_json(system.content()))
    });
    let json = match json {
        Some(json) => json,
        None => {
            let content = PortfolioContent::load_embedded()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            content_view_json(&content)
        }
    };
    json.map_err(|e| JsValue::from_str(&format!("content serialize error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::{AppState, content_view_json, input_for_key};
    use content::{PortfolioContent, WorldId};
    use gpu::Camera3D;
    use pretty_assertions::assert_eq;
    use scene::{Input, SceneConfig, SceneEvent, SelectionState, SolarSystem};

    fn app() -> AppState {
        AppState {
            system: Some(SolarSystem::new(SceneConfig::default()).unwrap()),
            canvas_width: 800,
            canvas_height: 600,
            ..AppState::default()
        }
    }

    #[test]
    fn overlay_progress_advances_without_a_renderer() {
        let mut app = app();
        let mut last = 0;
        for i in 0..200 {
            let out = app.step(i as f64 * 16.0);
            let overlay = out.overlay.unwrap();
            assert!(overlay.percent >= last);
            assert!(overlay.percent <= 95);
            assert!(overlay.blocks_input);
            assert!(!out.events.contains(&SceneEvent::RendererReady));
            last = overlay.percent;
        }
        assert_eq!(last, 95);
    }

    #[test]
    fn labels_follow_planets_and_highlight() {
        let mut app = app();
        let out = app.step(0.0);
        assert_eq!(out.labels.len(), 4);
        assert!(out.labels.iter().all(|l| l.screen.is_some() && !l.highlighted));

        let projects = out
            .labels
            .iter()
            .find(|l| l.world == WorldId::Projects)
            .and_then(|l| l.screen)
            .unwrap();
        let system = app.system.as_ref().unwrap();
        let camera = Camera3D::from_pose(system.camera_pose(), 800, 600);
        let center = camera
            .project_to_screen(system.content().world(WorldId::Projects).position, 800, 600)
            .unwrap();
        assert!(projects.1 > center.y);

        app.send(Input::LegendSelect(WorldId::Projects));
        let out = app.step(16.0);
        let lit: Vec<WorldId> = out.labels.iter().filter(|l| l.highlighted).map(|l| l.world).collect();
        assert_eq!(lit, vec![WorldId::Projects]);
        let label = out.labels.iter().find(|l| l.highlighted).unwrap();
        assert_eq!(label.border, "#f59e0b");
        assert_eq!(label.text_color, "#f1f5f9");
    }

    #[test]
    fn step_without_system_is_empty() {
        let mut app = AppState::default();
        let out = app.step(0.0);
        assert!(out.events.is_empty());
        assert!(out.overlay.is_none());
        assert!(out.labels.is_empty());
    }

    #[test]
    fn legend_select_reaches_the_scene() {
        let mut app = app();
        app.step(0.0);
        app.send(Input::LegendSelect(WorldId::Skills));
        let out = app.step(16.0);
        assert!(out
            .events
            .contains(&SceneEvent::WorldSelected(Some(WorldId::Skills))));
        let selection = app.system.as_ref().map(|s| s.selection());
        assert_eq!(selection, Some(SelectionState::Focused(WorldId::Skills)));
    }

    #[test]
    fn rays_need_a_sized_canvas() {
        let mut app = app();
        assert!(app.ray_at(400.0, 300.0).is_some());
        assert!(app.ray_at(900.0, 300.0).is_none());
        app.canvas_width = 0;
        assert!(app.ray_at(400.0, 300.0).is_none());
    }

    #[test]
    fn only_escape_maps_to_cancel() {
        assert_eq!(input_for_key("Escape"), Some(Input::CancelKey));
        assert_eq!(input_for_key("Enter"), None);
    }

    #[test]
    fn content_view_lists_worlds_with_sections() {
        let content = PortfolioContent::load_embedded().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&content_view_json(&content).unwrap()).unwrap();
        let worlds = json["worlds"].as_array().unwrap();
        assert_eq!(worlds.len(), 4);
        assert_eq!(worlds[0]["id"], "personal");
        assert_eq!(worlds[0]["section"], "about");
        assert_eq!(worlds[2]["color"], "#f59e0b");
        assert!(json["projects"].is_array());
    }
}
