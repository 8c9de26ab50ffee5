//! Page-side effects of scene events: section scrolling, the loading overlay,
//! planet name plates and `CustomEvent`s for page scripts.

use content::WorldId;
use scene::SceneEvent;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub const OVERLAY_ID: &str = "loading-overlay";
pub const PROGRESS_ID: &str = "loading-progress";

/// What the loading overlay should look like this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub percent: u32,
    pub opacity: f64,
    pub blocks_input: bool,
    pub visible: bool,
}

impl Default for OverlayView {
    fn default() -> Self {
        Self {
            percent: 0,
            opacity: 1.0,
            blocks_input: true,
            visible: true,
        }
    }
}

impl OverlayView {
    pub fn progress_text(&self) -> String {
        format!("{}%", self.percent)
    }

    /// `(property, value)` pairs applied to the overlay element.
    pub fn style_properties(&self) -> [(&'static str, String); 3] {
        [
            ("opacity", format!("{:.3}", self.opacity)),
            (
                "pointer-events",
                if self.blocks_input { "auto" } else { "none" }.to_string(),
            ),
            (
                "display",
                if self.visible { "flex" } else { "none" }.to_string(),
            ),
        ]
    }
}

/// A planet name plate positioned over the canvas this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub world: WorldId,
    /// Canvas pixels; `None` when the anchor is off screen or behind the camera.
    pub screen: Option<(f64, f64)>,
    pub highlighted: bool,
    pub border: String,
    pub border_opacity: f64,
    pub text_color: String,
}

impl LabelView {
    /// DOM id of the page element carrying this plate.
    pub fn element_id(&self) -> String {
        format!("planet-label-{}", self.world.as_str())
    }

    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = match self.screen {
            Some((x, y)) => vec![
                ("display", "block".to_string()),
                (
                    "transform",
                    format!("translate(-50%, -50%) translate({x:.1}px, {y:.1}px)"),
                ),
            ],
            None => vec![("display", "none".to_string())],
        };
        props.push(("border-color", self.border.clone()));
        props.push(("--label-border-opacity", format!("{:.2}", self.border_opacity)));
        props.push(("color", self.text_color.clone()));
        props
    }
}

/// `CustomEvent` type and detail for events page scripts listen to.
pub fn custom_event(event: &SceneEvent) -> Option<(&'static str, Option<&'static str>)> {
    match *event {
        SceneEvent::WorldSelected(world) => {
            Some(("solar:world-selected", world.map(|w| w.as_str())))
        }
        SceneEvent::HoverChanged(world) => Some(("solar:hover-changed", world.map(|w| w.as_str()))),
        SceneEvent::RendererReady => Some(("solar:renderer-ready", None)),
        SceneEvent::ScrollToSection { .. } | SceneEvent::ScrollToTop => None,
    }
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document missing"))
}

/// Smooth-scrolls the section with id `anchor` to the top of the viewport.
/// A missing section is logged and otherwise ignored.
pub fn scroll_to_section(anchor: &str) -> Result<(), JsValue> {
    let Some(el) = document()?.get_element_by_id(anchor) else {
        warn!(anchor, "scroll target not found");
        return Ok(());
    };
    let opts = web_sys::ScrollIntoViewOptions::new();
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    opts.set_block(web_sys::ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
    Ok(())
}

pub fn scroll_to_top() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
    Ok(())
}

pub fn update_loading_overlay(view: &OverlayView) -> Result<(), JsValue> {
    let doc = document()?;
    if let Some(progress) = doc.get_element_by_id(PROGRESS_ID) {
        progress.set_text_content(Some(&view.progress_text()));
    }
    let Some(overlay) = doc.get_element_by_id(OVERLAY_ID) else {
        return Ok(());
    };
    let overlay: web_sys::HtmlElement = overlay.dyn_into()?;
    let style = overlay.style();
    for (name, value) in view.style_properties() {
        style.set_property(name, &value)?;
    }
    Ok(())
}

/// Moves and restyles each plate; pages without label elements are skipped.
pub fn update_planet_labels(labels: &[LabelView]) -> Result<(), JsValue> {
    let doc = document()?;
    for label in labels {
        let Some(el) = doc.get_element_by_id(&label.element_id()) else {
            continue;
        };
        let el: web_sys::HtmlElement = el.dyn_into()?;
        el.toggle_attribute_with_force("data-highlighted", label.highlighted)?;
        let style = el.style();
        for (name, value) in label.style_properties() {
            style.set_property(name, &value)?;
        }
    }
    Ok(())
}

pub fn dispatch_scene_event(event: &SceneEvent) -> Result<(), JsValue> {
    match *event {
        SceneEvent::ScrollToSection { world, anchor } => {
            debug!(%world, anchor, "scroll to section");
            return scroll_to_section(anchor);
        }
        SceneEvent::ScrollToTop => return scroll_to_top(),
        _ => {}
    }

    let Some((name, detail)) = custom_event(event) else {
        return Ok(());
    };
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail.map(JsValue::from_str).unwrap_or(JsValue::NULL));
    let custom = web_sys::CustomEvent::new_with_event_init_dict(name, &init)?;
    window.dispatch_event(&custom)?;
    Ok(())
}
