//! Slider-driven session around a [`Renderer`]
//!
//! Mirrors the page the visualizer lives on: every input re-derives the
//! render state, refreshes labels and thumbnails, and redraws. Rendering
//! failures switch compositing off for good; sliders and labels keep working.

use crate::atlas::AtlasImage;
use crate::renderer::{RenderOutcome, Renderer};
use crate::Result;
use shutter_core::{Controls, FrameHighlights, Labels, Preset, RenderState};

/// Whether compositing is currently possible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    /// Renderer is up but the atlas has not loaded yet
    WaitingForAtlas,
    Ready,
    /// Rendering is off; the string is the reported cause
    Disabled(String),
}

pub struct Visualization {
    controls: Controls,
    state: RenderState,
    renderer: Option<Renderer>,
    status: RenderStatus,
    needs_redraw: bool,
}

impl Visualization {
    /// Start a session; a failed renderer disables compositing up front
    pub fn new(renderer: Result<Renderer>, controls: Controls) -> Self {
        let mut vis = Self {
            state: controls.state(),
            controls,
            renderer: None,
            status: RenderStatus::WaitingForAtlas,
            needs_redraw: true,
        };
        vis.install_renderer(renderer);
        vis
    }

    /// Replace the renderer slot, clearing any earlier failure.
    ///
    /// The new renderer starts behind its own atlas gate; a failed one
    /// disables rendering again with the new cause.
    pub fn install_renderer(&mut self, renderer: Result<Renderer>) {
        self.renderer = None;
        self.status = RenderStatus::WaitingForAtlas;
        self.needs_redraw = true;
        match renderer {
            Ok(renderer) => {
                if renderer.is_ready() {
                    self.status = RenderStatus::Ready;
                }
                log::info!("Renderer installed ({:?})", self.status);
                self.renderer = Some(renderer);
            }
            Err(err) => self.disable(err.to_string()),
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn labels(&self) -> Labels {
        self.state.labels()
    }

    pub fn highlights(&self) -> FrameHighlights {
        self.state.highlights()
    }

    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut Renderer> {
        self.renderer.as_mut()
    }

    /// A parameter changed since the last successful draw
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn on_rate_input(&mut self, raw: f64) -> bool {
        let changed = self.controls.set_rate_input(raw);
        self.apply(changed)
    }

    pub fn on_exposure_input(&mut self, raw: f64) -> bool {
        let changed = self.controls.set_exposure_input(raw);
        self.apply(changed)
    }

    pub fn step_rate(&mut self, delta: f64) -> bool {
        let changed = self.controls.step_rate(delta);
        self.apply(changed)
    }

    pub fn step_exposure(&mut self, delta: f64) -> bool {
        let changed = self.controls.step_exposure(delta);
        self.apply(changed)
    }

    pub fn apply_preset(&mut self, preset: Preset) -> bool {
        let changed = self.controls.apply_preset(preset);
        self.apply(changed)
    }

    /// Hand the loaded (or failed) atlas to the renderer
    pub fn load_atlas(&mut self, atlas: Result<AtlasImage>) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match atlas.and_then(|atlas| renderer.load_atlas(&atlas)) {
            Ok(()) => {
                self.status = RenderStatus::Ready;
                self.needs_redraw = true;
            }
            Err(err) => self.disable(err.to_string()),
        }
    }

    /// Composite the current state into `target`.
    ///
    /// Returns `None` when rendering is disabled.
    pub fn draw(&mut self, target: &wgpu::TextureView) -> Option<RenderOutcome> {
        let renderer = self.renderer.as_mut()?;
        match renderer.render(&self.state, target) {
            Ok(outcome) => {
                if outcome == RenderOutcome::Drawn {
                    self.needs_redraw = false;
                }
                Some(outcome)
            }
            Err(err) => {
                self.disable(err.to_string());
                None
            }
        }
    }

    /// Switch rendering off; reported once
    pub fn disable(&mut self, reason: String) {
        if matches!(self.status, RenderStatus::Disabled(_)) {
            return;
        }
        log::error!("Rendering disabled: {}", reason);
        self.renderer = None;
        self.status = RenderStatus::Disabled(reason);
    }

    fn apply(&mut self, changed: Option<RenderState>) -> bool {
        let Some(state) = changed else {
            return false;
        };
        self.state = state;
        self.needs_redraw = true;
        log::debug!("{} | {}", self.labels(), self.highlights());
        true
    }
}
