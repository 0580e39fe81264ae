//! Interactive sampling visualizer
//!
//! Usage: sampling_viewer [ATLAS_IMAGE]
//!
//! Without an argument a procedural atlas is generated.
//!
//! Controls:
//!   Left/Right   sampling rate slider
//!   Down/Up      exposure slider
//!   1 / 2        low / high samples per second
//!   3 / 4        short / long exposure
//!   5            half-open shutter
//!   Escape       exit

mod demo_atlas;

use shutter::prelude::*;
use shutter::render::{Error, Result};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

fn main() {
    env_logger::init();
    log::info!("Starting Shutter sampling viewer");

    let atlas_path = std::env::args().nth(1);
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(atlas_path);

    event_loop.run_app(&mut app).expect("Event loop error");
}

struct App {
    atlas_path: Option<String>,
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    /// `None` when no adapter or device could be acquired
    surface: Option<SurfaceState>,
    vis: Visualization,
}

struct SurfaceState {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    config: wgpu::SurfaceConfiguration,
}

impl App {
    fn new(atlas_path: Option<String>) -> Self {
        Self { atlas_path, state: None }
    }

    fn load_atlas(&self) -> Result<AtlasImage> {
        match &self.atlas_path {
            Some(path) => {
                log::info!("Loading atlas from {}", path);
                AtlasImage::open(path)
            }
            None => demo_atlas::generate(demo_atlas::DEFAULT_TILE),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let atlas = self.load_atlas();
        let tile = atlas
            .as_ref()
            .map(|atlas| atlas.tile_size())
            .unwrap_or(demo_atlas::DEFAULT_TILE);

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Shutter")
                        .with_inner_size(winit::dpi::PhysicalSize::new(tile.x * 2, tile.y * 2)),
                )
                .expect("Failed to create window"),
        );

        let (surface, renderer) = match create_surface(window.clone()) {
            Ok((surface, ctx)) => {
                let config = RendererConfig {
                    width: surface.config.width,
                    height: surface.config.height,
                    target_format: surface.config.format,
                };
                (Some(surface), Renderer::new(ctx, config))
            }
            Err(err) => (None, Err(err)),
        };

        let mut vis = Visualization::new(renderer, Controls::default());
        vis.load_atlas(atlas);

        let state = AppState { window, surface, vis };
        state.refresh_title();
        state.window.request_redraw();
        self.state = Some(state);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else { return };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(key),
                    ..
                },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                if state.handle_key(key) {
                    state.refresh_title();
                    state.window.request_redraw();
                }
            }
            WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                state.resize(size.width, size.height);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => state.render(),
            _ => {}
        }
    }
}

impl AppState {
    /// Returns `true` when the render state changed
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::ArrowLeft => self.vis.step_rate(-1.0),
            KeyCode::ArrowRight => self.vis.step_rate(1.0),
            KeyCode::ArrowDown => self.vis.step_exposure(-1.0),
            KeyCode::ArrowUp => self.vis.step_exposure(1.0),
            KeyCode::Digit1 => self.vis.apply_preset(Preset::LowSampleRate),
            KeyCode::Digit2 => self.vis.apply_preset(Preset::HighSampleRate),
            KeyCode::Digit3 => self.vis.apply_preset(Preset::ShortExposure),
            KeyCode::Digit4 => self.vis.apply_preset(Preset::LongExposure),
            KeyCode::Digit5 => self.vis.apply_preset(Preset::ExposureFraction(0.5)),
            _ => false,
        }
    }

    fn refresh_title(&self) {
        let labels = self.vis.labels();
        self.window.set_title(&format!(
            "Shutter | {} | {}",
            labels.samples_per_second_text(),
            labels.exposure_text()
        ));
        log::info!("Sampled frames: {}", self.vis.highlights());
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(surface) = &mut self.surface else { return };
        surface.config.width = width;
        surface.config.height = height;
        surface.surface.configure(&surface.device, &surface.config);
        if let Some(renderer) = self.vis.renderer_mut() {
            renderer.resize(width, height);
        }
    }

    fn render(&mut self) {
        let Some(surface) = &self.surface else { return };
        if self.vis.status() != &RenderStatus::Ready {
            return;
        }

        let output = match surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(RenderOutcome::Drawn) = self.vis.draw(&view) {
            output.present();
        }
    }
}

/// Acquire a device that can present to `window`
fn create_surface(window: Arc<Window>) -> Result<(SurfaceState, GpuContext)> {
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let surface = instance
        .create_surface(window)
        .map_err(|e| Error::Unsupported(format!("surface creation failed: {e}")))?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .map_err(|e| Error::Unsupported(format!("no GPU adapter: {e}")))?;

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("Viewer Device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
        memory_hints: wgpu::MemoryHints::default(),
        experimental_features: Default::default(),
        trace: wgpu::Trace::Off,
    }))
    .map_err(|e| Error::Unsupported(format!("device request failed: {e}")))?;

    let device = Arc::new(device);
    let queue = Arc::new(queue);

    // The atlas is stored without gamma encoding, so present it the same way.
    let caps = surface.get_capabilities(&adapter);
    let format = caps
        .formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| Error::Unsupported("surface reports no formats".into()))?;

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    Ok((
        SurfaceState {
            surface,
            device: device.clone(),
            config,
        },
        GpuContext::from_parts(device, queue),
    ))
}
