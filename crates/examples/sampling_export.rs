//! Headless export of the composited image for each preset
//!
//! Usage: sampling_export [OUT_DIR] [ATLAS_IMAGE]
//!
//! Composites on the GPU when an adapter is available and falls back to the
//! CPU compositor otherwise. Writes one PNG per preset into OUT_DIR
//! (default `shutter_out`).

mod demo_atlas;

use image::RgbaImage;
use shutter::prelude::*;
use std::path::PathBuf;

const PRESETS: [(&str, Preset); 5] = [
    ("low_sample_rate", Preset::LowSampleRate),
    ("high_sample_rate", Preset::HighSampleRate),
    ("short_exposure", Preset::ShortExposure),
    ("long_exposure", Preset::LongExposure),
    ("half_exposure", Preset::ExposureFraction(0.5)),
];

enum Backend {
    Gpu(Renderer),
    Cpu(CpuCompositor),
}

impl Backend {
    fn new(atlas: &AtlasImage) -> Self {
        let gpu = GpuContext::headless()
            .and_then(|ctx| Renderer::new(ctx, RendererConfig::for_atlas(atlas)))
            .and_then(|mut renderer| renderer.load_atlas(atlas).map(|()| renderer));
        match gpu {
            Ok(renderer) => Backend::Gpu(renderer),
            Err(err) => {
                log::warn!("GPU compositing unavailable ({}), using CPU", err);
                Backend::Cpu(CpuCompositor::for_atlas(atlas))
            }
        }
    }

    fn composite(&mut self, atlas: &AtlasImage, state: &RenderState) -> shutter::render::Result<RgbaImage> {
        match self {
            Backend::Gpu(renderer) => renderer
                .render_to_image(state)?
                .ok_or_else(|| shutter::render::Error::Asset("atlas not loaded".into())),
            Backend::Cpu(compositor) => Ok(compositor.composite_rgba8(atlas, state)),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "shutter_out".into()));
    let atlas = match args.next() {
        Some(path) => AtlasImage::open(path)?,
        None => demo_atlas::generate(demo_atlas::DEFAULT_TILE)?,
    };

    std::fs::create_dir_all(&out_dir)?;
    let mut backend = Backend::new(&atlas);
    let mut controls = Controls::default();

    for (name, preset) in PRESETS {
        controls.apply_preset(preset);
        let state = controls.state();
        let image = backend.composite(&atlas, &state)?;

        let path = out_dir.join(format!("{name}.png"));
        image.save(&path)?;

        let labels = state.labels();
        log::info!(
            "{}: {}, {} -> {}",
            name,
            labels.samples_per_second_text(),
            labels.exposure_text(),
            path.display()
        );
        log::info!("  {}", state.highlights());
    }

    Ok(())
}
