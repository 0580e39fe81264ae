//! Immutable render state and what the presentation layer shows for it

use crate::atlas::AtlasCell;
use crate::plan::{ActiveSet, SubframeIndex};
use crate::quantize::{quantize_exposure, quantize_rate, ExposureWindow, SamplingRate};
use crate::SUBFRAME_COUNT;
use std::fmt;

/// Quantized parameters for one compositing pass.
///
/// Renderers take this by value, so a pass always sees a matching
/// rate/exposure pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderState {
    pub rate: SamplingRate,
    pub exposure: ExposureWindow,
}

impl RenderState {
    pub fn new(rate: SamplingRate, exposure: ExposureWindow) -> Self {
        Self { rate, exposure }
    }

    /// Quantize both raw slider values
    pub fn from_raw(rate: f64, exposure: f64) -> Self {
        Self::new(quantize_rate(rate), quantize_exposure(exposure))
    }

    pub fn active_set(&self) -> ActiveSet {
        ActiveSet::compute(self.rate, self.exposure)
    }

    pub fn labels(&self) -> Labels {
        Labels::for_state(self)
    }

    pub fn highlights(&self) -> FrameHighlights {
        FrameHighlights::for_state(self)
    }
}

/// Text shown next to the two sliders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub samples_per_second: u32,
    /// Exposure in seconds, rounded to tenths and stored ×10
    exposure_tenths: u32,
}

impl Labels {
    pub fn for_state(state: &RenderState) -> Self {
        Self {
            samples_per_second: state.rate.samples_per_second(),
            exposure_tenths: round_to_tenths(state.exposure.seconds()),
        }
    }

    /// Exposure formatted with one decimal place, e.g. `"0.5"`
    pub fn exposure(&self) -> String {
        format!("{}.{}", self.exposure_tenths / 10, self.exposure_tenths % 10)
    }

    pub fn samples_per_second_text(&self) -> String {
        format!("Samples per Second: {}", self.samples_per_second)
    }

    pub fn exposure_text(&self) -> String {
        format!("Exposure: {}", self.exposure())
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.samples_per_second_text(), self.exposure_text())
    }
}

/// Nearest number of tenths to `x` in `[0, 1]`, ties upward.
///
/// Works on the exact binary value of `x`, so `0.15` (stored just below
/// 0.15) gives 1 while `0.25` (stored exactly) gives 3.
fn round_to_tenths(x: f64) -> u32 {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }
    if x >= 1.0 {
        return 10;
    }

    // x = mantissa * 2^-shift, exactly.
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, shift) = if exponent == 0 {
        (fraction, 1074)
    } else {
        (fraction | (1u64 << 52), 1075 - exponent)
    };
    if shift >= 120 {
        return 0;
    }

    // Count the midpoints (2k + 1) / 20 that x reaches.
    let scaled = 20 * mantissa as u128;
    (0..10u32)
        .take_while(|&k| scaled >= (2 * k as u128 + 1) << shift)
        .count() as u32
}

/// Highlight flag per thumbnail, in atlas (display) order.
///
/// The thumbnail strip shows the atlas cells left to right, so the most recent
/// sub-frame is the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHighlights([bool; SUBFRAME_COUNT as usize]);

impl FrameHighlights {
    pub fn for_state(state: &RenderState) -> Self {
        let active = state.active_set();
        let mut flags = [false; SUBFRAME_COUNT as usize];
        for index in SubframeIndex::all() {
            flags[AtlasCell::of(index).get() as usize] = active.contains(index);
        }
        Self(flags)
    }

    /// Whether the thumbnail at `cell` is sampled
    pub fn is_highlighted(&self, cell: AtlasCell) -> bool {
        self.0[cell.get() as usize]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag).count()
    }
}

impl fmt::Display for FrameHighlights {
    /// One character per thumbnail: `#` sampled, `.` skipped
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &flag in &self.0 {
            f.write_str(if flag { "#" } else { "." })?;
        }
        Ok(())
    }
}
