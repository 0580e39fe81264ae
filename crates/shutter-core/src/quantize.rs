//! Slider value quantization
//!
//! Both sliders are continuous, but a camera can only run at frame rates that
//! evenly divide the 60 captured sub-frames and can only hold its shutter open
//! for a whole number of them.

use crate::SUBFRAME_COUNT;

/// Sampling rates a camera can run at, in ascending order.
///
/// Every entry divides [`SUBFRAME_COUNT`] evenly.
pub const VALID_RATES: [u32; 12] = [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60];

/// Quantized sampling rate ("frames per fraction of a second")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SamplingRate(u32);

impl SamplingRate {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(60);

    /// Wrap an exact rate; `None` unless it is one of [`VALID_RATES`]
    pub fn new(rate: u32) -> Option<Self> {
        VALID_RATES.contains(&rate).then_some(Self(rate))
    }

    /// Snap a raw slider value to the nearest valid rate
    pub fn quantize(raw: f64) -> Self {
        quantize_rate(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Distance between two sampled sub-frames
    pub fn stride(self) -> u32 {
        SUBFRAME_COUNT / self.0
    }

    /// Effective samples per second shown to the user
    pub fn samples_per_second(self) -> u32 {
        self.0 * SUBFRAME_COUNT
    }

    /// Iterate over every valid rate in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        VALID_RATES.iter().map(|&rate| Self(rate))
    }
}

impl Default for SamplingRate {
    fn default() -> Self {
        Self::MAX
    }
}

/// Quantized exposure window, in sub-frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExposureWindow(u32);

impl ExposureWindow {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(SUBFRAME_COUNT);

    /// Wrap an exact window; `None` above [`SUBFRAME_COUNT`]
    pub fn new(subframes: u32) -> Option<Self> {
        (subframes <= SUBFRAME_COUNT).then_some(Self(subframes))
    }

    /// Snap a raw slider value to a whole number of sub-frames
    pub fn quantize(raw: f64) -> Self {
        quantize_exposure(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Shutter open time as a fraction of one second
    pub fn seconds(self) -> f64 {
        self.0 as f64 / SUBFRAME_COUNT as f64
    }
}

impl Default for ExposureWindow {
    fn default() -> Self {
        Self::MAX
    }
}

/// Nearest valid sampling rate for a raw slider value.
///
/// Values at or below 1 give 1, values at or above 60 give 60. Anything in
/// between picks the closest entry of [`VALID_RATES`]; a value exactly halfway
/// between two entries resolves to the upper one, so `8.0` gives 10 rather
/// than 6. NaN gives the minimum.
pub fn quantize_rate(raw: f64) -> SamplingRate {
    if raw.is_nan() || raw <= 1.0 {
        return SamplingRate::MIN;
    }
    if raw >= 60.0 {
        return SamplingRate::MAX;
    }

    for pair in VALID_RATES.windows(2) {
        let (lower, upper) = (pair[0] as f64, pair[1] as f64);
        if raw > upper {
            continue;
        }

        // Strict comparison: ties go to `upper`.
        return if raw - lower < upper - raw {
            SamplingRate(pair[0])
        } else {
            SamplingRate(pair[1])
        };
    }

    SamplingRate::MAX
}

/// Whole-sub-frame exposure window for a raw slider value.
///
/// Clamped to `[0, 60]`; rounds half up, so `30.5` gives 31. NaN gives 0.
pub fn quantize_exposure(raw: f64) -> ExposureWindow {
    if raw.is_nan() || raw <= 0.0 {
        return ExposureWindow::MIN;
    }
    if raw >= SUBFRAME_COUNT as f64 {
        return ExposureWindow::MAX;
    }

    // `raw + 0.5` can round up on its own just below a half.
    let whole = raw.floor();
    let rounded = if raw - whole >= 0.5 { whole + 1.0 } else { whole };
    ExposureWindow(rounded as u32)
}
