//! Raw slider values and canned presets

use crate::state::RenderState;
use crate::SUBFRAME_COUNT;

/// Slider ranges as exposed to the user
pub const RATE_RANGE: (f64, f64) = (1.0, 60.0);
pub const EXPOSURE_RANGE: (f64, f64) = (0.0, SUBFRAME_COUNT as f64);

/// Canned slider positions used to walk through the effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    /// 4 samples at full exposure: visible strobing
    LowSampleRate,
    /// Every sub-frame at full exposure: smooth blur
    HighSampleRate,
    /// Every sub-frame over the 5 most recent: near-frozen motion
    ShortExposure,
    /// Every sub-frame at full exposure
    LongExposure,
    /// Every sub-frame, shutter open for the given fraction of a second
    ExposureFraction(f64),
}

impl Preset {
    /// Raw (rate, exposure) slider values this preset moves to
    pub fn slider_values(self) -> (f64, f64) {
        match self {
            Preset::LowSampleRate => (4.0, 60.0),
            Preset::HighSampleRate => (60.0, 60.0),
            Preset::ShortExposure => (60.0, 5.0),
            Preset::LongExposure => (60.0, 60.0),
            Preset::ExposureFraction(fraction) => {
                (60.0, (fraction * SUBFRAME_COUNT as f64).round())
            }
        }
    }
}

/// Current raw slider positions.
///
/// Raw values are kept unquantized so stepping a slider behaves like dragging
/// it; [`Controls::state`] derives a fresh [`RenderState`] every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    rate: f64,
    exposure: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            rate: RATE_RANGE.1,
            exposure: EXPOSURE_RANGE.1,
        }
    }
}

impl Controls {
    pub fn new(rate: f64, exposure: f64) -> Self {
        let mut controls = Self::default();
        controls.set_rate_input(rate);
        controls.set_exposure_input(exposure);
        controls
    }

    pub fn rate_input(&self) -> f64 {
        self.rate
    }

    pub fn exposure_input(&self) -> f64 {
        self.exposure
    }

    /// Returns the new state if the quantized result changed
    pub fn set_rate_input(&mut self, raw: f64) -> Option<RenderState> {
        let before = self.state();
        self.rate = clamp_input(raw, RATE_RANGE);
        self.changed_from(before)
    }

    /// Returns the new state if the quantized result changed
    pub fn set_exposure_input(&mut self, raw: f64) -> Option<RenderState> {
        let before = self.state();
        self.exposure = clamp_input(raw, EXPOSURE_RANGE);
        self.changed_from(before)
    }

    pub fn step_rate(&mut self, delta: f64) -> Option<RenderState> {
        self.set_rate_input(self.rate + delta)
    }

    pub fn step_exposure(&mut self, delta: f64) -> Option<RenderState> {
        self.set_exposure_input(self.exposure + delta)
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Option<RenderState> {
        let before = self.state();
        let (rate, exposure) = preset.slider_values();
        self.rate = clamp_input(rate, RATE_RANGE);
        self.exposure = clamp_input(exposure, EXPOSURE_RANGE);
        log::debug!("Applied preset {:?}", preset);
        self.changed_from(before)
    }

    pub fn state(&self) -> RenderState {
        RenderState::from_raw(self.rate, self.exposure)
    }

    fn changed_from(&self, before: RenderState) -> Option<RenderState> {
        let after = self.state();
        if after == before {
            return None;
        }
        log::debug!(
            "Render state changed: rate {} -> {}, exposure {} -> {}",
            before.rate.get(),
            after.rate.get(),
            before.exposure.get(),
            after.exposure.get(),
        );
        Some(after)
    }
}

/// Keep the slider inside its track; NaN snaps to the low end
fn clamp_input(raw: f64, (min, max): (f64, f64)) -> f64 {
    if raw.is_nan() {
        return min;
    }
    raw.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_full_rate_and_exposure() {
        let state = Controls::default().state();
        assert_eq!(state.rate.get(), 60);
        assert_eq!(state.exposure.get(), 60);
    }

    #[test]
    fn presets_match_walkthrough() {
        let mut controls = Controls::default();

        let state = controls.apply_preset(Preset::LowSampleRate).unwrap();
        assert_eq!((state.rate.get(), state.exposure.get()), (4, 60));

        let state = controls.apply_preset(Preset::ShortExposure).unwrap();
        assert_eq!((state.rate.get(), state.exposure.get()), (60, 5));

        let state = controls.apply_preset(Preset::ExposureFraction(0.5)).unwrap();
        assert_eq!((state.rate.get(), state.exposure.get()), (60, 30));

        let state = controls.apply_preset(Preset::HighSampleRate).unwrap();
        assert_eq!((state.rate.get(), state.exposure.get()), (60, 60));

        // Same quantized result as before: nothing to redraw.
        assert!(controls.apply_preset(Preset::LongExposure).is_none());
    }

    #[test]
    fn change_is_reported_only_when_quantized_state_moves() {
        let mut controls = Controls::new(6.0, 60.0);
        // 6.9 still quantizes to 6.
        assert!(controls.set_rate_input(6.9).is_none());
        // 8.0 is the tie between 6 and 10.
        let state = controls.set_rate_input(8.0).unwrap();
        assert_eq!(state.rate.get(), 10);
    }

    #[test]
    fn stepping_is_clamped_to_the_track() {
        let mut controls = Controls::default();
        for _ in 0..100 {
            controls.step_exposure(-1.0);
        }
        assert_eq!(controls.exposure_input(), 0.0);
        assert_eq!(controls.state().exposure.get(), 0);

        controls.step_rate(500.0);
        assert_eq!(controls.rate_input(), 60.0);
    }
}
