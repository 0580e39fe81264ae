use shutter_core::{
    quantize_exposure, quantize_rate, AtlasCell, Controls, Preset, RenderState, SamplingRate,
    SubframeIndex, SUBFRAME_COUNT,
};

fn active(state: &RenderState) -> Vec<u32> {
    state.active_set().iter().map(SubframeIndex::get).collect()
}

#[test]
fn rate_slider_extremes() {
    let mut raw = -10.0;
    while raw <= 1.0 {
        assert_eq!(quantize_rate(raw).get(), 1);
        raw += 0.25;
    }
    let mut raw = 60.0;
    while raw < 120.0 {
        assert_eq!(quantize_rate(raw).get(), 60);
        raw += 7.5;
    }
}

#[test]
fn documented_quantization_cases() {
    assert_eq!(quantize_rate(8.0).get(), 10);
    assert_eq!(quantize_exposure(-5.0).get(), 0);
    assert_eq!(quantize_exposure(90.0).get(), 60);
    assert_eq!(quantize_exposure(30.5).get(), 31);
}

#[test]
fn strobing_walkthrough() {
    let state = RenderState::from_raw(4.0, 60.0);
    assert_eq!(state.rate.stride(), 15);
    assert_eq!(active(&state), vec![0, 15, 30, 45]);

    let labels = state.labels();
    assert_eq!(labels.samples_per_second, 240);
    assert_eq!(labels.exposure(), "1.0");
}

#[test]
fn short_exposure_walkthrough() {
    let state = RenderState::from_raw(60.0, 5.0);
    assert_eq!(state.rate.stride(), 1);
    assert_eq!(active(&state), vec![0, 1, 2, 3, 4]);

    let labels = state.labels();
    assert_eq!(labels.samples_per_second, 3600);
    assert_eq!(labels.exposure(), "0.1");
}

#[test]
fn active_set_sizes_across_all_rates() {
    for rate in SamplingRate::all() {
        let full = RenderState::from_raw(rate.get() as f64, 60.0);
        assert_eq!(full.active_set().len(), rate.get() as usize);

        let closed = RenderState::from_raw(rate.get() as f64, 0.0);
        assert_eq!(active(&closed), vec![0]);
    }
}

#[test]
fn highlighter_and_planner_agree() {
    for rate in SamplingRate::all() {
        for exposure in 0..=SUBFRAME_COUNT {
            let state = RenderState::from_raw(rate.get() as f64, exposure as f64);
            let set = state.active_set();
            let highlights = state.highlights();
            for index in SubframeIndex::all() {
                assert_eq!(highlights.is_highlighted(AtlasCell::of(index)), set.contains(index));
            }
        }
    }
}

#[test]
fn preset_sequence_through_controls() {
    let mut controls = Controls::default();
    let state = controls.apply_preset(Preset::LowSampleRate).unwrap();
    assert_eq!(state.labels().samples_per_second_text(), "Samples per Second: 240");

    let state = controls.apply_preset(Preset::ShortExposure).unwrap();
    assert_eq!(state.labels().exposure_text(), "Exposure: 0.1");
    assert_eq!(state.highlights().count(), 5);
}
