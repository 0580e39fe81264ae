//! Sampling plan - which sub-frames contribute to the averaged image
//!
//! [`is_active`] is the only inclusion rule in the workspace. The thumbnail
//! highlighter, the CPU compositor and the GPU mask upload all go through it.

use crate::quantize::{ExposureWindow, SamplingRate};
use crate::SUBFRAME_COUNT;

/// Position of a sub-frame in time; 0 is the most recent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubframeIndex(pub(crate) u32);

impl SubframeIndex {
    /// The present moment, always eligible for sampling
    pub const LATEST: Self = Self(0);
    /// The oldest captured sub-frame
    pub const OLDEST: Self = Self(SUBFRAME_COUNT - 1);

    pub fn new(index: u32) -> Option<Self> {
        (index < SUBFRAME_COUNT).then_some(Self(index))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// All sub-frames from newest to oldest
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SUBFRAME_COUNT).map(Self)
    }
}

/// Whether sub-frame `index` is sampled under `rate` and `exposure`.
///
/// Index 0 is always eligible. Every other index must fall inside the exposure
/// window. Among eligible indices only every `stride`-th one, counting from 0,
/// is taken.
pub fn is_active(index: SubframeIndex, rate: SamplingRate, exposure: ExposureWindow) -> bool {
    let i = index.get();
    let eligible = i == 0 || i < exposure.get();
    eligible && i % rate.stride() == 0
}

/// Set of sampled sub-frames, one bit per index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveSet(u64);

impl ActiveSet {
    pub fn compute(rate: SamplingRate, exposure: ExposureWindow) -> Self {
        let bits = SubframeIndex::all()
            .filter(|&index| is_active(index, rate, exposure))
            .fold(0u64, |bits, index| bits | (1 << index.get()));
        Self(bits)
    }

    pub fn contains(&self, index: SubframeIndex) -> bool {
        self.0 & (1 << index.get()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Active sub-frames from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = SubframeIndex> + '_ {
        SubframeIndex::all().filter(move |&index| self.contains(index))
    }

    /// Low and high 32-bit halves, as laid out in the shader uniform
    pub fn words(&self) -> [u32; 2] {
        [self.0 as u32, (self.0 >> 32) as u32]
    }
}
