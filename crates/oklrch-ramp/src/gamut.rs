//! Gamut boundary engine.
//!
//! For a fixed hue, the sRGB gamut in OKLCH is a lopsided triangle in the
//! lightness/chroma plane: zero chroma at black and white, and a cusp
//! somewhere between whose height and lightness depend on the hue. This
//! module finds that edge numerically and caches it per hue so a picker
//! can draw it without recomputing on every frame.
//!
//! # Caching
//!
//! Boundaries are keyed by the hue rounded to the nearest whole degree
//! (plus the sample count). Entries are immutable `Arc` slices, so a
//! caller holding one is unaffected by a later [`BoundaryCache::clear`].

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use oklrch_color::Oklch;
use oklrch_color::color::normalize_hue;

/// Channel slack when deciding whether a color is displayable.
pub const DISPLAYABLE_TOLERANCE: f64 = 1e-4;

/// Upper end of the chroma search. No sRGB color exceeds ~0.37.
pub const MAX_SEARCH_CHROMA: f64 = 0.5;

/// Lightness samples per boundary when the caller has no preference.
pub const DEFAULT_SAMPLES: usize = 50;

const SEARCH_ITERATIONS: usize = 20;
const SEARCH_PRECISION: f64 = 1e-4;
const BLACK_LIGHTNESS: f64 = 0.001;
const WHITE_LIGHTNESS: f64 = 0.999;

/// One sample of a gamut boundary: the largest displayable chroma `c` at
/// lightness `l`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoint {
    pub l: f64,
    pub c: f64,
}

/// Whether `oklch(l c h)` renders in sRGB, allowing
/// [`DISPLAYABLE_TOLERANCE`] of slack per channel.
///
/// Non-finite channels are never displayable.
#[must_use]
pub fn is_displayable(l: f64, c: f64, h: f64) -> bool {
    Oklch::new(l, c, h).to_rgb().in_gamut_within(DISPLAYABLE_TOLERANCE)
}

/// The largest chroma displayable at lightness `l` and hue `h`.
///
/// Near-black and near-white lightness has no chroma to give and returns
/// 0. Otherwise this is a bounded binary search over
/// `[0, MAX_SEARCH_CHROMA]`; the returned value is the lower end of the
/// final bracket, so it is itself displayable.
#[must_use]
pub fn find_max_chroma(l: f64, h: f64) -> f64 {
    if l <= BLACK_LIGHTNESS || l >= WHITE_LIGHTNESS {
        return 0.0;
    }

    let mut low = 0.0;
    let mut high = MAX_SEARCH_CHROMA;
    for _ in 0..SEARCH_ITERATIONS {
        if high - low < SEARCH_PRECISION {
            break;
        }
        let mid = (low + high) * 0.5;
        if is_displayable(l, mid, h) {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

/// Sample the boundary for `hue` at `samples + 1` evenly spaced
/// lightnesses from 0 to 1 inclusive.
///
/// `samples == 0` is treated as 1.
#[must_use]
pub fn calculate_gamut_boundary(hue: f64, samples: usize) -> Vec<BoundaryPoint> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let l = i as f64 / samples as f64;
            BoundaryPoint { l, c: find_max_chroma(l, hue) }
        })
        .collect()
}

/// Cache key: whole-degree hue in `0..360` and the sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryKey {
    pub hue: u16,
    pub samples: usize,
}

impl BoundaryKey {
    /// Normalize and round `hue`. Non-finite hues key as 0.
    #[must_use]
    pub fn new(hue: f64, samples: usize) -> Self {
        let hue = if hue.is_finite() { normalize_hue(hue).round() as u16 % 360 } else { 0 };
        Self { hue, samples }
    }
}

/// Thread-safe memo of gamut boundaries.
///
/// A process-wide instance backs [`gamut_boundary`]; construct your own
/// to keep entries scoped (tests, long-running services that want to
/// bound memory).
#[derive(Debug, Default)]
pub struct BoundaryCache {
    entries: RwLock<HashMap<BoundaryKey, Arc<[BoundaryPoint]>>>,
}

impl BoundaryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The boundary for `hue` (rounded to a whole degree), computing and
    /// storing it on first use.
    ///
    /// Repeated calls with the same key return the same `Arc`.
    #[must_use]
    pub fn get(&self, hue: f64, samples: usize) -> Arc<[BoundaryPoint]> {
        let key = BoundaryKey::new(hue, samples);
        let cached = self.read().get(&key).cloned();
        if let Some(boundary) = cached {
            return boundary;
        }

        debug!("gamut boundary miss: hue {} samples {}", key.hue, key.samples);
        let computed: Arc<[BoundaryPoint]> =
            calculate_gamut_boundary(f64::from(key.hue), key.samples).into();

        // Another thread may have filled the slot meanwhile; keep the first.
        Arc::clone(self.write().entry(key).or_insert(computed))
    }

    /// Drop every cached boundary.
    pub fn clear(&self) {
        let mut entries = self.write();
        debug!("gamut boundary cache cleared ({} entries)", entries.len());
        entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<BoundaryKey, Arc<[BoundaryPoint]>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<BoundaryKey, Arc<[BoundaryPoint]>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

static GLOBAL_CACHE: OnceLock<BoundaryCache> = OnceLock::new();

/// The process-wide boundary cache.
pub fn global_cache() -> &'static BoundaryCache {
    GLOBAL_CACHE.get_or_init(BoundaryCache::new)
}

/// [`BoundaryCache::get`] on the process-wide cache.
#[must_use]
pub fn gamut_boundary(hue: f64, samples: usize) -> Arc<[BoundaryPoint]> {
    global_cache().get(hue, samples)
}

/// [`BoundaryCache::clear`] on the process-wide cache.
pub fn clear_boundary_cache() {
    global_cache().clear();
}
