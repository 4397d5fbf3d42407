use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default padding ratio between categorical slots.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// Default number of tick intervals used by both axes.
pub const DEFAULT_TICK_COUNT: usize = 5;

pub type TickValues = SmallVec<[f64; 8]>;

/// Affine map from a numeric domain to a pixel range.
///
/// Construction never fails: a zero-width (or NaN-width) domain falls back to a
/// unit denominator, so the scale stays finite for finite input. Callers get
/// meaningful positions only for domains produced by [`nice_domain`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn slope(self) -> f64 {
        let span = self.domain_end - self.domain_start;
        let span = if span == 0.0 || span.is_nan() { 1.0 } else { span };
        (self.range_end - self.range_start) / span
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if let Some(half_span) = self.overflowing_half_span() {
            let fraction = (value / 2.0 - self.domain_start / 2.0) / half_span;
            return self.range_start + fraction * (self.range_end - self.range_start);
        }
        self.range_start + (value - self.domain_start) * self.slope()
    }

    /// Maps a pixel back into the domain; a flat range inverts to the domain start.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if let Some(half_span) = self.overflowing_half_span() {
            let range_span = self.range_end - self.range_start;
            if range_span == 0.0 || !range_span.is_finite() {
                return self.domain_start;
            }
            let fraction = (pixel - self.range_start) / range_span;
            return (self.domain_start / 2.0 + fraction * half_span) * 2.0;
        }
        let slope = self.slope();
        if slope == 0.0 || !slope.is_finite() {
            return self.domain_start;
        }
        self.domain_start + (pixel - self.range_start) / slope
    }

    /// Half of a finite domain whose full width overflows `f64`.
    fn overflowing_half_span(self) -> Option<f64> {
        let (start, end) = (self.domain_start, self.domain_end);
        let overflows = start.is_finite() && end.is_finite() && (end - start).is_infinite();
        overflows.then(|| end / 2.0 - start / 2.0)
    }
}

/// Scale from categorical labels to evenly spaced pixel slots.
///
/// The range is split into `n` slots of width `step` separated (and flanked)
/// by `n + 1` padding gaps of width `step * padding`. Each band is
/// `bandwidth` wide and sits centered in its slot, so the first and last
/// centers are equally far from the range ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Builds a band scale; repeated labels share the slot of their first occurrence.
    pub fn new<I, S>(labels: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: IndexSet<String> = labels.into_iter().map(Into::into).collect();
        let count = labels.len() as f64;
        let denominator = count + (count + 1.0) * padding;
        let step = if count > 0.0 && denominator > 0.0 && denominator.is_finite() {
            (range.1 - range.0) / denominator
        } else {
            0.0
        };

        Self {
            labels,
            range_start: range.0,
            range_end: range.1,
            padding,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    #[must_use]
    pub fn with_default_padding<I, S>(labels: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels, range, DEFAULT_BAND_PADDING)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Band start for `label`; unknown labels map to `0`.
    #[must_use]
    pub fn position(&self, label: &str) -> f64 {
        self.index_of(label).map_or(0.0, |index| self.band_start(index))
    }

    /// Band center for `label` (`position + bandwidth / 2`), also the slot middle.
    #[must_use]
    pub fn center(&self, label: &str) -> f64 {
        self.position(label) + self.bandwidth / 2.0
    }

    fn band_start(&self, index: usize) -> f64 {
        let i = index as f64;
        let slot_start = self.range_start + self.step * self.padding * (i + 1.0) + i * self.step;
        slot_start + (self.step - self.bandwidth) / 2.0
    }
}

/// Widens a domain outward to power-of-ten boundaries.
///
/// Non-finite bounds degrade to `(0, 1)` and flat domains grow by one unit on
/// each side, so the result is never degenerate. Spans too wide to snap
/// without overflowing are returned as-is.
#[must_use]
pub fn nice_domain(domain: (f64, f64)) -> (f64, f64) {
    let (a, b) = domain;
    if !a.is_finite() || !b.is_finite() {
        return (0.0, 1.0);
    }
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    if min == max {
        let widened = (min - 1.0, max + 1.0);
        if widened.0 < widened.1 {
            return widened;
        }
        let pad = min.abs() * f64::EPSILON;
        let (lo, hi) = (min - pad, max + pad);
        return (
            if lo.is_finite() { lo } else { min },
            if hi.is_finite() { hi } else { max },
        );
    }

    let span = max - min;
    let magnitude = if span.is_finite() {
        span.log10()
    } else {
        // `max - min` overflows near `f64::MAX`; halve before subtracting.
        (max / 2.0 - min / 2.0).log10() + std::f64::consts::LOG10_2
    };
    let step = 10f64.powf(magnitude.floor());
    let snapped = ((min / step).floor() * step, (max / step).ceil() * step);
    if snapped.0.is_finite() && snapped.1.is_finite() && snapped.0 < snapped.1 {
        snapped
    } else {
        (min, max)
    }
}

/// `count + 1` evenly spaced values from `min` to `max`, both included.
#[must_use]
pub fn ticks(domain: (f64, f64), count: usize) -> TickValues {
    let count = count.max(1);
    let (min, max) = domain;
    let step = (max - min) / count as f64;

    let mut values: TickValues = if step.is_infinite() && min.is_finite() && max.is_finite() {
        let half_step = (max / 2.0 - min / 2.0) / count as f64;
        (0..count)
            .map(|i| (min / 2.0 + half_step * i as f64) * 2.0)
            .collect()
    } else {
        (0..count).map(|i| min + step * i as f64).collect()
    };
    values.push(max);
    values
}

/// `(min, max)` over the finite values; `(inf, -inf)` when there are none.
#[must_use]
pub fn extent<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Like [`extent`], but any non-finite input poisons the result with NaN.
#[must_use]
pub fn extent_strict<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut bounds = (f64::INFINITY, f64::NEG_INFINITY);
    for value in values {
        if !value.is_finite() {
            return (f64::NAN, f64::NAN);
        }
        bounds = (bounds.0.min(value), bounds.1.max(value));
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::{BandScale, extent, extent_strict, nice_domain, ticks};

    #[test]
    fn nice_domain_snaps_to_power_of_ten() {
        assert_eq!(nice_domain((1.0, 3.0)), (1.0, 3.0));
        assert_eq!(nice_domain((3.0, 47.0)), (0.0, 50.0));
        assert_eq!(nice_domain((120.0, 980.0)), (100.0, 1000.0));
    }

    #[test]
    fn reversed_domain_is_reordered_before_snapping() {
        assert_eq!(nice_domain((50.0, 3.0)), (0.0, 50.0));
    }

    #[test]
    fn zero_tick_count_still_returns_endpoints() {
        assert_eq!(ticks((2.0, 8.0), 0).as_slice(), &[2.0, 8.0]);
    }

    #[test]
    fn duplicate_band_labels_share_first_slot() {
        let scale = BandScale::new(["a", "b", "a"], (0.0, 100.0), 0.1);
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.index_of("a"), Some(0));
    }

    #[test]
    fn extents_handle_empty_and_non_finite_input() {
        assert_eq!(extent(Vec::<f64>::new()), (f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(extent([3.0, f64::NAN, -1.0]), (-1.0, 3.0));
        let strict = extent_strict([3.0, f64::NAN]);
        assert!(strict.0.is_nan() && strict.1.is_nan());
    }
}
