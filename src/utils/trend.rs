/// Number of points in a trend series.
pub const TREND_POINTS: usize = 7;
const TREND_CEILING: f64 = 100.0;

/// Builds a placeholder trend series from a source of uniform `[0, 1)` samples.
///
/// Upstream trend numbers are not wired through yet, so every detail
/// answer carries one of these. Values fall in `0..100`.
pub fn synthetic_trend(mut sample: impl FnMut() -> f64) -> [u32; TREND_POINTS] {
    let mut series = [0u32; TREND_POINTS];
    for point in series.iter_mut() {
        *point = (sample().clamp(0.0, 1.0) * TREND_CEILING).floor().min(TREND_CEILING - 1.0) as u32;
    }
    series
}

/// Placeholder trending flag, a coin flip over one sample.
pub fn synthetic_trending(mut sample: impl FnMut() -> f64) -> bool {
    sample() >= 0.5
}

/// `Math.random()` from the JS runtime.
pub fn js_random() -> f64 {
    worker::js_sys::Math::random()
}
