/// Ease-out cubic timing curve `1 - (1 - t)^3`.
///
/// Starts fast and decelerates into the landing position. `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
