/// Piecewise linear interpolation of `(xp, fp)` at each of `x`.
/// `xp` must be increasing and non-empty. Points outside `xp` clamp to the
/// first or last sample instead of extrapolating.
pub(crate) fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    debug_assert!(!xp.is_empty() && xp.len() == fp.len());
    let last = xp.len() - 1;

    x.iter()
        .map(|&t| {
            if t <= xp[0] {
                return fp[0];
            }
            if t >= xp[last] {
                return fp[last];
            }
            // first index with xp[j] > t, so xp[j - 1] <= t < xp[j]
            let j = xp.partition_point(|&v| v <= t);
            let (x0, x1) = (xp[j - 1], xp[j]);
            let (y0, y1) = (fp[j - 1], fp[j]);
            y0 + (t - x0) * (y1 - y0) / (x1 - x0)
        })
        .collect()
}

/// Incremental angle unwrapping in DEGREES.
///
/// Whenever two consecutive raw angles differ by more than 180 degrees the
/// accumulated offset moves by 360 against the jump, and the offset is added
/// to this and every following sample.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct AngleUnwrapper {
    previous_raw: Option<f64>,
    offset: f64,
}

impl AngleUnwrapper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, raw: f64) -> f64 {
        if let Some(previous) = self.previous_raw {
            let diff = raw - previous;
            if diff.abs() > 180.0 {
                self.offset += if diff > 0.0 { -360.0 } else { 360.0 };
            }
        }
        self.previous_raw = Some(raw);
        raw + self.offset
    }
}

pub(crate) fn unwrap_degrees(angles: &[f64]) -> Vec<f64> {
    let mut unwrapper = AngleUnwrapper::new();
    angles.iter().map(|&a| unwrapper.push(a)).collect()
}

/// Map an angle in DEGREES into [0, 360).
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
