//! Virtual-drive resampling.
//!
//! Converts a route polyline into a uniformly time-spaced pose stream at a
//! target ground speed and sampling frequency.  The walk preserves
//! arc-length continuity across polyline vertices: whatever fraction of the
//! inter-sample distance `d = speed/freq` is left over at a vertex is
//! carried into the next segment before the next emission.
//!
//! Per segment with length ℓ and carry `c`:
//! - `c > ℓ` — the segment is consumed whole (`c -= ℓ`), nothing emitted.
//! - otherwise the first sample sits at parameter `c/ℓ`, further samples at
//!   arc distances `k·d` from it while `k·d ≤ remaining` (the geodesic
//!   distance from the first sample to the segment end), and the new carry
//!   is `(K+1)·d − remaining` for the last emitted index `K`.
//!
//! Timestamps form the grid `epoch + i/freq`; the configured speed is
//! stored verbatim on every sample.

use eh_core::Waypoint;

use crate::error::RouteResult;
use crate::route::Route;
use crate::sample::{DriveConfig, DriveSample};

/// Lazy pull iterator yielding the virtual drive over one route.
///
/// Constant-memory: only the state of the segment currently being walked
/// is held, so long drives stream without materializing.
pub struct DriveSampler<'r> {
    route: &'r Route,
    step_m: f64,
    speed_m_s: f64,
    freq_hz: f64,
    epoch_s: f64,

    /// Index of the segment's start vertex currently being consumed.
    seg: usize,
    /// Metres into the next segment before the next emission.
    carry_m: f64,
    /// Samples emitted so far; drives the timestamp grid.
    emitted: usize,
    /// Emission state of the active segment, if any.
    current: Option<SegmentRun>,
}

/// In-progress emission over one polyline segment.
struct SegmentRun {
    /// First emitted point on this segment.
    origin: Waypoint,
    /// Segment end vertex.
    end: Waypoint,
    /// Geodesic distance from `origin` to `end`.
    remaining_m: f64,
    /// Number of whole steps of `step_m` that fit in `remaining_m`.
    num_steps: usize,
    /// 0 emits `origin`; `1..=num_steps` emit interpolated steps.
    next_step: usize,
}

impl<'r> DriveSampler<'r> {
    /// Validate `config` and position the sampler at the route start.
    pub fn new(route: &'r Route, config: &DriveConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self {
            route,
            step_m: config.step_m(),
            speed_m_s: config.speed_m_s,
            freq_hz: config.freq_hz,
            epoch_s: config.epoch_s,
            seg: 0,
            carry_m: 0.0,
            emitted: 0,
            current: None,
        })
    }
}

impl Iterator for DriveSampler<'_> {
    type Item = DriveSample;

    fn next(&mut self) -> Option<DriveSample> {
        loop {
            // ── Emit from the active segment, if one is in progress ───────
            if let Some(run) = self.current.as_mut() {
                if run.next_step == 0 {
                    run.next_step = 1;
                    let position = run.origin;
                    let i = self.emitted;
                    self.emitted += 1;
                    return Some(DriveSample {
                        timestamp_s: self.epoch_s + i as f64 / self.freq_hz,
                        position,
                        speed_m_s: self.speed_m_s,
                    });
                }

                if run.next_step <= run.num_steps {
                    let d = run.next_step as f64 * self.step_m;
                    run.next_step += 1;
                    // `d ≤ remaining` by construction; clamp shields the
                    // final step from multiplication round-up.
                    let position = run.origin.lerp(run.end, (d / run.remaining_m).min(1.0));
                    let i = self.emitted;
                    self.emitted += 1;
                    return Some(DriveSample {
                        timestamp_s: self.epoch_s + i as f64 / self.freq_hz,
                        position,
                        speed_m_s: self.speed_m_s,
                    });
                }

                // Segment exhausted: the shortfall to cover before the next
                // emission continues into the following segment.
                self.carry_m = (run.num_steps as f64 + 1.0) * self.step_m - run.remaining_m;
                self.seg += 1;
                self.current = None;
                continue;
            }

            // ── Advance to the next segment ───────────────────────────────
            let vertices = self.route.vertices();
            if self.seg + 1 >= vertices.len() {
                return None;
            }

            let start = vertices[self.seg];
            let end = vertices[self.seg + 1];
            let length_m = start.geodesic_m(end);

            // Zero-length segments contribute no arc; skip without
            // touching the carry.
            if length_m <= 0.0 {
                self.seg += 1;
                continue;
            }

            if self.carry_m > length_m {
                self.carry_m -= length_m;
                self.seg += 1;
                continue;
            }

            let origin = start.lerp(end, self.carry_m / length_m);
            let remaining_m = origin.geodesic_m(end);
            let num_steps = if remaining_m > 0.0 {
                (remaining_m / self.step_m).floor() as usize
            } else {
                0
            };

            self.current = Some(SegmentRun {
                origin,
                end,
                remaining_m,
                num_steps,
                next_step: 0,
            });
        }
    }
}
