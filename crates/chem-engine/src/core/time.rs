/// Fixed timestep accumulator.
/// Ensures simulation logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Relative slack when comparing accumulated time against a period, so
/// twenty additions of 1/60 still count as 1/3 of a second.
const PERIOD_SLACK: f32 = 1e-4;

/// Periodic timer driven by elapsed simulation time.
///
/// Fires at most once per `tick`; leftover time carries into the next period.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true when a full period has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.period <= 0.0 {
            return true;
        }
        self.elapsed += dt;
        if self.elapsed + self.period * PERIOD_SLACK < self.period {
            return false;
        }
        self.elapsed = (self.elapsed - self.period).max(0.0) % self.period;
        true
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0);
        assert_eq!(steps, 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!(a >= 0.0 && a <= 1.0, "alpha was {}", a);
    }

    #[test]
    fn interval_fires_on_twentieth_tick() {
        let dt = 1.0 / 60.0;
        let mut interval = Interval::new(20.0 / 60.0);
        let fired: Vec<usize> = (1..=60).filter(|_| interval.tick(dt)).collect();
        assert_eq!(fired, vec![20, 40, 60]);
    }

    #[test]
    fn interval_fires_once_for_oversized_step() {
        let mut interval = Interval::new(1.0);
        assert!(interval.tick(3.5));
        assert!(!interval.tick(0.1));
    }

    #[test]
    fn zero_period_fires_every_tick() {
        let mut interval = Interval::new(0.0);
        assert!(interval.tick(0.001));
        assert!(interval.tick(0.001));
    }
}
