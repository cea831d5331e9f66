/// Elapsed-time accumulator driven by `requestAnimationFrame` timestamps.
///
/// Timestamps are in milliseconds; `time` and `dt` are in seconds. The start
/// timestamp is the first one seen, so the first frame always has `dt == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    start_ms: Option<f64>,
    time: f64,
    dt: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the frame stamped `now_ms` and return the new `dt`.
    ///
    /// With `resync` set (the page just became visible again) the start
    /// timestamp is shifted so that the time spent hidden is skipped and
    /// `time` carries on from where it stopped.
    pub fn tick(&mut self, now_ms: f64, resync: bool) -> f64 {
        let mut start = *self.start_ms.get_or_insert(now_ms);
        if resync {
            start = now_ms - self.time * 1000.0;
            self.start_ms = Some(start);
        }
        self.dt = (now_ms - start) / 1000.0 - self.time;
        self.time += self.dt;
        self.dt
    }

    /// Seconds since the first frame, excluding time skipped by resyncs.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Seconds between the previous frame and this one.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_first_frame_dt_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12345.6, false), 0.0);
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn test_accumulates_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0, false);
        let dt = clock.tick(1016.0, false);
        assert!((dt - 0.016).abs() < EPS);
        clock.tick(1050.0, false);
        assert!((clock.dt() - 0.034).abs() < EPS);
        assert!((clock.time() - 0.050).abs() < EPS);
    }

    #[test]
    fn test_time_equals_sum_of_dts() {
        let mut clock = FrameClock::new();
        let mut sum = 0.0;
        for i in 0..120i32 {
            sum += clock.tick(500.0 + f64::from(i) * 16.7, false);
        }
        assert!((clock.time() - sum).abs() < 1e-6);
        assert!((clock.time() - 119.0 * 0.0167).abs() < 1e-6);
    }

    #[test]
    fn test_resync_skips_hidden_time() {
        let mut clock = FrameClock::new();
        clock.tick(0.0, false);
        clock.tick(100.0, false);
        let before = clock.time();

        // Tab hidden for a minute, then visible again.
        let dt = clock.tick(60_100.0, true);
        assert!(dt.abs() < EPS, "dt = {dt}");
        assert!((clock.time() - before).abs() < EPS);

        let dt = clock.tick(60_116.0, false);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_resync_on_first_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(250.0, true), 0.0);
        let dt = clock.tick(266.0, false);
        assert!((dt - 0.016).abs() < EPS);
    }

    #[test]
    fn test_without_resync_hidden_time_is_counted() {
        let mut clock = FrameClock::new();
        clock.tick(0.0, false);
        let dt = clock.tick(5_000.0, false);
        assert!((dt - 5.0).abs() < EPS);
    }
}
