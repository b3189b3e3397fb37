//! Bitrate budget for hitting a target file size.
//!
//! File sizes are measured in binary mebibytes while ffmpeg bitrates are
//! decimal kilobits per second, so one MB of budget is
//! `1024 * 1024 * 8 / 1000` kbit.

pub const KBITS_PER_MB: f64 = 1024.0 * 1024.0 * 8.0 / 1000.0;

/// Lowest video bitrate ever requested from the encoder.
pub const MIN_VIDEO_KBPS: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitratePlan {
    pub total_kbps: f64,
    pub video_kbps: f64,
    pub buffer_kbps: u64,
}

impl BitratePlan {
    pub fn zero() -> Self {
        BitratePlan {
            total_kbps: 0.0,
            video_kbps: 0.0,
            buffer_kbps: 0,
        }
    }

    /// Never fails; a non-positive (or NaN) duration yields the zero plan,
    /// which callers must reject via [`BitratePlan::is_viable`].
    pub fn compute(duration_secs: f64, target_mb: f64, audio_kbps: f64) -> Self {
        if !(duration_secs > 0.0) {
            return BitratePlan::zero();
        }

        let total_kbps = target_mb * KBITS_PER_MB / duration_secs;
        let video_kbps = (total_kbps - audio_kbps).max(MIN_VIDEO_KBPS);

        BitratePlan {
            total_kbps,
            video_kbps,
            buffer_kbps: (video_kbps * 2.0).ceil() as u64,
        }
    }

    /// False for a zero plan and for budgets too large to hand to ffmpeg.
    pub fn is_viable(&self) -> bool {
        self.total_kbps.is_finite() && self.total_kbps > 0.0
    }

    /// Video bitrate handed to the encoder, in whole kbps.
    pub fn video_kbps_rounded(&self) -> u64 {
        self.video_kbps.round() as u64
    }

    pub fn total_kbps_display(&self) -> String {
        format!("{:.2}", self.total_kbps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_minute_clip() {
        let plan = BitratePlan::compute(120.0, 15.5, 96.0);
        assert!((plan.total_kbps - 1083.5285333).abs() < 1e-6);
        assert_eq!(plan.total_kbps_display(), "1083.53");
        assert_eq!(plan.video_kbps_rounded(), 988);
        assert_eq!(plan.buffer_kbps, 1976);
        assert!(plan.is_viable());
    }

    #[test]
    fn test_budget_near_654_kbps() {
        // 15.5 MB spread over ~198.64s leaves ~654.57 kbps in total
        let plan = BitratePlan::compute(198.64, 15.5, 96.0);
        assert_eq!(plan.total_kbps_display(), "654.57");
        assert_eq!(plan.video_kbps_rounded(), 559);
        assert_eq!(plan.buffer_kbps, 1118);
    }

    #[test]
    fn test_infinite_budget_not_viable() {
        let plan = BitratePlan::compute(120.0, 1e308, 96.0);
        assert!(plan.total_kbps.is_infinite());
        assert!(!plan.is_viable());

        let plan = BitratePlan::compute(f64::MIN_POSITIVE, 15.5, 96.0);
        assert!(!plan.is_viable());
    }

    #[test]
    fn test_total_follows_formula() {
        for (duration, target) in [(1.0, 1.0), (60.0, 15.5), (3600.0, 8.0), (0.5, 100.0)] {
            let plan = BitratePlan::compute(duration, target, 96.0);
            let expected = target * 8388.608 / duration;
            assert!((plan.total_kbps - expected).abs() < 1e-9 * expected.max(1.0));
        }
    }

    #[test]
    fn test_video_floor() {
        // 15.5 MB over an hour is ~36 kbps total, far below audio + floor
        let plan = BitratePlan::compute(3600.0, 15.5, 96.0);
        assert!(plan.total_kbps - 96.0 < MIN_VIDEO_KBPS);
        assert_eq!(plan.video_kbps, MIN_VIDEO_KBPS);
        assert_eq!(plan.video_kbps_rounded(), 200);
        assert_eq!(plan.buffer_kbps, 400);
    }

    #[test]
    fn test_floor_not_triggered_above_threshold() {
        let plan = BitratePlan::compute(10.0, 15.5, 96.0);
        assert!((plan.video_kbps - (plan.total_kbps - 96.0)).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_is_ceiled_double() {
        for duration in [7.0, 33.3, 120.0, 599.9, 1234.5] {
            let plan = BitratePlan::compute(duration, 15.5, 96.0);
            assert_eq!(plan.buffer_kbps as f64, (plan.video_kbps * 2.0).ceil());
            assert!(plan.buffer_kbps as f64 >= plan.video_kbps);
        }
    }

    #[test]
    fn test_degenerate_duration() {
        for duration in [0.0, -1.0, f64::NAN] {
            let plan = BitratePlan::compute(duration, 15.5, 96.0);
            assert_eq!(plan, BitratePlan::zero());
            assert!(!plan.is_viable());
        }
    }
}
