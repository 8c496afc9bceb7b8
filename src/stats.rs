/// Streaming accumulator over timing samples.
///
/// Only the count, sum and sum of squares are retained, so the variance is
/// derived from them and clamped at zero to absorb rounding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStatistics {
    max: f64,
    min: f64,
    samples: usize,
    sum: f64,
    sum_of_squares: f64,
}

impl SampleStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, v: f64) {
        if self.samples == 0 {
            self.min = v;
            self.max = v;
        } else if self.min > v {
            self.min = v;
        } else if self.max < v {
            self.max = v;
        }

        self.samples += 1;
        self.sum += v;
        self.sum_of_squares += v * v;
    }

    pub fn count(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// NaN until the first sample arrives.
    pub fn mean(&self) -> f64 {
        if self.samples > 0 {
            self.sum / self.samples as f64
        } else {
            std::f64::NAN
        }
    }

    /// Bessel-corrected sample variance. Zero for fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.samples < 2 {
            return 0.0;
        }

        let n = self.samples as f64;
        let numerator = self.sum_of_squares - self.sum * self.sum / n;

        if numerator < 0.0 {
            0.0
        } else {
            numerator / (n - 1.0)
        }
    }

    pub fn deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Deviation as a fraction of the mean.
    pub fn relative_deviation(&self) -> f64 {
        let mean = self.mean();

        if mean > 0.0 {
            self.deviation() / mean
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    fn collect(samples: &[f64]) -> SampleStatistics {
        let mut s = SampleStatistics::new();

        for &v in samples {
            s.put(v);
        }

        s
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn stats_0() {
        let s = SampleStatistics::new();

        assert!(s.is_empty());
        assert!(s.mean().is_nan());
        assert_eq!(s.variance(), 0.0);
        assert_eq!(s.relative_deviation(), 0.0);
    }

    #[test]
    fn stats_1() {
        let s = collect(&[0.25]);

        assert_eq!(s.count(), 1);
        assert_eq!(s.mean(), 0.25);
        assert_eq!(s.variance(), 0.0);
        assert_eq!(s.deviation(), 0.0);
        assert_eq!(s.relative_deviation(), 0.0);
    }

    #[test]
    fn stats_2() {
        let s = collect(&[-1.0, 1.0]);

        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.variance(), 2.0);
        assert_eq!(s.deviation(), 2.0_f64.sqrt());
    }

    #[test]
    fn stats_3() {
        let s = collect(&[89.0, 90.0, 91.0]);

        assert_eq!(s.mean(), 90.0);
        assert_eq!(s.variance(), 1.0);
        assert_eq!(s.deviation(), 1.0);
        assert_eq!(s.min(), 89.0);
        assert_eq!(s.max(), 91.0);
    }

    #[test]
    fn stats_8() {
        let s = collect(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert_eq!(s.mean(), 5.0);
        assert!(close(s.variance(), 32.0 / 7.0));
        assert!((s.deviation() - 2.138).abs() < 1e-3);
    }

    #[test]
    fn stats_9() {
        let s = collect(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 7.0, 9.0]);

        assert_eq!(s.mean(), 5.0);
        assert_eq!(s.variance(), 4.0);
        assert_eq!(s.deviation(), 2.0);
        assert_eq!(s.relative_deviation(), 0.4);
    }

    #[test]
    fn identical_samples_never_go_negative() {
        let s = collect(&[0.1; 9]);

        assert!(s.variance() >= 0.0);
        assert!(s.variance() < 1e-12);
        assert!(!s.deviation().is_nan());
    }

    #[test]
    fn min_and_max_follow_samples() {
        let s = collect(&[3.0, 1.0, 2.0, 5.0, 4.0]);

        assert_eq!(s.min(), 1.0);
        assert_eq!(s.max(), 5.0);
    }
}
