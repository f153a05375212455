use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval of seconds (or any float quantity) sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const ZERO: FloatRange = FloatRange { min: 0.0, max: 0.0 };

    pub fn new(min: f32, max: f32) -> Self {
        FloatRange { min, max }
    }

    pub fn fixed(value: f32) -> Self {
        FloatRange {
            min: value,
            max: value,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        FloatRange::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_range_samples_value() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(FloatRange::fixed(0.75).sample(&mut rng), 0.75);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let range = FloatRange::new(0.5, 1.5);
        for _ in 0..100 {
            let v = range.sample(&mut rng);
            assert!((0.5..=1.5).contains(&v));
        }
    }

    #[test]
    fn test_validity() {
        assert!(FloatRange::new(0.0, 1.0).is_valid());
        assert!(!FloatRange::new(1.0, 0.5).is_valid());
        assert!(!FloatRange::new(-0.1, 0.5).is_valid());
    }
}
