use std::f32::consts::PI;

use super::geometry::{Rgb, Vec2};

/// Below this travel distance a move completes without animating.
const MIN_TRAVEL_DISTANCE: f32 = 1e-3;

/// Speed factor over the course of a move: slow at both ends, fastest in
/// the middle. Never drops below ~0.385, so every move terminates.
pub fn speed_modulation(progress: f32) -> f32 {
    (0.1 * PI + progress * PI * 0.8).sin() * 0.6 + 0.2
}

/// A meeple carried from its current spot to a board field, lifted along an
/// arc like a hand picking it up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveAnimation {
    start: Vec2,
    target: Vec2,
    distance: f32,
    lift_divisor: f32,
    progress: f32,
}

impl MoveAnimation {
    /// `lift_divisor` scales the arc height: peak lift is
    /// `distance / lift_divisor`.
    pub fn new(start: Vec2, target: Vec2, lift_divisor: f32) -> Self {
        MoveAnimation {
            start,
            target,
            distance: start.distance(target),
            lift_divisor: lift_divisor.max(f32::EPSILON),
            progress: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance by `elapsed` seconds at `speed` units per second and return
    /// the meeple's new position.
    pub fn advance(&mut self, speed: f32, elapsed: f32) -> Vec2 {
        if self.distance < MIN_TRAVEL_DISTANCE {
            self.progress = 1.0;
        } else {
            let m = speed_modulation(self.progress);
            self.progress += speed * elapsed / self.distance * m * m;
        }
        self.position()
    }

    /// Current position, including the lift
    pub fn position(&self) -> Vec2 {
        let t = self.progress.min(1.0);
        let mut position = self.start.lerp(self.target, t);
        position.y -= (t * PI).sin() * self.distance / self.lift_divisor;
        position
    }
}

/// Cycles a glow color through the hue circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowAnimation {
    hue: f32,
    degrees_per_second: f32,
}

impl RainbowAnimation {
    pub fn new(degrees_per_second: f32, offset_degrees: f32) -> Self {
        RainbowAnimation {
            hue: offset_degrees.rem_euclid(360.0),
            degrees_per_second,
        }
    }

    pub fn animate(&mut self, elapsed: f32) {
        self.hue = (self.hue + self.degrees_per_second * elapsed).rem_euclid(360.0);
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn color(&self) -> Rgb {
        hue_to_rgb(self.hue)
    }
}

/// Fully saturated, full-value HSV color for `hue` in degrees.
fn hue_to_rgb(hue: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |v: f32| (v * 255.0).round() as u8;
    Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_modulation_is_slow_at_ends() {
        let start = speed_modulation(0.0);
        let middle = speed_modulation(0.5);
        let end = speed_modulation(1.0);
        assert!(middle > start);
        assert!(middle > end);
        assert!((start - end).abs() < 1e-5);
        assert!(start > 0.38);
    }

    #[test]
    fn test_move_reaches_target_in_finite_frames() {
        let start = Vec2::new(2.0, 3.0);
        let target = Vec2::new(40.0, 12.0);
        let mut anim = MoveAnimation::new(start, target, 8.0);
        let mut frames = 0;
        while !anim.is_finished() {
            anim.advance(60.0, 1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        assert!(frames > 1);
        let end = anim.position();
        assert!((end.x - target.x).abs() < 1e-3);
        assert!((end.y - target.y).abs() < 1e-3);
    }

    #[test]
    fn test_move_lifts_in_the_middle() {
        let start = Vec2::new(0.0, 10.0);
        let target = Vec2::new(20.0, 10.0);
        let mut anim = MoveAnimation::new(start, target, 5.0);
        let mut lifted = false;
        while !anim.is_finished() {
            let p = anim.advance(30.0, 0.05);
            if !anim.is_finished() && p.y < 10.0 - 1.0 {
                lifted = true;
            }
        }
        assert!(lifted);
    }

    #[test]
    fn test_zero_distance_move_finishes_immediately() {
        let p = Vec2::new(5.0, 5.0);
        let mut anim = MoveAnimation::new(p, p, 8.0);
        assert_eq!(anim.advance(60.0, 0.0), p);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_rainbow_cycles() {
        let mut anim = RainbowAnimation::new(180.0, 20.0);
        assert!((anim.hue() - 20.0).abs() < 1e-5);
        anim.animate(2.0);
        assert!((anim.hue() - 20.0).abs() < 1e-3);
        assert_eq!(RainbowAnimation::new(0.0, 0.0).color(), Rgb(255, 0, 0));
        assert_eq!(RainbowAnimation::new(0.0, 120.0).color(), Rgb(0, 255, 0));
        assert_eq!(RainbowAnimation::new(0.0, 240.0).color(), Rgb(0, 0, 255));
    }
}
