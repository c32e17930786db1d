// SPDX-License-Identifier: MIT

//! Tachometer math: pulse counts over a fixed window into shaft speed and
//! road speed.
//!
//! Works in `no_std` and does not allocate memory.

use core::f32::consts::PI;

/// One measurement window's worth of results.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Reading {
    /// Raw pulses counted in the window.
    pub pulses: u32,
    /// Shaft speed in revolutions per minute.
    pub rpm: f32,
    /// Road speed in miles per hour.
    pub mph: f32,
}

/// Converts window pulse counts into speed readings.
pub struct Tachometer {
    /// Sensor pulses per wheel revolution (markers on the rim).
    pulses_per_rev: u32,
    /// Window length in seconds.
    window_s: f32,
    /// Wheel circumference in feet.
    circumference_ft: f32,
}

impl Tachometer {
    /// Create a tachometer for a wheel of `diameter_ft` feet, sampled with
    /// `pulses_per_rev` markers over windows of `window_ms` milliseconds.
    pub fn new(pulses_per_rev: u32, window_ms: u32, diameter_ft: f32) -> Self {
        debug_assert!(pulses_per_rev > 0);
        debug_assert!(window_ms > 0);
        Self {
            pulses_per_rev: pulses_per_rev.max(1),
            window_s: window_ms.max(1) as f32 / 1000.0,
            circumference_ft: PI * diameter_ft,
        }
    }

    /// Convert one window's pulse count into a reading.
    ///
    /// Revolutions in the window are `pulses / pulses_per_rev`; RPM scales
    /// that by `60 / window`; road speed follows from the circumference:
    /// `mph = rpm * circumference_ft * 60 / 5280`.
    pub fn reading(&self, pulses: u32) -> Reading {
        let revs = pulses as f32 / self.pulses_per_rev as f32;
        let rpm = revs * 60.0 / self.window_s;
        let mph = rpm * self.circumference_ft * 60.0 / 5280.0;
        Reading { pulses, rpm, mph }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micromath::F32Ext;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn zero_pulses_is_standstill() {
        let tach = Tachometer::new(1, 1000, 0.479003);
        assert_eq!(tach.reading(0), Reading::default());
    }

    #[test]
    fn rpm_from_one_second_window() {
        let tach = Tachometer::new(1, 1000, 0.479003);
        let r = tach.reading(2);
        assert!(close(r.rpm, 120.0));
    }

    #[test]
    fn rpm_scales_with_window_and_ppr() {
        // Four markers, 500 ms window: 8 pulses = 2 revs per half second.
        let tach = Tachometer::new(4, 500, 1.0);
        let r = tach.reading(8);
        assert!(close(r.rpm, 240.0));
    }

    #[test]
    fn road_speed_follows_circumference() {
        // 0.479003 ft wheel at 120 rpm:
        // 120 * pi * 0.479003 * 60 / 5280 = 2.052 mph.
        let tach = Tachometer::new(1, 1000, 0.479003);
        let r = tach.reading(2);
        assert!(close(r.mph, 2.052));
    }
}
