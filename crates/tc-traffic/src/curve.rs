//! Time-of-day congestion.
//!
//! # Curves
//!
//! Two 24-entry tables give congestion intensity in `[0, 1]` per hour of
//! the day.  The factor for an instant is interpolated between the entry
//! for its hour and the entry for the next hour (wrapping 23 → 0 within the
//! same table), so 7:50 and 8:10 differ even though both are "peak".
//!
//! # Rush-hour transitions
//!
//! On weekdays the congestion *impact* is amplified around the morning and
//! evening peaks.  The multiplier ramps linearly up to its peak value while
//! traffic builds, holds through the peak, and ramps back down to 1.0 as it
//! clears:
//!
//! ```text
//!  1.45 ┤     ┌──────┐
//!       │    ╱        ╲                  ┌─────┐  1.40
//!  1.0  ┼───╯          ╲────────────────╱       ╲────
//!       6:30 7:15  8:30 9:00      15:45 16:30 18:00 18:30
//! ```

use tc_core::DepartureTime;

/// Monday–Friday congestion by hour.
pub const WEEKDAY_CURVE: [f64; 24] = [
    0.03, 0.02, 0.02, 0.02, 0.05, 0.15, // 00–05
    0.45, 0.85, 1.00, 0.70, 0.25, 0.15, // 06–11
    0.20, 0.15, 0.10, 0.35, 0.80, 1.00, // 12–17
    0.85, 0.45, 0.20, 0.10, 0.05, 0.03, // 18–23
];

/// Saturday and Sunday congestion by hour.
pub const WEEKEND_CURVE: [f64; 24] = [
    0.10, 0.08, 0.05, 0.05, 0.05, 0.05, // 00–05
    0.10, 0.20, 0.30, 0.45, 0.55, 0.60, // 06–11
    0.60, 0.55, 0.50, 0.45, 0.45, 0.40, // 12–17
    0.35, 0.30, 0.25, 0.20, 0.15, 0.10, // 18–23
];

const FRIDAY_BONUS: f64 = 0.1;
const FRIDAY_FROM_HOUR: u32 = 15;
const FRIDAY_TO_HOUR: u32 = 19;

/// Congestion intensity in `[0, 1]` at `t`.
pub fn time_factor(t: DepartureTime) -> f64 {
    let curve = if t.is_weekend() { &WEEKEND_CURVE } else { &WEEKDAY_CURVE };
    let h = t.hour() as usize;
    let frac = t.minute() as f64 / 60.0;
    let factor = curve[h] + (curve[(h + 1) % 24] - curve[h]) * frac;

    if t.is_friday() && (FRIDAY_FROM_HOUR..=FRIDAY_TO_HOUR).contains(&t.hour()) {
        (factor + FRIDAY_BONUS).min(1.0)
    } else {
        factor
    }
}

/// One rush-hour window as fractional hours of the day.
#[derive(Copy, Clone, Debug)]
struct PeakRamp {
    start:      f64,
    full:       f64,
    hold_until: f64,
    end:        f64,
    peak:       f64,
}

impl PeakRamp {
    fn multiplier(&self, f: f64) -> Option<f64> {
        if f < self.start || f >= self.end {
            None
        } else if f < self.full {
            Some(1.0 + (self.peak - 1.0) * (f - self.start) / (self.full - self.start))
        } else if f <= self.hold_until {
            Some(self.peak)
        } else {
            Some(self.peak - (self.peak - 1.0) * (f - self.hold_until) / (self.end - self.hold_until))
        }
    }
}

const MORNING: PeakRamp = PeakRamp { start: 6.5, full: 7.25, hold_until: 8.5, end: 9.0, peak: 1.45 };
const EVENING: PeakRamp = PeakRamp { start: 15.75, full: 16.5, hold_until: 18.0, end: 18.5, peak: 1.40 };

/// Amplification of congestion impact at `t`; 1.0 outside the weekday
/// rush-hour windows.
pub fn transition_multiplier(t: DepartureTime) -> f64 {
    if t.is_weekend() {
        return 1.0;
    }
    let f = t.fractional_hour();
    MORNING
        .multiplier(f)
        .or_else(|| EVENING.multiplier(f))
        .unwrap_or(1.0)
}
