mod context;
mod controller;
mod countdown;

pub use context::{ExecutionContext, Phase, WorkoutDefinition};
pub use controller::{PhaseController, Snapshot};
pub use countdown::{Countdown, TICK_MS};

/// Render a second count as `MM:SS.CC`, clipped at zero.
pub fn format_clock(total_seconds: f64) -> String {
    let clipped = total_seconds.max(0.0);
    let minutes = (clipped / 60.0).floor() as u64;
    let seconds = (clipped % 60.0).floor() as u64;
    let centis = ((clipped % 1.0) * 100.0).floor() as u64;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::format_clock;

    #[test]
    fn formats_minutes_seconds_and_centiseconds() {
        assert_eq!(format_clock(0.0), "00:00.00");
        assert_eq!(format_clock(5.25), "00:05.25");
        assert_eq!(format_clock(65.0), "01:05.00");
        assert_eq!(format_clock(600.99), "10:00.99");
    }

    #[test]
    fn clips_negative_values_to_zero() {
        assert_eq!(format_clock(-3.0), "00:00.00");
    }
}
