use std::fmt;
use std::time::Instant;

use orrery::time::{TickSchedule, TimeStats};
use orrery::universe::{StepError, Universe, UniverseStepInfo};
use orrery::util::{Fmt, Refmt as _, StatusText};

/// Number of ticks simulated when neither a tick count nor a duration is given.
pub const DEFAULT_TICKS: u64 = 60;

/// Results of [`simulate()`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct SimulationReport {
    /// Statistics from every step.
    pub info: UniverseStepInfo,
    /// Real time taken by each step.
    pub step_time: TimeStats,
}

impl Fmt<StatusText> for SimulationReport {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &StatusText) -> fmt::Result {
        write!(
            fmt,
            "{}\nStep time: {}",
            self.info.refmt(fopt),
            self.step_time
        )
    }
}

/// Steps `universe` `ticks` times.
///
/// # Errors
///
/// Stops at and returns the first error from [`Universe::step()`]; the universe is left
/// as it was at that point.
pub fn simulate(universe: &mut Universe, ticks: u64) -> Result<SimulationReport, StepError> {
    let mut report = SimulationReport::default();
    for _ in 0..ticks {
        let start_time = Instant::now();
        report.info += universe.step(false)?;
        report.step_time += TimeStats::one(start_time.elapsed());
    }
    Ok(report)
}

/// Returns the number of ticks of `schedule` needed to cover at least `seconds` of
/// simulated time.
pub fn ticks_for_duration(schedule: TickSchedule, seconds: f64) -> u64 {
    let ticks = (seconds / schedule.delta_t_f64()).ceil();
    if ticks.is_nan() || ticks <= 0.0 {
        0
    } else {
        // Saturating conversion.
        ticks as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::physics::Body;
    use orrery::scene::Scene;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_to_ticks() {
        let schedule = TickSchedule::per_second(60);
        assert_eq!(ticks_for_duration(schedule, 1.0), 60);
        assert_eq!(ticks_for_duration(schedule, 0.01), 1);
        assert_eq!(ticks_for_duration(schedule, 0.0), 0);
        assert_eq!(ticks_for_duration(schedule, -5.0), 0);
        assert_eq!(ticks_for_duration(schedule, f64::NAN), 0);
        assert_eq!(ticks_for_duration(TickSchedule::per_second(4), 1.1), 5);
    }

    #[test]
    fn simulate_counts_ticks() {
        let mut universe = Universe::new();
        let mut scene = Scene::default();
        scene.insert(Body::new_minimal([0.0, 0.0, 0.0], 1.0));
        universe.insert("s", scene);

        let report = simulate(&mut universe, 30).unwrap();
        assert_eq!(report.info.ticks, 30);
        assert_eq!(report.info.scenes.stepped, 30);
        assert_eq!(report.step_time.count, 30);
        assert_eq!(universe.clock().phase(), 30);
    }
}
