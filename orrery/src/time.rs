//! Data types for simulated and real time.

use core::fmt;
use core::num::NonZeroU16;

use crate::math::PositiveSign;

#[cfg(doc)]
use crate::universe::Universe;

// -------------------------------------------------------------------------------------------------

#[doc(inline)]
pub use orrery_base::time::*;

/// Numeric type for the phase of a [`Clock`].
pub type Phase = u16;

/// Specifies an amount of time passing in a [`Universe`] and its scenes.
///
/// [`Tick`] values are passed along through the `step()` operations that advance time.
/// They are produced by a [`Clock`] which has a [`TickSchedule`], and the clock generates
/// distinct but eventually repeating ticks based on its *phase*.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tick {
    /// Schedule from which this tick was derived, which also determines its length.
    schedule: TickSchedule,

    /// The phase of the clock *before* this tick happens.
    /// (After this tick happens, the phase is this value plus 1.)
    prev_phase: Phase,

    /// Whether simulated time is paused. See [`Self::paused()`] for details.
    paused: bool,
}

impl Tick {
    fn new(schedule: TickSchedule, prev_phase: Phase) -> Self {
        Self {
            schedule,
            prev_phase,
            paused: false,
        }
    }

    /// Construct a non-paused [`Tick`] from a duration expressed in fractional seconds,
    /// and phase 0 as if it were the first tick in a universe.
    ///
    /// Negative and NaN durations are treated as zero.
    ///
    /// This should only be used for tests.
    pub fn from_seconds(dt: f64) -> Self {
        Self {
            schedule: TickSchedule {
                base_duration: Duration::try_from_secs_f64(dt).unwrap_or(Duration::ZERO),
                divisor: NonZeroU16::MIN,
            },
            prev_phase: 0,
            paused: false,
        }
    }

    /// Returns the amount of time passed, as a [`Duration`].
    ///
    /// This is rounded to the nearest nanosecond; prefer [`Self::delta_t_f64()`] for
    /// simulation.
    pub fn delta_t_duration(self) -> Duration {
        self.schedule.delta_t()
    }

    /// Returns the amount of time passed, as a restricted floating-point number of seconds.
    pub fn delta_t_ps64(self) -> PositiveSign<f64> {
        PositiveSign::<f64>::new_clamped(self.schedule.delta_t_f64())
    }

    /// Returns the amount of time passed, as a floating-point number of seconds.
    ///
    /// For a schedule of [`TickSchedule::per_second(n)`](TickSchedule::per_second), this is
    /// exactly `1.0 / n`.
    pub fn delta_t_f64(self) -> f64 {
        self.delta_t_ps64().into_inner()
    }

    /// Returns the schedule this tick was produced from.
    pub fn schedule(self) -> TickSchedule {
        self.schedule
    }

    /// Returns the phase of the originating clock *before* this tick happens.
    /// (After this tick happens, the phase is this value plus 1, wrapped.)
    pub fn prev_phase(self) -> Phase {
        self.prev_phase
    }

    /// Returns the phase of the originating clock *after* this tick happens.
    /// (Before this tick happens, the phase is this value minus 1, wrapped.)
    pub fn next_phase(self) -> Phase {
        // Widen to avoid overflow when the divisor is `u16::MAX`.
        let next = (u32::from(self.prev_phase) + 1) % u32::from(self.schedule.divisor.get());
        Phase::try_from(next).unwrap_or(0)
    }

    /// Set the paused flag. See [`Tick::paused`] for more information.
    #[must_use]
    pub fn pause(self) -> Self {
        Self {
            paused: true,
            ..self
        }
    }

    /// Returns the "paused" state of this Tick. If true, then step operations should
    /// not perform any changes that reflect simulated time passing: bodies do not fall or
    /// move, and overlaps are left for the next unpaused tick.
    pub fn paused(&self) -> bool {
        self.paused
    }
}

// -------------------------------------------------------------------------------------------------

/// Defines how time passes in a [`Universe`].
///
/// Specifically, it defines a base real-time duration (for example, it could be 1 second),
/// and a divisor with which to subdivide this duration into individual [`Tick`]s.
///
/// The only information about time which needs to be persistently stored is then the
/// _phase_ of the clock, that is, how many ticks have elapsed since the last whole base
/// duration.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TickSchedule {
    base_duration: Duration,
    divisor: NonZeroU16,
}

impl TickSchedule {
    /// Construct a [`TickSchedule`] which specifies `divisor` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub const fn per_second(divisor: u16) -> Self {
        Self {
            base_duration: Duration::from_secs(1),
            divisor: match NonZeroU16::new(divisor) {
                Some(x) => x,
                None => panic!("divisor must be nonzero"),
            },
        }
    }

    /// Construct a [`TickSchedule`] which divides `base_duration` into `divisor` ticks.
    pub const fn new(base_duration: Duration, divisor: NonZeroU16) -> Self {
        Self {
            base_duration,
            divisor,
        }
    }

    /// Returns the base duration which is divided into ticks.
    pub fn base_duration(&self) -> Duration {
        self.base_duration
    }

    /// Returns the number of ticks per [base duration](Self::base_duration).
    pub fn divisor(&self) -> NonZeroU16 {
        self.divisor
    }

    /// Returns the length of a [`Tick`] in this schedule, rounded to whole nanoseconds.
    pub fn delta_t(&self) -> Duration {
        self.base_duration / u32::from(self.divisor.get())
    }

    /// Returns the length of a [`Tick`] in this schedule, in seconds.
    ///
    /// Unlike [`Self::delta_t()`], this does not round to nanoseconds, so
    /// `TickSchedule::per_second(60).delta_t_f64() == 1.0 / 60.0`.
    pub fn delta_t_f64(&self) -> f64 {
        self.base_duration.as_secs_f64() / f64::from(self.divisor.get())
    }
}

impl Default for TickSchedule {
    /// 60 ticks per second.
    fn default() -> Self {
        Self::per_second(60)
    }
}

impl fmt::Debug for TickSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TickSchedule {
            base_duration,
            divisor,
        } = *self;
        write!(f, "TickSchedule({base_duration:?} / {divisor})")
    }
}

// -------------------------------------------------------------------------------------------------

/// Defines the passage of time in a [`Universe`].
///
/// See [`TickSchedule`] for details on what is possible and why.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Clock {
    schedule: TickSchedule,

    /// Specifies how the current instant relates to the schedule.
    ///
    /// * It should always be the case that `phase < schedule.divisor`.
    /// * The initial phase, such as for a universe that has just been been created but
    ///   not yet stepped, is `0`.
    phase: Phase,
}

impl Clock {
    /// Creates a new [`Clock`] with the given state.
    ///
    /// If the `phase` is out of range, it is reduced modulo `schedule.divisor`.
    pub const fn new(schedule: TickSchedule, phase: Phase) -> Self {
        Self {
            schedule,
            phase: phase % schedule.divisor.get(),
        }
    }

    /// Returns the schedule which this clock obeys.
    pub fn schedule(&self) -> TickSchedule {
        self.schedule
    }

    /// Returns the current phase of this clock.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// If `paused` is false, advances this clock to the next instant (as defined by
    /// the schedule) and returns the [`Tick`] defining the transition between those
    /// instants.
    ///
    /// If `paused` is true, returns a paused [`Tick`] for the current instant.
    /// See [`Tick::paused`] for information on the meaning of pausing.
    pub fn advance(&mut self, paused: bool) -> Tick {
        let tick = self.next_tick(paused);
        if !paused {
            self.phase = tick.next_phase();
        }
        tick
    }

    /// Returns the tick that will happen the next time [`Self::advance()`] is called,
    /// if the schedule is not changed before then.
    pub fn next_tick(&self, paused: bool) -> Tick {
        let mut tick = Tick::new(self.schedule, self.phase);

        if paused {
            tick = tick.pause();
        }

        tick
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Clock {
            schedule:
                TickSchedule {
                    base_duration,
                    divisor,
                },
            phase,
        } = *self;
        write!(f, "Clock({phase}/{divisor} of {base_duration:?})")
    }
}

// -------------------------------------------------------------------------------------------------
