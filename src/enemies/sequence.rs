//! Clocks and deadlines for the enemy's timed sequences.
//!
//! A timed sequence parks on a [`Deadline`] and resumes on the first tick at
//! which that deadline has passed. Two clocks exist because some waits must
//! keep running while the game is slowed or paused by a hit-pause (real time)
//! and others must not (simulation time).

/// Per-agent elapsed time on both clocks, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    pub real: f32,
    pub sim: f32,
}

impl Clock {
    /// Advance both clocks by one tick.
    pub fn advance(&mut self, real_delta: f32, sim_delta: f32) {
        self.real += real_delta.max(0.0);
        self.sim += sim_delta.max(0.0);
    }

    /// Deadline `secs` from now on the real clock.
    pub fn real_in(&self, secs: f32) -> Deadline {
        Deadline::Real(self.real + secs)
    }

    /// Deadline `secs` from now on the simulation clock.
    pub fn sim_in(&self, secs: f32) -> Deadline {
        Deadline::Sim(self.sim + secs)
    }
}

/// A point in time on one of the two clocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Deadline {
    Real(f32),
    Sim(f32),
}

impl Deadline {
    pub fn is_due(&self, clock: &Clock) -> bool {
        match *self {
            Deadline::Real(at) => clock.real >= at,
            Deadline::Sim(at) => clock.sim >= at,
        }
    }
}

/// Steps of the hurt sequence, each entered when the previous deadline passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HurtStep {
    /// Hurt animation restarted, waiting to start the hit-pause.
    WindUp,
    /// Hit-pause running, knockback follows.
    Paused,
    /// Knockback applied, velocity is zeroed next.
    Knockback,
}

/// A running hurt sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HurtSequence {
    pub step: HurtStep,
    pub resume_at: Deadline,
    /// +1 pushes the agent right, -1 left, `None` when the weapon was level with it.
    pub knockback_sign: Option<f32>,
}

/// Steps of the death sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeathStep {
    Collapsing,
    Lying,
}

/// A running death sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathSequence {
    pub step: DeathStep,
    pub resume_at: Deadline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_and_sim_deadlines_track_their_own_clock() {
        let mut clock = Clock::default();
        let real = clock.real_in(0.5);
        let sim = clock.sim_in(0.5);

        // Simulation frozen, real time running.
        clock.advance(0.6, 0.0);
        assert!(real.is_due(&clock));
        assert!(!sim.is_due(&clock));

        clock.advance(0.0, 0.5);
        assert!(sim.is_due(&clock));
    }

    #[test]
    fn negative_deltas_do_not_rewind() {
        let mut clock = Clock::default();
        clock.advance(1.0, 1.0);
        clock.advance(-5.0, -5.0);
        assert_eq!(clock, Clock { real: 1.0, sim: 1.0 });
    }
}
