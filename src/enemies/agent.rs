//! The enemy's behavior state machine.
//!
//! [`EnemyAgent`] owns everything the enemy decides for itself: where it
//! patrols, when it notices the player, when it attacks, how it reacts to a
//! sword hit, and the death/revive cycle. It never touches the ECS. Each tick
//! the host hands it a [`TickInput`] describing the world and applies the
//! returned [`AgentOutput`] to physics, animation and audio.

use bevy::log::debug;
use bevy::math::Vec2;
use bevy::prelude::{Component, Resource};

use super::sequence::{Clock, Deadline, DeathSequence, DeathStep, HurtSequence, HurtStep};
use super::tuning::AgentTuning;

/// Which way the sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Sign of the x direction this facing points along.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}

/// The mutually exclusive behavior modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Patrolling,
    Waiting,
    Chasing,
    Attacking,
    Hurt,
    Dead,
}

/// Horizontal extent of the walkable map.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct MapLimits {
    pub left: f32,
    pub right: f32,
}

impl MapLimits {
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
        }
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right)
    }

    /// Clamp a patrol path into the map, keeping `start <= end`.
    pub fn clamp_bounds(&self, start: f32, end: f32) -> (f32, f32) {
        let start = self.clamp_x(start);
        let end = end.clamp(start, self.right);
        (start, end)
    }
}

impl Default for MapLimits {
    fn default() -> Self {
        Self::new(-100.0, 100.0)
    }
}

/// A registered overlap with the player's armed weapon hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponContact {
    /// World x of the weapon's owner, used to pick the knockback side.
    pub owner_x: f32,
}

/// Everything the agent reads from the world for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Unscaled seconds since the previous tick.
    pub real_delta: f32,
    /// Scaled (game) seconds since the previous tick.
    pub sim_delta: f32,
    pub position: Vec2,
    pub player_position: Vec2,
    pub limits: MapLimits,
    /// At most one contact is reported per tick.
    pub weapon_contact: Option<WeaponContact>,
}

/// Named animation clips the agent can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationClipId {
    Idle,
    Walk,
    Attack,
    Hurt,
    Death,
    DeathIdle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationRequest {
    /// Set the looping locomotion clip to walk (true) or idle (false).
    Walk(bool),
    /// Fire a one-shot clip on top of the locomotion loop.
    Trigger(AnimationClipId),
    /// Reset the animation player, then play the clip from its first frame.
    Restart(AnimationClipId),
    /// Switch straight to a clip by name.
    Play(AnimationClipId),
}

/// Sound cues an enemy can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// One clip picked at random from the enemy's hurt clips.
    Hurt,
    Death,
    WakeLaugh,
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioRequest {
    /// Stop whatever the enemy is currently voicing.
    Stop,
    Play(AudioCue),
    /// Play a cue starting `offset` seconds into the clip.
    PlayFrom(AudioCue, f32),
}

/// Active flag of the player's weapon hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitboxCommand {
    Arm,
    Disarm,
}

/// Rigid body and collider state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyCommand {
    /// Static body, collider disabled.
    Freeze,
    /// Dynamic body, collider enabled.
    Release,
}

/// Notable transitions, forwarded by the host as game events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    AttackStarted,
    Hurt { health: u8 },
    Died,
    Revived,
}

/// What the host must apply after a tick.
///
/// For the `Option` fields the last write of the tick wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentOutput {
    pub position_delta: Vec2,
    pub facing: Facing,
    /// Overrides the body's linear velocity.
    pub linear_velocity: Option<Vec2>,
    /// Overrides the body's angular velocity.
    pub angular_velocity: Option<f32>,
    pub animations: Vec<AnimationRequest>,
    pub audio: Vec<AudioRequest>,
    pub hitbox: Option<HitboxCommand>,
    pub body: Option<BodyCommand>,
    /// Seconds of real time this enemy should visually freeze.
    pub hit_pause: Option<f32>,
    pub health_delta: i16,
    pub events: Vec<AgentEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Activity {
    Patrolling,
    Waiting { resume_at: Deadline },
    Chasing,
    Attacking { resume_at: Deadline },
    Hurt(HurtSequence),
    Dead(DeathSequence),
}

/// A single enemy's behavior state.
#[derive(Component, Clone, Debug)]
pub struct EnemyAgent {
    tuning: AgentTuning,
    position: Vec2,
    player_position: Vec2,
    facing: Facing,
    moving_right: bool,
    patrol_start: f32,
    patrol_end: f32,
    health: u8,
    in_range: bool,
    activity: Activity,
    clock: Clock,
    rearm_at: Option<Deadline>,
    pending_hit: Option<WeaponContact>,
    walking: Option<bool>,
    played_hurt_cue: bool,
    played_death_cue: bool,
    played_wake_laugh_cue: bool,
    out: AgentOutput,
}

impl EnemyAgent {
    /// Create an agent at its spawn point. The patrol path starts here and
    /// extends `patrol_width` to the right.
    pub fn new(position: Vec2, facing: Facing, tuning: AgentTuning) -> Self {
        let patrol_start = position.x;
        let patrol_end = position.x + tuning.patrol_width;
        let health = tuning.max_health;

        Self {
            tuning,
            position,
            player_position: position,
            facing,
            moving_right: true,
            patrol_start,
            patrol_end,
            health,
            in_range: false,
            activity: Activity::Patrolling,
            clock: Clock::default(),
            rearm_at: None,
            pending_hit: None,
            walking: None,
            played_hurt_cue: false,
            played_death_cue: false,
            played_wake_laugh_cue: false,
            out: AgentOutput {
                facing,
                ..Default::default()
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self.activity {
            Activity::Patrolling => Mode::Patrolling,
            Activity::Waiting { .. } => Mode::Waiting,
            Activity::Chasing => Mode::Chasing,
            Activity::Attacking { .. } => Mode::Attacking,
            Activity::Hurt(_) => Mode::Hurt,
            Activity::Dead(_) => Mode::Dead,
        }
    }

    pub fn tuning(&self) -> &AgentTuning {
        &self.tuning
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn patrol_bounds(&self) -> (f32, f32) {
        (self.patrol_start, self.patrol_end)
    }

    /// Movement speed implied by the current mode.
    pub fn speed(&self) -> f32 {
        match self.activity {
            Activity::Patrolling => self.tuning.patrol_speed,
            Activity::Chasing => self.tuning.chase_speed,
            _ => 0.0,
        }
    }

    /// Perception result of the last tick.
    pub fn in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.activity, Activity::Waiting { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.activity, Activity::Attacking { .. })
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.activity, Activity::Dead(_))
    }

    /// Whether the last known player position lies within the detection radius.
    pub fn is_player_in_range(&self) -> bool {
        self.position.distance(self.player_position) <= self.tuning.detection_radius
    }

    /// Turn around. Also cancels any spin the physics picked up.
    pub fn flip(&mut self) -> Facing {
        self.facing = self.facing.flipped();
        self.out.facing = self.facing;
        self.out.angular_velocity = Some(0.0);
        self.facing
    }

    /// Play the attack sound. Called by the host from the attack clip's sound frame.
    pub fn attack_sound(&mut self) {
        self.out.audio.push(AudioRequest::PlayFrom(
            AudioCue::Attack,
            self.tuning.attack_sound_offset,
        ));
    }

    /// Drain everything requested since the last drain.
    pub fn take_output(&mut self) -> AgentOutput {
        let facing = self.facing;
        let mut output = std::mem::take(&mut self.out);
        output.facing = facing;
        self.out.facing = facing;
        output
    }

    /// Advance the agent by one simulation tick.
    pub fn tick(&mut self, input: &TickInput) -> AgentOutput {
        self.clock.advance(input.real_delta, input.sim_delta);
        self.position = input.position;
        self.player_position = input.player_position;

        self.resume_due_sequences();

        let (start, end) = input
            .limits
            .clamp_bounds(self.patrol_start, self.patrol_end);
        self.patrol_start = start;
        self.patrol_end = end;

        self.update_perception();

        if matches!(
            self.activity,
            Activity::Patrolling | Activity::Chasing | Activity::Waiting { .. }
        ) {
            self.locomote(input);
        }

        if let Some(contact) = input.weapon_contact {
            self.register_hit(contact);
        }

        self.take_output()
    }

    fn resume_due_sequences(&mut self) {
        if let Some(rearm_at) = self.rearm_at {
            if rearm_at.is_due(&self.clock) {
                self.rearm_at = None;
                self.out.hitbox = Some(HitboxCommand::Arm);
            }
        }

        // Several steps can fall due in one long tick.
        loop {
            match self.activity {
                Activity::Waiting { resume_at } if resume_at.is_due(&self.clock) => {
                    self.activity = Activity::Patrolling;
                }
                Activity::Attacking { resume_at } if resume_at.is_due(&self.clock) => {
                    self.activity = Activity::Patrolling;
                    if let Some(contact) = self.pending_hit.take() {
                        self.dispatch_hit(contact);
                    }
                }
                Activity::Hurt(sequence) if sequence.resume_at.is_due(&self.clock) => {
                    self.advance_hurt(sequence);
                }
                Activity::Dead(sequence) if sequence.resume_at.is_due(&self.clock) => {
                    self.advance_death(sequence);
                }
                _ => break,
            }
        }
    }

    fn update_perception(&mut self) {
        let distance = self.position.distance(self.player_position);
        let keep_chasing = matches!(self.activity, Activity::Chasing)
            && distance <= self.tuning.detection_radius + self.tuning.lose_sight_margin;

        self.in_range = self.is_player_in_range() || keep_chasing;
    }

    fn locomote(&mut self, input: &TickInput) {
        if self.in_range {
            self.chase(input);
        } else if !self.is_waiting() {
            self.patrol(input.sim_delta);
        }
    }

    fn patrol(&mut self, dt: f32) {
        self.activity = Activity::Patrolling;
        self.set_walking(true);

        let step = self.tuning.patrol_speed * dt;
        let x = self.position.x;

        if self.moving_right {
            if !self.facing.is_right() {
                self.flip();
            }
            if x < self.patrol_end {
                self.move_to_x((x + step).min(self.patrol_end));
            }
            if self.position.x >= self.patrol_end {
                self.moving_right = false;
                self.flip();
                self.enter_wait();
            }
        } else {
            if self.facing.is_right() {
                self.flip();
            }
            if x > self.patrol_start {
                self.move_to_x((x - step).max(self.patrol_start));
            }
            if self.position.x <= self.patrol_start {
                self.moving_right = true;
                self.flip();
                self.enter_wait();
            }
        }
    }

    fn enter_wait(&mut self) {
        self.set_walking(false);
        self.activity = Activity::Waiting {
            resume_at: self.clock.sim_in(self.tuning.wait_duration),
        };
        debug!("enemy waiting at x={:.2}", self.position.x);
    }

    fn chase(&mut self, input: &TickInput) {
        if !matches!(self.activity, Activity::Chasing) {
            debug!("enemy spotted player at x={:.2}", self.player_position.x);
        }
        self.activity = Activity::Chasing;
        self.set_walking(true);

        let x = self.position.x;
        let half = self.tuning.patrol_half_width();
        let (start, end) = input.limits.clamp_bounds(x - half, x + half);
        self.patrol_start = start;
        self.patrol_end = end;

        let player = self.player_position;
        if player.x < x && self.facing.is_right() {
            self.moving_right = false;
            self.flip();
        }
        if player.x > x && !self.facing.is_right() {
            self.moving_right = true;
            self.flip();
        }

        let target = Vec2::new(input.limits.clamp_x(player.x), self.position.y);
        let next = move_towards(
            self.position,
            target,
            self.tuning.chase_speed * input.sim_delta,
        );
        self.translate(next - self.position);

        if self.position.distance(player) <= self.tuning.attack_range {
            self.start_attack();
        }
    }

    fn start_attack(&mut self) {
        self.set_walking(false);
        self.activity = Activity::Attacking {
            resume_at: self.clock.sim_in(self.tuning.attack_duration),
        };
        self.out
            .animations
            .push(AnimationRequest::Trigger(AnimationClipId::Attack));
        self.out.events.push(AgentEvent::AttackStarted);
    }

    fn register_hit(&mut self, contact: WeaponContact) {
        if self.is_dead() {
            return;
        }

        self.out.audio.push(AudioRequest::Stop);
        self.out.hitbox = Some(HitboxCommand::Disarm);
        self.played_hurt_cue = false;

        if self.is_attacking() {
            self.pending_hit = Some(contact);
            return;
        }

        self.dispatch_hit(contact);
    }

    fn dispatch_hit(&mut self, contact: WeaponContact) {
        // A hurt sequence cut short before its knockback still owes its damage.
        if let Activity::Hurt(HurtSequence {
            step: HurtStep::WindUp | HurtStep::Paused,
            ..
        }) = self.activity
        {
            self.lose_health();
        }

        if self.health > 1 {
            self.start_hurt(contact);
        } else {
            self.start_death();
        }
    }

    fn start_hurt(&mut self, contact: WeaponContact) {
        if !self.played_hurt_cue {
            self.out.audio.push(AudioRequest::Play(AudioCue::Hurt));
            self.played_hurt_cue = true;
        }
        self.set_walking(false);

        let knockback_sign = if contact.owner_x > self.position.x {
            Some(-1.0)
        } else if contact.owner_x < self.position.x {
            Some(1.0)
        } else {
            None
        };

        let sequence = match knockback_sign {
            Some(_) => {
                self.out
                    .animations
                    .push(AnimationRequest::Restart(AnimationClipId::Hurt));
                HurtSequence {
                    step: HurtStep::WindUp,
                    resume_at: self.clock.real_in(self.tuning.hurt_windup),
                    knockback_sign,
                }
            }
            None => {
                self.lose_health();
                HurtSequence {
                    step: HurtStep::Knockback,
                    resume_at: self.clock.real_in(self.tuning.knockback_duration),
                    knockback_sign,
                }
            }
        };
        self.activity = Activity::Hurt(sequence);
    }

    fn advance_hurt(&mut self, sequence: HurtSequence) {
        match sequence.step {
            HurtStep::WindUp => {
                self.out.hit_pause = Some(self.tuning.hit_pause);
                self.activity = Activity::Hurt(HurtSequence {
                    step: HurtStep::Paused,
                    resume_at: self.clock.real_in(self.tuning.hit_pause),
                    ..sequence
                });
            }
            HurtStep::Paused => {
                let sign = sequence.knockback_sign.unwrap_or(0.0);
                self.out.linear_velocity =
                    Some(Vec2::new(sign * self.tuning.knockback_speed, 0.0));
                self.lose_health();
                self.activity = Activity::Hurt(HurtSequence {
                    step: HurtStep::Knockback,
                    resume_at: self.clock.real_in(self.tuning.knockback_duration),
                    ..sequence
                });
            }
            HurtStep::Knockback => {
                if self.health > 0 {
                    self.out.linear_velocity = Some(Vec2::ZERO);
                }
                self.rearm_at = Some(self.clock.sim_in(self.tuning.rearm_delay));
                self.activity = Activity::Patrolling;
            }
        }
    }

    fn lose_health(&mut self) {
        self.health = self.health.saturating_sub(1);
        self.out.health_delta -= 1;
        self.out.events.push(AgentEvent::Hurt {
            health: self.health,
        });
    }

    fn start_death(&mut self) {
        self.played_wake_laugh_cue = false;
        self.rearm_at = None;
        self.pending_hit = None;
        self.activity = Activity::Dead(DeathSequence {
            step: DeathStep::Collapsing,
            resume_at: self.clock.real_in(self.tuning.death_duration),
        });

        if !self.played_death_cue {
            self.out.audio.push(AudioRequest::Play(AudioCue::Death));
            self.played_death_cue = true;
        }

        self.set_walking(false);
        self.out.body = Some(BodyCommand::Freeze);
        self.out
            .animations
            .push(AnimationRequest::Restart(AnimationClipId::Death));
        self.out.hitbox = Some(HitboxCommand::Arm);
        self.out.events.push(AgentEvent::Died);
    }

    fn advance_death(&mut self, sequence: DeathSequence) {
        match sequence.step {
            DeathStep::Collapsing => {
                self.out
                    .animations
                    .push(AnimationRequest::Play(AnimationClipId::DeathIdle));
                self.activity = Activity::Dead(DeathSequence {
                    step: DeathStep::Lying,
                    resume_at: self.clock.real_in(self.tuning.revive_delay),
                });
            }
            DeathStep::Lying => self.revive(),
        }
    }

    fn revive(&mut self) {
        if !self.played_wake_laugh_cue {
            self.out.audio.push(AudioRequest::Play(AudioCue::WakeLaugh));
            self.played_wake_laugh_cue = true;
        }
        self.out.body = Some(BodyCommand::Release);

        let restored = self.tuning.max_health.saturating_sub(self.health);
        self.health = self.tuning.max_health;
        self.out.health_delta += i16::from(restored);

        self.played_death_cue = false;
        self.walking = None;
        self.out
            .animations
            .push(AnimationRequest::Play(AnimationClipId::Idle));
        self.activity = Activity::Patrolling;
        self.out.events.push(AgentEvent::Revived);
    }

    fn set_walking(&mut self, walking: bool) {
        if self.walking != Some(walking) {
            self.walking = Some(walking);
            self.out.animations.push(AnimationRequest::Walk(walking));
        }
    }

    fn move_to_x(&mut self, x: f32) {
        self.out.position_delta.x += x - self.position.x;
        self.position.x = x;
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.out.position_delta += delta;
    }
}

/// Step from `current` toward `target` by at most `max_step`, never overshooting.
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();

    if distance <= max_step || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.05;
    const FAR_AWAY: Vec2 = Vec2::new(1000.0, 0.0);

    /// Plays the host: feeds the agent its own position back each tick.
    struct Harness {
        agent: EnemyAgent,
        position: Vec2,
        player: Vec2,
        limits: MapLimits,
        velocity: Vec2,
        time: f32,
    }

    impl Harness {
        fn new(x: f32) -> Self {
            let position = Vec2::new(x, 0.0);
            Self {
                agent: EnemyAgent::new(position, Facing::Right, AgentTuning::default()),
                position,
                player: FAR_AWAY,
                limits: MapLimits::new(-100.0, 100.0),
                velocity: Vec2::ZERO,
                time: 0.0,
            }
        }

        fn step_with(&mut self, contact: Option<WeaponContact>) -> AgentOutput {
            let output = self.agent.tick(&TickInput {
                real_delta: DT,
                sim_delta: DT,
                position: self.position,
                player_position: self.player,
                limits: self.limits,
                weapon_contact: contact,
            });
            self.position += output.position_delta;
            if let Some(velocity) = output.linear_velocity {
                self.velocity = velocity;
            }
            self.time += DT;
            output
        }

        fn step(&mut self) -> AgentOutput {
            self.step_with(None)
        }

        fn hit_from(&mut self, owner_x: f32) -> AgentOutput {
            self.step_with(Some(WeaponContact { owner_x }))
        }

        /// Step until `done` holds, collecting every output on the way.
        fn run_until(
            &mut self,
            max_secs: f32,
            mut done: impl FnMut(&EnemyAgent) -> bool,
        ) -> Vec<AgentOutput> {
            let mut outputs = Vec::new();
            let deadline = self.time + max_secs;
            while !done(&self.agent) {
                assert!(self.time < deadline, "condition not reached in {max_secs}s");
                outputs.push(self.step());
            }
            outputs
        }
    }

    fn assert_bounds_invariant(agent: &EnemyAgent, limits: MapLimits) {
        let (start, end) = agent.patrol_bounds();
        assert!(
            limits.left <= start && start <= end && end <= limits.right,
            "bounds {start}..{end} outside {limits:?}"
        );
    }

    #[test]
    fn patrol_oscillates_between_spawn_and_patrol_width() {
        let mut h = Harness::new(0.0);

        h.run_until(6.0, |a| a.is_waiting());
        assert!((h.position.x - 8.0).abs() < 1e-4);
        assert_eq!(h.agent.facing(), Facing::Left);
        let reached_end = h.time;

        h.run_until(2.0, |a| !a.is_waiting());
        let waited = h.time - reached_end;
        assert!((waited - 1.0).abs() <= DT + 1e-4, "waited {waited}s");

        h.run_until(6.0, |a| a.is_waiting());
        assert!(h.position.x.abs() < 1e-4);
        assert_eq!(h.agent.facing(), Facing::Right);
        assert_eq!(h.agent.patrol_bounds(), (0.0, 8.0));
    }

    #[test]
    fn patrol_walks_at_patrol_speed_and_waits_idle() {
        let mut h = Harness::new(0.0);
        let first = h.step();

        assert_eq!(h.agent.mode(), Mode::Patrolling);
        assert_eq!(h.agent.speed(), 2.0);
        assert!((first.position_delta.x - 2.0 * DT).abs() < 1e-6);
        assert!(first.animations.contains(&AnimationRequest::Walk(true)));

        let outputs = h.run_until(6.0, |a| a.is_waiting());
        let last = outputs.last().expect("at least one tick");
        assert!(last.animations.contains(&AnimationRequest::Walk(false)));
        assert_eq!(h.agent.speed(), 0.0);
    }

    #[test]
    fn spotting_player_switches_to_chase_and_recentres_patrol() {
        let mut h = Harness::new(0.0);
        h.position = Vec2::new(3.0, 0.0);
        h.player = Vec2::new(7.5, 0.0);

        h.step();

        assert_eq!(h.agent.mode(), Mode::Chasing);
        assert!(h.agent.in_range());
        assert_eq!(h.agent.speed(), 4.0);
        assert_eq!(h.agent.patrol_bounds(), (-1.0, 7.0));
        assert!((h.position.x - (3.0 + 4.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn waiting_agent_gives_chase_immediately() {
        let mut h = Harness::new(0.0);
        h.run_until(6.0, |a| a.is_waiting());

        h.player = Vec2::new(12.0, 0.0);
        h.step();

        assert_eq!(h.agent.mode(), Mode::Chasing);
        assert!(!h.agent.is_waiting());
    }

    #[test]
    fn chase_turns_toward_player_on_the_left() {
        let mut h = Harness::new(0.0);
        h.player = Vec2::new(-4.0, 0.0);

        let output = h.step();

        assert_eq!(h.agent.facing(), Facing::Left);
        assert_eq!(output.facing, Facing::Left);
        assert_eq!(output.angular_velocity, Some(0.0));
        assert!(output.position_delta.x < 0.0);
    }

    #[test]
    fn chase_stops_at_map_limit() {
        let mut h = Harness::new(0.0);
        h.limits = MapLimits::new(-100.0, 2.5);
        h.player = Vec2::new(4.6, 0.0);

        h.run_until(3.0, |a| a.position().x >= 2.5 - 1e-5);
        for _ in 0..20 {
            h.step();
            assert!(h.position.x <= 2.5 + 1e-5);
            assert_bounds_invariant(&h.agent, h.limits);
        }
        assert_eq!(h.agent.mode(), Mode::Chasing);
    }

    #[test]
    fn closing_to_attack_range_starts_timed_attack() {
        let mut h = Harness::new(0.0);
        h.player = Vec2::new(3.0, 0.0);

        let outputs = h.run_until(2.0, |a| a.is_attacking());
        let last = outputs.last().expect("attack tick");
        assert!(last
            .animations
            .contains(&AnimationRequest::Trigger(AnimationClipId::Attack)));
        assert!(last.events.contains(&AgentEvent::AttackStarted));
        assert_eq!(h.agent.speed(), 0.0);

        let started = h.time;
        let held = h.position;
        for _ in 0..10 {
            h.step();
            assert!(h.agent.is_attacking());
            assert_eq!(h.position, held);
        }

        // Player walks off, so the attack ends into patrol rather than a new attack.
        h.player = FAR_AWAY;
        h.run_until(2.0, |a| !a.is_attacking());
        let lasted = h.time - started;
        assert!((lasted - 1.05).abs() <= DT + 1e-4, "attack lasted {lasted}s");
        assert_eq!(h.agent.mode(), Mode::Patrolling);
    }

    #[test]
    fn attack_sound_plays_from_offset() {
        let mut agent = EnemyAgent::new(Vec2::ZERO, Facing::Right, AgentTuning::default());
        agent.attack_sound();

        let output = agent.take_output();
        assert_eq!(
            output.audio,
            vec![AudioRequest::PlayFrom(AudioCue::Attack, 0.05)]
        );
        assert!(agent.take_output().audio.is_empty());
    }

    #[test]
    fn hit_from_left_knocks_right_and_rearms_after_about_a_second() {
        let mut h = Harness::new(0.0);
        h.hit_from(-10.0);
        h.run_until(2.0, |a| a.mode() != Mode::Hurt);
        for _ in 0..30 {
            h.step();
        }
        assert_eq!(h.agent.health(), 2);

        let contact_time = h.time;
        let first = h.hit_from(-1.0);
        assert_eq!(
            first.audio,
            vec![AudioRequest::Stop, AudioRequest::Play(AudioCue::Hurt)]
        );
        assert_eq!(first.hitbox, Some(HitboxCommand::Disarm));
        assert!(first
            .animations
            .contains(&AnimationRequest::Restart(AnimationClipId::Hurt)));
        assert_eq!(h.agent.mode(), Mode::Hurt);

        let mut knockback = None;
        let mut pause = None;
        let mut rearmed_after = None;
        let mut health_delta = first.health_delta;
        while rearmed_after.is_none() {
            assert!(h.time - contact_time < 2.0, "hitbox never re-armed");
            let out = h.step();
            health_delta += out.health_delta;
            knockback = knockback.or(out.linear_velocity);
            pause = pause.or(out.hit_pause);
            if out.hitbox == Some(HitboxCommand::Arm) {
                rearmed_after = Some(h.time - contact_time);
            }
        }

        assert_eq!(knockback, Some(Vec2::new(6.0, 0.0)));
        assert_eq!(pause, Some(0.03));
        assert_eq!(h.agent.health(), 1);
        assert_eq!(health_delta, -1);
        assert_eq!(h.velocity, Vec2::ZERO);
        let rearmed_after = rearmed_after.unwrap_or_default();
        assert!(
            (1.0..=1.3).contains(&rearmed_after),
            "re-armed after {rearmed_after}s"
        );
    }

    #[test]
    fn hit_from_right_knocks_left() {
        let mut h = Harness::new(0.0);
        h.hit_from(5.0);
        let outputs = h.run_until(1.0, |a| a.mode() != Mode::Hurt);

        let velocity = outputs.iter().find_map(|o| o.linear_velocity);
        assert_eq!(velocity, Some(Vec2::new(-6.0, 0.0)));
    }

    #[test]
    fn second_hit_before_knockback_keeps_the_first_hits_damage() {
        let mut h = Harness::new(0.0);
        let mut health_delta = h.hit_from(-5.0).health_delta;
        health_delta += h.hit_from(-5.0).health_delta;
        assert_eq!(h.agent.mode(), Mode::Hurt);

        let outputs = h.run_until(1.0, |a| a.mode() != Mode::Hurt);
        health_delta += outputs.iter().map(|o| o.health_delta).sum::<i16>();

        assert_eq!(h.agent.health(), 1);
        assert_eq!(health_delta, -2);
    }

    #[test]
    fn second_hit_before_knockback_can_be_lethal() {
        let mut h = Harness::new(0.0);
        h.hit_from(-5.0);
        h.run_until(2.0, |a| a.mode() != Mode::Hurt);
        assert_eq!(h.agent.health(), 2);

        h.hit_from(-5.0);
        let second = h.hit_from(-5.0);

        assert!(h.agent.is_dead());
        assert_eq!(h.agent.health(), 1);
        assert_eq!(second.health_delta, -1);
        assert!(second.events.contains(&AgentEvent::Died));
    }

    #[test]
    fn level_weapon_still_costs_health_without_knockback() {
        let mut h = Harness::new(0.0);
        // The contact is evaluated after this tick's patrol step.
        let x_after_step = h.agent.tuning().patrol_speed * DT;
        let first = h.hit_from(x_after_step);

        assert_eq!(first.health_delta, -1);
        assert!(first
            .animations
            .iter()
            .all(|a| !matches!(a, AnimationRequest::Restart(_))));

        let outputs = h.run_until(1.0, |a| a.mode() != Mode::Hurt);
        assert!(outputs.iter().all(|o| o.hit_pause.is_none()));
        assert_eq!(h.agent.health(), 2);
    }

    #[test]
    fn lethal_hit_runs_death_cycle_and_revives() {
        let mut h = Harness::new(0.0);
        for _ in 0..2 {
            h.hit_from(-10.0);
            h.run_until(2.0, |a| a.mode() != Mode::Hurt);
        }
        assert_eq!(h.agent.health(), 1);

        let died_at = h.time;
        let death = h.hit_from(-10.0);
        assert!(h.agent.is_dead());
        assert_eq!(death.body, Some(BodyCommand::Freeze));
        assert_eq!(death.hitbox, Some(HitboxCommand::Arm));
        assert_eq!(death.health_delta, 0);
        assert!(death.audio.contains(&AudioRequest::Play(AudioCue::Death)));
        assert!(death
            .animations
            .contains(&AnimationRequest::Restart(AnimationClipId::Death)));

        let outputs = h.run_until(8.0, |a| !a.is_dead());
        let revived_after = h.time - died_at;
        assert!(
            (6.04..=6.04 + 4.0 * DT).contains(&revived_after),
            "revived after {revived_after}s"
        );

        assert!(outputs
            .iter()
            .any(|o| o.animations.contains(&AnimationRequest::Play(AnimationClipId::DeathIdle))));
        let revive = outputs.last().expect("revive tick");
        assert!(revive.audio.contains(&AudioRequest::Play(AudioCue::WakeLaugh)));
        assert_eq!(revive.body, Some(BodyCommand::Release));
        assert_eq!(revive.health_delta, 2);
        assert_eq!(h.agent.health(), 3);
    }

    #[test]
    fn dead_agent_ignores_contacts_and_holds_health() {
        let mut h = Harness::new(0.0);
        for _ in 0..2 {
            h.hit_from(-10.0);
            h.run_until(2.0, |a| a.mode() != Mode::Hurt);
        }
        h.hit_from(-10.0);

        for _ in 0..40 {
            let out = h.hit_from(-10.0);
            assert!(out.audio.is_empty());
            assert_eq!(out.hitbox, None);
            assert_eq!(h.agent.health(), 1);
            assert_eq!(h.agent.mode(), Mode::Dead);
        }
    }

    #[test]
    fn hit_during_attack_lands_after_the_attack() {
        let mut h = Harness::new(0.0);
        h.player = Vec2::new(1.5, 0.0);
        h.step();
        assert!(h.agent.is_attacking());

        let contact = h.hit_from(1.5);
        assert_eq!(contact.hitbox, Some(HitboxCommand::Disarm));
        assert_eq!(contact.audio, vec![AudioRequest::Stop]);
        assert!(h.agent.is_attacking());
        assert_eq!(h.agent.health(), 3);

        let outputs = h.run_until(2.0, |a| !a.is_attacking());
        assert_eq!(h.agent.mode(), Mode::Hurt);
        let last = outputs.last().expect("dispatch tick");
        assert!(last.audio.contains(&AudioRequest::Play(AudioCue::Hurt)));

        h.run_until(1.0, |a| a.mode() != Mode::Hurt);
        assert_eq!(h.agent.health(), 2);
    }

    #[test]
    fn exactly_one_mode_and_bounds_hold_through_a_fight() {
        let mut h = Harness::new(95.0);
        let limits = h.limits;
        let script = [
            (FAR_AWAY, None),
            (Vec2::new(99.0, 0.0), None),
            (Vec2::new(99.0, 0.0), Some(WeaponContact { owner_x: 99.0 })),
            (Vec2::new(-500.0, 0.0), None),
        ];

        for (player, contact) in script {
            h.player = player;
            h.step_with(contact);
            for _ in 0..60 {
                h.step();
                let a = &h.agent;
                let flags = [
                    a.mode() == Mode::Patrolling,
                    a.is_waiting(),
                    a.mode() == Mode::Chasing,
                    a.is_attacking(),
                    a.mode() == Mode::Hurt,
                    a.is_dead(),
                ];
                assert_eq!(flags.iter().filter(|f| **f).count(), 1);
                assert_bounds_invariant(a, limits);
                assert!(a.health() >= 1 && a.health() <= 3);
            }
        }
    }

    #[test]
    fn detection_boundary_is_inclusive() {
        let mut h = Harness::new(0.0);
        h.player = Vec2::new(5.0, 0.0);
        h.agent.player_position = h.player;
        assert!(h.agent.is_player_in_range());

        h.agent.player_position = Vec2::new(5.001, 0.0);
        assert!(!h.agent.is_player_in_range());
    }

    #[test]
    fn lose_sight_margin_keeps_chase_alive() {
        let tuning = AgentTuning {
            lose_sight_margin: 1.0,
            ..Default::default()
        };
        let mut agent = EnemyAgent::new(Vec2::ZERO, Facing::Right, tuning);
        let input = |player_x: f32| TickInput {
            real_delta: 0.0,
            sim_delta: 0.0,
            position: Vec2::ZERO,
            player_position: Vec2::new(player_x, 0.0),
            limits: MapLimits::default(),
            weapon_contact: None,
        };

        agent.tick(&input(4.9));
        assert_eq!(agent.mode(), Mode::Chasing);
        agent.tick(&input(5.5));
        assert_eq!(agent.mode(), Mode::Chasing);
        agent.tick(&input(6.5));
        assert_eq!(agent.mode(), Mode::Patrolling);
        agent.tick(&input(5.5));
        assert_eq!(agent.mode(), Mode::Patrolling);
    }

    #[test]
    fn flipping_twice_restores_facing_and_stops_spin() {
        let mut agent = EnemyAgent::new(Vec2::ZERO, Facing::Left, AgentTuning::default());
        agent.flip();
        agent.flip();

        let output = agent.take_output();
        assert_eq!(agent.facing(), Facing::Left);
        assert_eq!(output.facing, Facing::Left);
        assert_eq!(output.angular_velocity, Some(0.0));
    }

    #[test]
    fn clamp_bounds_keeps_order_when_pushed_off_map() {
        let limits = MapLimits::new(-10.0, 10.0);
        assert_eq!(limits.clamp_bounds(-20.0, 30.0), (-10.0, 10.0));
        assert_eq!(limits.clamp_bounds(12.0, 20.0), (10.0, 10.0));
        assert_eq!(limits.clamp_bounds(3.0, 1.0), (3.0, 3.0));
    }

    #[test]
    fn move_towards_never_overshoots() {
        let next = move_towards(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0);
        assert_eq!(next, Vec2::new(1.0, 0.0));

        let next = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.5);
        assert_eq!(next, Vec2::new(0.5, 0.0));
    }
}
