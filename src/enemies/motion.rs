//! Applies agent movement, facing and body state to the physics host.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::agent::{BodyCommand, Facing};
use super::components::{Enemy, PendingOutput};

/// Rotation that points a +Z-forward model along the facing direction.
pub fn facing_rotation(facing: Facing) -> Quat {
    Quat::from_rotation_y(facing.sign() * std::f32::consts::FRAC_PI_2)
}

/// Move, turn and (un)freeze enemies.
pub fn apply_agent_motion(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &mut Transform,
            &mut Velocity,
            &mut RigidBody,
            &mut PendingOutput,
        ),
        With<Enemy>,
    >,
) {
    for (entity, mut transform, mut velocity, mut body, mut pending) in query.iter_mut() {
        let output = &mut pending.0;

        let delta = std::mem::take(&mut output.position_delta);
        if delta != Vec2::ZERO {
            transform.translation += delta.extend(0.0);
        }

        let rotation = facing_rotation(output.facing);
        if transform.rotation != rotation {
            transform.rotation = rotation;
        }

        if let Some(linear) = output.linear_velocity.take() {
            velocity.linvel = linear.extend(0.0);
        }
        if let Some(angular) = output.angular_velocity.take() {
            velocity.angvel = Vec3::new(0.0, 0.0, angular);
        }

        match output.body.take() {
            Some(BodyCommand::Freeze) => {
                *body = RigidBody::Fixed;
                velocity.linvel = Vec3::ZERO;
                commands.entity(entity).insert(ColliderDisabled);
            }
            Some(BodyCommand::Release) => {
                *body = RigidBody::Dynamic;
                commands.entity(entity).remove::<ColliderDisabled>();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_rotation_points_model_forward_along_x() {
        let right = facing_rotation(Facing::Right) * Vec3::Z;
        let left = facing_rotation(Facing::Left) * Vec3::Z;

        assert!(right.abs_diff_eq(Vec3::X, 1e-5));
        assert!(left.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }
}
