//! Headless navigation: NavAgent → Transform
//!
//! Стоит на месте хостовой навигации (navmesh agent). Прямая линия к destination,
//! ускорение ограничено, speed override тикает и истекает.

use bevy::prelude::*;

use crate::components::{NavAgent, Stunned};

/// Сдвинуть velocity к target не больше чем на max_delta
fn approach(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    current + (target - current).clamp_length_max(max_delta)
}

/// Система: двигает агентов к destination
///
/// Stunned агенты не двигаются (ими владеет хостовая физика).
pub fn steer_nav_agents(mut agents: Query<(&mut Transform, &mut NavAgent), Without<Stunned>>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut transform, mut agent) in agents.iter_mut() {
        let (speed, acceleration) = agent.effective_speed();

        if let Some(over) = agent.speed_override.as_mut() {
            over.remaining -= delta;
            if over.remaining <= 0.0 {
                agent.speed_override = None;
            }
        }

        let Some(destination) = agent.destination else {
            agent.velocity = approach(agent.velocity, Vec3::ZERO, acceleration * delta);
            transform.translation += agent.velocity * delta;
            continue;
        };

        let to_target = destination - transform.translation;
        let distance = to_target.length();

        if distance <= agent.arrive_distance {
            agent.destination = None;
            agent.velocity = Vec3::ZERO;
            continue;
        }

        let desired = to_target / distance * speed;
        let velocity = approach(agent.velocity, desired, acceleration * delta);
        agent.velocity = velocity;

        let step = velocity * delta;
        if step.length() >= distance {
            // Не проскакиваем цель
            transform.translation = destination;
            agent.destination = None;
            agent.velocity = Vec3::ZERO;
        } else {
            transform.translation += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SpeedOverride;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn steering_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
            .add_systems(FixedUpdate, steer_nav_agents);
        app
    }

    #[test]
    fn test_agent_reaches_destination() {
        let mut app = steering_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::default(),
                NavAgent {
                    destination: Some(Vec3::new(2.0, 0.0, 0.0)),
                    ..default()
                },
            ))
            .id();

        for _ in 0..240 {
            app.update();
        }

        let transform = app.world().get::<Transform>(agent).expect("transform");
        let nav = app.world().get::<NavAgent>(agent).expect("agent");
        assert!(transform.translation.distance(Vec3::new(2.0, 0.0, 0.0)) <= nav.arrive_distance + 1e-3);
        assert!(!nav.has_path());
    }

    #[test]
    fn test_speed_override_expires() {
        let mut app = steering_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::default(),
                NavAgent {
                    speed_override: Some(SpeedOverride {
                        speed: 6.0,
                        acceleration: 10.0,
                        remaining: 0.1,
                    }),
                    ..default()
                },
            ))
            .id();

        for _ in 0..30 {
            app.update();
        }

        let nav = app.world().get::<NavAgent>(agent).expect("agent");
        assert_eq!(nav.speed_override, None);
    }

    #[test]
    fn test_stunned_agent_stays_put() {
        let mut app = steering_app();
        let agent = app
            .world_mut()
            .spawn((
                Transform::default(),
                Stunned,
                NavAgent {
                    destination: Some(Vec3::new(2.0, 0.0, 0.0)),
                    ..default()
                },
            ))
            .id();

        for _ in 0..60 {
            app.update();
        }

        let transform = app.world().get::<Transform>(agent).expect("transform");
        assert_eq!(transform.translation, Vec3::ZERO);
    }
}
