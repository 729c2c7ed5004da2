//! RobeConfig - все tuning константы поведения
//!
//! Defaults = "каноничное" поведение Robe. JSON override через `RobeConfig::from_json`
//! (частичный JSON допустим, отсутствующие поля берутся из Default).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::random::Span;

/// Параметры Robe AI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct RobeConfig {
    // === Awareness ===
    /// Сколько секунд без визуального контакта до потери focus (Idle/Shifty/FollowPlayer)
    pub lose_focus_after: f32,
    /// Chase: сколько секунд без визуального контакта до disengage → GiveSpace
    pub chase_disengage_after: f32,
    /// Interest timer после того как focus замечен
    pub interest_duration: Span,
    /// Сколько длится "игнорирование" игроков
    pub ignore_duration: Span,

    // === Valuables ===
    /// Радиус подписки на break events ценностей
    pub valuable_tracking_radius: f32,
    /// Как часто пересчитывать tracked set (секунды)
    pub valuable_refresh_interval: f32,

    // === Aggro ===
    /// Extraction point в состоянии warning ближе этого → aggro на focus
    pub extraction_warning_radius: f32,
    /// ChaseBegin wind-up после aggro
    pub aggro_windup: Span,

    // === Idle ===
    /// Комфортная дистанция до focus (внутри → Shifty, снаружи → FollowPlayer)
    pub idle_comfort_band: Span,
    pub idle_roam_duration: Span,
    pub idle_follow_duration: Span,
    pub shifty_duration: f32,
    pub help_duration: f32,

    // === Shifty / Roam ===
    pub shifty_wander_radius: f32,
    pub shifty_search_radius: f32,
    /// Shifty держится только пока focus в этом band
    pub shifty_band: Span,
    pub roam_wander_radius: f32,
    pub roam_follow_duration: f32,
    /// Radius для поиска навигируемой точки по умолчанию
    pub nav_search_radius: f32,

    // === FollowPlayer ===
    pub follow_offset: f32,
    pub follow_jitter: f32,
    /// Дальше этого → ChaseBegin
    pub follow_chase_distance: f32,
    /// Орбита вокруг focus (строго внутри → Idle)
    pub follow_orbit_band: Span,

    // === HelpPlayer ===
    pub help_standoff_band: Span,
    pub help_lift_radius: f32,
    pub help_max_lift: f32,
    pub help_offset: f32,
    pub help_search_radius: f32,
    pub help_repath_interval: f32,

    // === Chase / Attack ===
    pub chase_duration: Span,
    pub chase_repath_interval: f32,
    pub attack_distance: f32,
    pub attack_under_distance: f32,
    pub attack_duration: f32,
    pub attack_under_windup: f32,
    pub attack_under_duration: f32,
    pub attack_damage: u32,
    pub attack_under_damage: u32,

    // === GiveSpace ===
    pub give_space_radius: f32,
    pub give_space_duration: f32,

    // === Movement overrides (speed, acceleration) ===
    pub shifty_speed: f32,
    pub shifty_acceleration: f32,
    pub help_speed: f32,
    pub help_acceleration: f32,
    pub chase_speed: f32,
    pub chase_acceleration: f32,

    /// Частота critically-damped spring для поворота (rad/s)
    pub rotation_frequency: f32,
}

impl Default for RobeConfig {
    fn default() -> Self {
        Self {
            lose_focus_after: 10.0,
            chase_disengage_after: 8.0,
            interest_duration: Span::new(30.0, 140.0),
            ignore_duration: Span::new(20.0, 40.0),

            valuable_tracking_radius: 4.0,
            valuable_refresh_interval: 1.0,

            extraction_warning_radius: 5.0,
            aggro_windup: Span::new(0.75, 1.25),

            idle_comfort_band: Span::new(2.5, 5.0),
            idle_roam_duration: Span::new(4.0, 9.0),
            idle_follow_duration: Span::new(10.0, 12.0),
            shifty_duration: 3.0,
            help_duration: 30.0,

            shifty_wander_radius: 4.0,
            shifty_search_radius: 5.0,
            shifty_band: Span::new(2.0, 5.0),
            roam_wander_radius: 10.0,
            roam_follow_duration: 12.0,
            nav_search_radius: 2.0,

            follow_offset: 3.0,
            follow_jitter: 0.5,
            follow_chase_distance: 10.0,
            follow_orbit_band: Span::new(2.5, 3.5),

            help_standoff_band: Span::new(1.8, 2.6),
            help_lift_radius: 3.5,
            help_max_lift: 5.0,
            help_offset: 1.5,
            help_search_radius: 0.5,
            help_repath_interval: 0.1,

            chase_duration: Span::new(10.0, 14.0),
            chase_repath_interval: 0.1,
            attack_distance: 1.5,
            attack_under_distance: 2.0,
            attack_duration: 1.0,
            attack_under_windup: 0.5,
            attack_under_duration: 0.5,
            attack_damage: 120,
            attack_under_damage: 80,

            give_space_radius: 4.0,
            give_space_duration: 2.0,

            shifty_speed: 0.75,
            shifty_acceleration: 1.0,
            help_speed: 0.5,
            help_acceleration: 2.0,
            chase_speed: 6.0,
            chase_acceleration: 10.0,

            rotation_frequency: 8.0,
        }
    }
}

impl RobeConfig {
    /// Парсит JSON override и валидирует результат
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: RobeConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let spans = [
            ("interest_duration", self.interest_duration),
            ("ignore_duration", self.ignore_duration),
            ("aggro_windup", self.aggro_windup),
            ("idle_comfort_band", self.idle_comfort_band),
            ("idle_roam_duration", self.idle_roam_duration),
            ("idle_follow_duration", self.idle_follow_duration),
            ("shifty_band", self.shifty_band),
            ("follow_orbit_band", self.follow_orbit_band),
            ("help_standoff_band", self.help_standoff_band),
            ("chase_duration", self.chase_duration),
        ];
        for (name, span) in spans {
            if span.min > span.max {
                return Err(ConfigError::InvertedRange { name, min: span.min, max: span.max });
            }
        }

        let positives = [
            ("valuable_tracking_radius", self.valuable_tracking_radius),
            ("valuable_refresh_interval", self.valuable_refresh_interval),
            ("nav_search_radius", self.nav_search_radius),
            ("chase_repath_interval", self.chase_repath_interval),
            ("help_repath_interval", self.help_repath_interval),
            ("rotation_frequency", self.rotation_frequency),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RobeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.idle_comfort_band, Span::new(2.5, 5.0));
        assert_eq!(config.chase_disengage_after, 8.0);
        assert_eq!(config.valuable_tracking_radius, 4.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config = RobeConfig::from_json(r#"{ "chase_speed": 7.5, "aggro_windup": { "min": 0.5, "max": 0.6 } }"#)
            .expect("valid override");

        assert_eq!(config.chase_speed, 7.5);
        assert_eq!(config.aggro_windup, Span::new(0.5, 0.6));
        // Остальное - defaults
        assert_eq!(config.lose_focus_after, 10.0);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = RobeConfig::from_json(r#"{ "chase_duration": { "min": 14.0, "max": 10.0 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvertedRange { name: "chase_duration", .. })
        ));
    }

    #[test]
    fn test_non_positive_rejected() {
        let result = RobeConfig::from_json(r#"{ "valuable_refresh_interval": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn test_garbage_json_rejected() {
        assert!(matches!(RobeConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
