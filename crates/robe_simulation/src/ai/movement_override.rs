//! MovementOverride - временный speed/acceleration override на navigation capability
//!
//! Override живёт не дольше `duration` (обычно = StateTimer состояния). Exit logic
//! состояния обязана вызвать `end`, иначе скорость "протечёт" в следующее состояние.

use crate::host::Navigation;

/// Длительность override, которым гасится активный (один шаг навигации)
pub const END_OVERRIDE_DURATION: f32 = 0.001;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementOverride {
    active: bool,
}

impl MovementOverride {
    pub fn begin(&mut self, nav: &mut dyn Navigation, speed: f32, acceleration: f32, duration: f32) {
        nav.override_speed(speed, acceleration, duration.max(0.0));
        self.active = true;
    }

    /// Вернуть базовую скорость (no-op если override не активен)
    pub fn end(&mut self, nav: &mut dyn Navigation) {
        if !self.active {
            return;
        }
        nav.override_speed(0.0, 0.0, END_OVERRIDE_DURATION);
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scripted::ScriptedNav;

    #[test]
    fn test_end_only_after_begin() {
        let mut nav = ScriptedNav::default();
        let mut bridge = MovementOverride::default();

        bridge.end(&mut nav);
        assert!(nav.overrides.is_empty());

        bridge.begin(&mut nav, 6.0, 10.0, 12.0);
        bridge.end(&mut nav);
        bridge.end(&mut nav);

        assert_eq!(nav.overrides, vec![(6.0, 10.0, 12.0), (0.0, 0.0, END_OVERRIDE_DURATION)]);
        assert!(!bridge.is_active());
    }
}
