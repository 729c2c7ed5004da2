//! ImpulseSet - одно-тиковые edges
//!
//! Event impulses (vision, touched, object_broken, player_aggressive, state_ended)
//! живут ровно один тик: `end_tick` чистит их в конце КАЖДОГО тика.
//!
//! state_started - latch: взводится transition'ом (в т.ч. поздно в тике N) и
//! снимается только когда entry logic нового состояния его съест (тик N+1).

/// Набор impulses одного контроллера
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpulseSet {
    /// Кто-то из игроков попал в vision trigger
    pub vision: bool,
    /// Игрок физически коснулся Robe
    pub touched: bool,
    /// Сломалась отслеживаемая ценность
    pub object_broken: bool,
    /// Видимый игрок держит оружие
    pub player_aggressive: bool,
    /// Exit logic текущего состояния должна отработать в этом тике
    pub state_ended: bool,
    state_started: bool,
}

impl ImpulseSet {
    /// Начальный набор: entry logic стартового состояния ещё не отработала
    pub fn armed() -> Self {
        Self {
            state_started: true,
            ..Default::default()
        }
    }

    pub fn state_started(&self) -> bool {
        self.state_started
    }

    pub fn arm_state_started(&mut self) {
        self.state_started = true;
    }

    /// true ровно один раз после transition
    pub fn consume_state_started(&mut self) -> bool {
        std::mem::take(&mut self.state_started)
    }

    /// Конец тика: event impulses сбрасываются, state_started - нет
    pub fn end_tick(&mut self) {
        self.vision = false;
        self.touched = false;
        self.object_broken = false;
        self.player_aggressive = false;
        self.state_ended = false;
    }

    pub fn any_event(&self) -> bool {
        self.vision || self.touched || self.object_broken || self.player_aggressive || self.state_ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_impulses_do_not_leak_into_next_tick() {
        let mut impulses = ImpulseSet::default();
        impulses.vision = true;
        impulses.touched = true;
        impulses.object_broken = true;
        impulses.player_aggressive = true;
        impulses.state_ended = true;

        impulses.end_tick();

        assert!(!impulses.any_event());
    }

    #[test]
    fn test_state_started_is_one_shot() {
        let mut impulses = ImpulseSet::armed();
        impulses.end_tick();
        assert!(impulses.state_started(), "latch переживает границу тика");

        assert!(impulses.consume_state_started());
        assert!(!impulses.consume_state_started());
    }
}
