use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub zone: u32,
    #[serde(default)]
    pub is_poisoned: bool,
    #[serde(default)]
    pub poison_turns: u32,
}

impl Enemy {
    pub fn new(name: String, zone: u32, max_hp: u32, atk: u32, def: u32) -> Self {
        Self {
            name,
            hp: max_hp,
            max_hp,
            atk,
            def,
            zone,
            is_poisoned: false,
            poison_turns: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn apply_poison(&mut self, turns: u32) {
        self.is_poisoned = true;
        self.poison_turns = turns;
    }
}

/// Where the player is in the combat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    NotInCombat,
    SelectingSkill,
    InCombat,
}

/// How a combat run ended on this turn, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Victory,
    Defeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enemy_starts_at_full_hp() {
        let enemy = Enemy::new("Slime".to_string(), 3, 40, 8, 2);
        assert_eq!(enemy.hp, 40);
        assert_eq!(enemy.max_hp, 40);
        assert!(enemy.is_alive());
        assert!(!enemy.is_poisoned);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut enemy = Enemy::new("Slime".to_string(), 1, 10, 1, 0);
        enemy.take_damage(25);
        assert_eq!(enemy.hp, 0);
        assert!(!enemy.is_alive());
    }
}
