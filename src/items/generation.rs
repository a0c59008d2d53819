//! Procedural content: gear, relics, enemies and chest odds.
//!
//! The engine only talks to [`ContentGenerator`]; [`StandardContent`] is the
//! shipped table-driven implementation and tests substitute fixed content.

use super::types::{Armor, Rarity, RelicItem, Weapon};
use crate::combat::types::Enemy;
use rand::Rng;

pub trait ContentGenerator {
    fn generate_weapon<R: Rng>(&self, is_chest: bool, rarity: Rarity, rng: &mut R) -> Weapon;
    fn generate_armor<R: Rng>(&self, is_chest: bool, rarity: Rarity, rng: &mut R) -> Armor;
    fn generate_enemy<R: Rng>(&self, zone: u32, rng: &mut R) -> Enemy;
    fn generate_relic_item<R: Rng>(&self, rng: &mut R) -> RelicItem;
    /// Five weights (common..mythical) summing to 100.
    fn chest_rarity_weights(&self, cost: u64) -> [u32; 5];
}

/// Fresh item id drawn from the caller's RNG, so seeded runs stay reproducible.
pub fn new_item_id(rng: &mut impl Rng) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

/// Pick a rarity: roll `[0, 100)` and take the first bucket whose cumulative weight covers it.
pub fn roll_rarity(weights: &[u32; 5], rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>() * 100.0;
    let mut cumulative = 0.0;
    for (rarity, weight) in Rarity::ALL.iter().zip(weights) {
        cumulative += *weight as f64;
        if roll <= cumulative {
            return *rarity;
        }
    }
    Rarity::Common
}

const WEAPON_NAMES: [&str; 10] = [
    "Sword", "Axe", "Mace", "Spear", "Dagger", "Bow", "Staff", "Hammer", "Scythe", "Rapier",
];

const ARMOR_NAMES: [&str; 8] = [
    "Chestplate", "Chainmail", "Robe", "Brigandine", "Cuirass", "Hauberk", "Tunic", "Aegis",
];

const RELICS: [(&str, &str, bool); 8] = [
    ("Blade of Yojef", "An ancient blade humming with power", true),
    ("Crown of Wisdom", "Sharpens the wearer's mind and shield", false),
    ("Fang of the Void", "Cuts through any defense", true),
    ("Shell of Eternity", "Hardened by a thousand years of tides", false),
    ("Spear of Dawn", "Strikes with the first light", true),
    ("Mirror Ward", "Turns aside hostile intent", false),
    ("Stormcaller Edge", "Crackles with captured lightning", true),
    ("Titan's Bulwark", "Forged for giants", false),
];

const ENEMY_NAMES: [[&str; 4]; 5] = [
    ["Slime", "Goblin", "Wild Boar", "Bandit"],
    ["Skeleton", "Orc Raider", "Dire Wolf", "Cultist"],
    ["Troll", "Wraith", "Harpy", "Stone Golem"],
    ["Wyvern", "Lich", "Demon Knight", "Basilisk"],
    ["Ancient Dragon", "Void Titan", "Abyssal Lord", "Elder Hydra"],
];

fn rarity_prefix(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "Iron",
        Rarity::Rare => "Steel",
        Rarity::Epic => "Enchanted",
        Rarity::Legendary => "Heroic",
        Rarity::Mythical => "Mythic",
    }
}

fn weapon_atk_range(rarity: Rarity) -> (u32, u32) {
    match rarity {
        Rarity::Common => (10, 20),
        Rarity::Rare => (20, 35),
        Rarity::Epic => (35, 55),
        Rarity::Legendary => (55, 80),
        Rarity::Mythical => (80, 120),
    }
}

fn armor_def_range(rarity: Rarity) -> (u32, u32) {
    match rarity {
        Rarity::Common => (5, 10),
        Rarity::Rare => (10, 18),
        Rarity::Epic => (18, 28),
        Rarity::Legendary => (28, 40),
        Rarity::Mythical => (40, 60),
    }
}

fn base_upgrade_cost(rarity: Rarity) -> u64 {
    match rarity {
        Rarity::Common => 5,
        Rarity::Rare => 10,
        Rarity::Epic => 20,
        Rarity::Legendary => 40,
        Rarity::Mythical => 80,
    }
}

fn sell_price(rarity: Rarity) -> u64 {
    match rarity {
        Rarity::Common => 25,
        Rarity::Rare => 60,
        Rarity::Epic => 150,
        Rarity::Legendary => 400,
        Rarity::Mythical => 1000,
    }
}

/// Chest items roll from the upper half of their rarity's range.
fn roll_stat((min, max): (u32, u32), is_chest: bool, rng: &mut impl Rng) -> u32 {
    let low = if is_chest { min + (max - min) / 2 } else { min };
    rng.gen_range(low..=max)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardContent;

impl ContentGenerator for StandardContent {
    fn generate_weapon<R: Rng>(&self, is_chest: bool, rarity: Rarity, rng: &mut R) -> Weapon {
        let base = WEAPON_NAMES[rng.gen_range(0..WEAPON_NAMES.len())];
        Weapon {
            id: new_item_id(rng),
            name: format!("{} {}", rarity_prefix(rarity), base),
            rarity,
            level: 1,
            base_atk: roll_stat(weapon_atk_range(rarity), is_chest, rng),
            upgrade_cost: base_upgrade_cost(rarity),
            sell_price: sell_price(rarity),
        }
    }

    fn generate_armor<R: Rng>(&self, is_chest: bool, rarity: Rarity, rng: &mut R) -> Armor {
        let base = ARMOR_NAMES[rng.gen_range(0..ARMOR_NAMES.len())];
        Armor {
            id: new_item_id(rng),
            name: format!("{} {}", rarity_prefix(rarity), base),
            rarity,
            level: 1,
            base_def: roll_stat(armor_def_range(rarity), is_chest, rng),
            upgrade_cost: base_upgrade_cost(rarity),
            sell_price: sell_price(rarity),
        }
    }

    fn generate_enemy<R: Rng>(&self, zone: u32, rng: &mut R) -> Enemy {
        let zone = zone.max(1);
        let tier = (((zone - 1) / 10) as usize).min(ENEMY_NAMES.len() - 1);
        let names = ENEMY_NAMES[tier];
        let name = names[rng.gen_range(0..names.len())].to_string();

        let steps = (zone - 1) as f64;
        let max_hp = 50.0 * 1.2f64.powf(steps) + 10.0 * zone as f64;
        let atk = 10.0 * 1.15f64.powf(steps) + 2.0 * zone as f64;
        let def = 2.0 * 1.12f64.powf(steps) + zone as f64;

        // `as` saturates for out-of-range floats.
        Enemy::new(
            name,
            zone,
            max_hp.floor() as u32,
            atk.floor() as u32,
            def.floor() as u32,
        )
    }

    fn generate_relic_item<R: Rng>(&self, rng: &mut R) -> RelicItem {
        let (name, description, offensive) = RELICS[rng.gen_range(0..RELICS.len())];
        let rarity = if rng.gen::<f64>() < 0.8 {
            Rarity::Legendary
        } else {
            Rarity::Mythical
        };
        let cost = match rarity {
            Rarity::Mythical => rng.gen_range(100..=200),
            _ => rng.gen_range(50..=100),
        };
        let (base_atk, base_def) = if offensive {
            (Some(rng.gen_range(60..=100)), None)
        } else {
            (None, Some(rng.gen_range(40..=70)))
        };

        RelicItem {
            id: new_item_id(rng),
            name: name.to_string(),
            description: description.to_string(),
            rarity,
            level: 1,
            cost,
            base_atk,
            base_def,
            upgrade_cost: cost / 2,
        }
    }

    fn chest_rarity_weights(&self, cost: u64) -> [u32; 5] {
        match cost {
            0..=99 => [70, 20, 8, 2, 0],
            100..=499 => [50, 30, 15, 4, 1],
            500..=999 => [30, 35, 25, 8, 2],
            1000..=2499 => [15, 30, 35, 15, 5],
            _ => [5, 20, 35, 28, 12],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_chest_weights_sum_to_100() {
        for cost in [0, 50, 100, 499, 500, 999, 1000, 2499, 2500, 1_000_000] {
            let weights = StandardContent.chest_rarity_weights(cost);
            assert_eq!(weights.iter().sum::<u32>(), 100, "cost {cost}");
        }
    }

    #[test]
    fn test_cheap_chest_never_mythical() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let weights = StandardContent.chest_rarity_weights(10);
        for _ in 0..2000 {
            assert_ne!(roll_rarity(&weights, &mut rng), Rarity::Mythical);
        }
    }

    #[test]
    fn test_enemy_scaling_zone_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let enemy = StandardContent.generate_enemy(1, &mut rng);
        assert_eq!(enemy.max_hp, 60);
        assert_eq!(enemy.atk, 12);
        assert_eq!(enemy.def, 3);
        assert_eq!(enemy.hp, enemy.max_hp);
        assert_eq!(enemy.zone, 1);
    }

    #[test]
    fn test_enemy_stats_grow_with_zone() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let early = StandardContent.generate_enemy(5, &mut rng);
        let late = StandardContent.generate_enemy(25, &mut rng);
        assert!(late.max_hp > early.max_hp);
        assert!(late.atk > early.atk);
        assert!(late.def > early.def);
    }

    #[test]
    fn test_chest_weapon_rolls_upper_half() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..100 {
            let weapon = StandardContent.generate_weapon(true, Rarity::Rare, &mut rng);
            assert!((27..=35).contains(&weapon.base_atk));
            assert_eq!(weapon.level, 1);
        }
    }

    #[test]
    fn test_relic_has_exactly_one_stat() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..50 {
            let relic = StandardContent.generate_relic_item(&mut rng);
            assert!(relic.base_atk.is_some() != relic.base_def.is_some());
            assert!(relic.cost >= 50);
        }
    }

    #[test]
    fn test_item_ids_reproducible_from_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(21);
        let mut b = ChaCha8Rng::seed_from_u64(21);
        assert_eq!(new_item_id(&mut a), new_item_id(&mut b));
        assert_ne!(new_item_id(&mut a), new_item_id(&mut a));
    }
}
