use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
    Mythical = 4,
}

impl Rarity {
    /// All rarities in weight-table order (common..mythical).
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythical => "Mythical",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Which equipment collection an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearKind {
    Weapon,
    Armor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub level: u32,
    pub base_atk: u32,
    pub upgrade_cost: u64,
    pub sell_price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub level: u32,
    pub base_def: u32,
    pub upgrade_cost: u64,
    pub sell_price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub level: u32,
    /// Market price in gems.
    pub cost: u64,
    #[serde(default)]
    pub base_atk: Option<u32>,
    #[serde(default)]
    pub base_def: Option<u32>,
    pub upgrade_cost: u64,
}

/// Result of opening a chest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChestReward {
    Weapon { item: Weapon, bonus_gems: u64 },
    Armor { item: Armor, bonus_gems: u64 },
}

impl ChestReward {
    pub fn kind(&self) -> GearKind {
        match self {
            ChestReward::Weapon { .. } => GearKind::Weapon,
            ChestReward::Armor { .. } => GearKind::Armor,
        }
    }

    pub fn item_id(&self) -> &str {
        match self {
            ChestReward::Weapon { item, .. } => &item.id,
            ChestReward::Armor { item, .. } => &item.id,
        }
    }

    pub fn bonus_gems(&self) -> u64 {
        match self {
            ChestReward::Weapon { bonus_gems, .. } | ChestReward::Armor { bonus_gems, .. } => {
                *bonus_gems
            }
        }
    }
}

/// Player-owned gear. Equipped slots reference items by id and never hold copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
    pub relics: Vec<RelicItem>,
    pub current_weapon: Option<String>,
    pub current_armor: Option<String>,
    pub equipped_relics: Vec<String>,
}

impl Inventory {
    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn armor_piece(&self, id: &str) -> Option<&Armor> {
        self.armor.iter().find(|a| a.id == id)
    }

    pub fn relic(&self, id: &str) -> Option<&RelicItem> {
        self.relics.iter().find(|r| r.id == id)
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.current_weapon.as_deref().and_then(|id| self.weapon(id))
    }

    pub fn equipped_armor(&self) -> Option<&Armor> {
        self.current_armor.as_deref().and_then(|id| self.armor_piece(id))
    }

    pub fn is_relic_equipped(&self, id: &str) -> bool {
        self.equipped_relics.iter().any(|r| r == id)
    }

    /// True if the id is referenced by any equipped slot.
    pub fn is_equipped(&self, id: &str) -> bool {
        self.current_weapon.as_deref() == Some(id)
            || self.current_armor.as_deref() == Some(id)
            || self.is_relic_equipped(id)
    }
}
