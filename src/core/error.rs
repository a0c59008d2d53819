use thiserror::Error;

/// Why a transition was refused. A rejected transition leaves the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("not enough gems: need {needed}, have {available}")]
    InsufficientGems { needed: u64, available: u64 },
    #[error("not enough shiny gems: need {needed}, have {available}")]
    InsufficientShinyGems { needed: u64, available: u64 },
    #[error("not enough Hugoland fragments: need {needed}, have {available}")]
    InsufficientFragments { needed: u32, available: u32 },
    #[error("no skill points available")]
    NoSkillPoints,
    #[error("no item with id {0}")]
    UnknownItem(String),
    #[error("item {0} is equipped")]
    ItemEquipped(String),
    #[error("item {0} is already equipped")]
    AlreadyEquipped(String),
    #[error("item {0} is not equipped")]
    NotEquipped(String),
    #[error("not in combat")]
    NotInCombat,
    #[error("already in combat")]
    AlreadyInCombat,
    #[error("no adventure skill selection is open")]
    NoSkillSelection,
    #[error("an adventure skill selection is still open")]
    SkillSelectionOpen,
    #[error("no adventure skill offer with id {0}")]
    UnknownSkill(String),
    #[error("skip card is not available")]
    SkipCardUnavailable,
    #[error("level {level} is below the prestige requirement of {required}")]
    PrestigeLocked { level: u32, required: u32 },
    #[error("no reward is waiting to be claimed")]
    NothingToClaim,
    #[error("no merchant reward with id {0}")]
    UnknownReward(String),
    #[error("garden is already planted")]
    AlreadyPlanted,
    #[error("amount must be positive")]
    InvalidAmount,
}
