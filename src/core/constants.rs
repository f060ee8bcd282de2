// Player baseline
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";
pub const STARTING_LOCATION: &str = "Mystic Forest";
pub const BASE_MAX_HP: i32 = 100;
pub const BASE_SKILL_VALUE: i32 = 3;
pub const STARTING_SILVER: i32 = 0;

// Combat rolls (all percentage checks roll 1..=100 against a threshold)
pub const PERCENT_ROLL_MIN: i32 = 1;
pub const PERCENT_ROLL_MAX: i32 = 100;
pub const INSIGHT_CHANCE_PER_WISDOM: i32 = 2;
pub const INSIGHT_FLAT_BONUS: i32 = 2;
pub const FLEE_CHANCE_PER_AGILITY: i32 = 4;
pub const DODGE_AGILITY_OFFSET: i32 = 20;
pub const ATTACK_DIE_MIN: i32 = 1;
pub const ATTACK_DIE_MAX: i32 = 6;
pub const ENEMY_DAMAGE_VARIANCE_MIN: i32 = -1;
pub const ENEMY_DAMAGE_VARIANCE_MAX: i32 = 2;

// Encounter generation
pub const MIN_LOCATION_ITEMS: usize = 1;
pub const MAX_LOCATION_ITEMS: usize = 3;
pub const MAX_LOCATION_ENEMIES: usize = 2;
pub const SAFE_ZONE_CHANCE: f64 = 0.15;
pub const QUEST_OFFER_CHANCE: f64 = 0.2;

// Safe zone services
pub const INN_SUB_LOCATION: &str = "Inn";
pub const SHRINE_SUB_LOCATION: &str = "Shrine";
pub const INN_REST_COST: i32 = 10;

// Save system
pub const SAVE_VERSION: u32 = 2;
pub const SAVE_FILE_PREFIX: &str = "save_";
pub const SAVE_FILE_EXTENSION: &str = "json";
pub const MAX_SAVE_SLOT_LEN: usize = 32;

// Definition files
pub const DEFAULT_DATA_DIR: &str = "defins";
pub const ITEMS_FILE: &str = "items.json";
pub const ENEMIES_FILE: &str = "enemies.json";
pub const QUESTS_FILE: &str = "quests.json";
