// Host loop timing
pub const INPUT_POLL_MS: u64 = 50;

// Round timing
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
pub const ROUND_BASE_SECONDS: u32 = 35;
pub const ROUND_MIN_SECONDS: u32 = 20;
pub const ADVANCE_DELAY_MS: u64 = 2000;
pub const FEEDBACK_CLEAR_MS: u64 = 3000;

// Number generation
pub const MIN_NUMBER_COUNT: usize = 4;
pub const MAX_NUMBER_COUNT: usize = 6;
pub const LEVELS_PER_EXTRA_NUMBER: u32 = 3;
pub const EASY_TIER_MAX_LEVEL: u32 = 3;
pub const MEDIUM_TIER_MAX_LEVEL: u32 = 6;

// Scoring: 100 + time_left * 2 + level * 10 + streak * 5
pub const BASE_POINTS: u64 = 100;
pub const TIME_BONUS_PER_SECOND: u64 = 2;
pub const LEVEL_BONUS_PER_LEVEL: u64 = 10;
pub const STREAK_BONUS_PER_STREAK: u64 = 5;
pub const ANSWER_TOLERANCE: f64 = 0.001;

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 5;
pub const DEFAULT_PLAYER_NAME: &str = "You";
