//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz). One step per rendered frame at 60 fps.
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width in pixels.
pub const ARENA_WIDTH: f64 = 1280.0;

/// Arena height in pixels.
pub const ARENA_HEIGHT: f64 = 720.0;

/// Projectiles further than this outside the arena are retired.
pub const OOB_MARGIN: f64 = 50.0;

/// Left edge of the castle wall.
pub const CASTLE_X: f64 = 50.0;

/// Width of the castle wall.
pub const CASTLE_WIDTH: f64 = 100.0;

// --- Defender ---

/// Defender (tower) left edge. Sits on the castle's right edge.
pub const DEFENDER_X: f64 = CASTLE_X + CASTLE_WIDTH;

pub const DEFENDER_WIDTH: f64 = 50.0;
pub const DEFENDER_HEIGHT: f64 = 50.0;

/// Starting damage per projectile (4 hits kill a 100 hp attacker).
pub const DEFENDER_BASE_DAMAGE: f64 = 25.0;

/// Starting time between volleys (ms).
pub const DEFENDER_BASE_ATTACK_INTERVAL_MS: f64 = 1000.0;

/// Starting projectiles per volley.
pub const DEFENDER_BASE_MULTISHOT: u32 = 1;

/// Starting critical hit chance.
pub const DEFENDER_BASE_CRIT_CHANCE: f64 = 0.1;

/// Starting critical damage multiplier.
pub const DEFENDER_BASE_CRIT_MULTIPLIER: f64 = 1.5;

/// Starting projectile speed (px/step).
pub const DEFENDER_BASE_PROJECTILE_SPEED: f64 = 10.0;

/// Starting fortification health.
pub const FORTIFICATION_MAX_HEALTH: f64 = 100.0;
/// Fraction of fortification health below which a critical alert fires.
pub const FORTIFICATION_LOW_FRACTION: f64 = 0.25;

/// Vertical gap between parallel projectiles of one volley (px).
pub const MULTISHOT_SPREAD: f64 = 10.0;

// --- Defender stat clamps ---

pub const MIN_ATTACK_INTERVAL_MS: f64 = 100.0;
pub const MAX_ATTACK_INTERVAL_MS: f64 = 5000.0;
pub const MAX_MULTISHOT: u32 = 5;
pub const MIN_DAMAGE: f64 = 1.0;
pub const MIN_CRIT_MULTIPLIER: f64 = 1.0;
pub const MIN_PROJECTILE_SPEED: f64 = 5.0;
pub const MAX_PROJECTILE_SPEED: f64 = 30.0;

// --- Projectile ---

pub const PROJECTILE_WIDTH: f64 = 10.0;
pub const PROJECTILE_HEIGHT: f64 = 4.0;

// --- Attacker ---

pub const ATTACKER_BASE_WIDTH: f64 = 40.0;
pub const ATTACKER_BASE_HEIGHT: f64 = 40.0;
pub const ATTACKER_BASE_HEALTH: f64 = 100.0;
pub const ATTACKER_BASE_DAMAGE: f64 = 10.0;

/// Base lateral speed magnitude (px/step). Attackers move toward -x.
pub const ATTACKER_BASE_SPEED: f64 = 1.0;

/// Size/health/damage growth per wave (+10% per wave).
pub const ATTACKER_GROWTH_PER_WAVE: f64 = 0.1;

/// Vertical oscillation amplitude (px).
pub const ATTACKER_OSCILLATION_AMPLITUDE: f64 = 20.0;

/// Oscillation phase advance per step for regular attackers (rad/step).
pub const ATTACKER_PHASE_STEP: f64 = 0.05;

/// Oscillation phase advance per step for bosses (rad/step).
pub const BOSS_PHASE_STEP: f64 = 0.02;

/// Top of the spawn band (px).
pub const SPAWN_BAND_TOP: f64 = 50.0;

/// Spawn band height is the arena height minus this margin.
pub const SPAWN_BAND_MARGIN: f64 = 140.0;

// --- Boss ---

pub const BOSS_SIZE_MULTIPLIER: f64 = 2.0;
pub const BOSS_HEALTH_MULTIPLIER: f64 = 3.0;
pub const BOSS_DAMAGE_MULTIPLIER: f64 = 3.0;
pub const BOSS_SPEED_MULTIPLIER: f64 = 0.7;

/// Steps a depleted boss spends fading before removal.
pub const BOSS_FADE_STEPS: u32 = 60;

// --- Waves ---

/// Attackers in wave 1.
pub const WAVE_BASE_COUNT: u32 = 3;

/// Extra attackers per cleared boss interval.
pub const WAVE_COUNT_INCREMENT: u32 = 1;

/// Every Nth wave is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// Base delay between spawns (ms).
pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Spawn delay reduction per wave (ms).
pub const SPAWN_INTERVAL_DECAY_MS: f64 = 50.0;

/// Spawn delay floor (ms).
pub const SPAWN_INTERVAL_FLOOR_MS: f64 = 1000.0;

// --- Difficulty scaling ---

/// Regular attacker speed bonus per cleared boss interval.
pub const DIFFICULTY_SPEED_STEP: f64 = 0.2;
pub const DIFFICULTY_SPEED_CAP: f64 = 1.0;

/// Regular attacker health bonus per cleared boss interval.
pub const DIFFICULTY_HEALTH_STEP: f64 = 0.3;
pub const DIFFICULTY_HEALTH_CAP: f64 = 2.0;

// --- Rewards ---

pub const SCORE_PER_KILL: u64 = 10;
pub const SCORE_PER_BOSS_KILL: u64 = 100;
pub const CURRENCY_PER_KILL: u32 = 10;
pub const CURRENCY_PER_BOSS_KILL: u32 = 50;

// --- Cards ---

/// Cards offered after each wave.
pub const CARDS_PER_OFFER: usize = 3;

/// Card cost by rarity: common, rare, epic, legendary.
pub const CARD_COSTS: [u32; 4] = [30, 60, 100, 150];

/// Rarity roll weights on regular waves (common..legendary).
pub const RARITY_WEIGHTS_NORMAL: [f64; 4] = [0.65, 0.25, 0.09, 0.01];

/// Rarity roll weights on boss waves (common..legendary).
pub const RARITY_WEIGHTS_BOSS: [f64; 4] = [0.40, 0.35, 0.20, 0.05];

/// How long a skip-penalty notice stays on screen (ms).
pub const PENALTY_NOTICE_MS: f64 = 3000.0;

// --- Effects ---

pub const DAMAGE_NUMBER_RISE: f64 = -3.0;
pub const DAMAGE_NUMBER_GRAVITY: f64 = 0.1;
pub const DAMAGE_NUMBER_DECAY: f64 = 0.02;

// --- Session ---

pub const MAX_NICKNAME_LEN: usize = 24;
pub const ANONYMOUS_NICKNAME: &str = "anonymous";
