//! Fixed simulation constants.
//!
//! Tunable numbers (per-wave scaling, timings, drop rates) live in
//! [`crate::config::BalanceConfig`]; the values here are structural.

/// Nominal host frame rate (Hz). Used only for the default tick length.
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest delta-time a single tick may integrate. Longer host stalls are clamped.
pub const MAX_DT: f64 = 0.1;

// --- Player ---

/// Player collision radius.
pub const PLAYER_RADIUS: f64 = 16.0;

/// Ceiling for armor ("blue health").
pub const ARMOR_CAP: f64 = 100.0;

/// Upper bound on cooldown reduction.
pub const MAX_COOLDOWN_REDUCTION: f64 = 0.75;

/// Minimum seconds between two enemy-projectile hits on the player.
pub const PLAYER_HIT_DEBOUNCE_SECS: f64 = 0.1;

/// Fraction of enemy damage dealt per second of continuous body contact.
pub const CONTACT_DAMAGE_FACTOR: f64 = 0.5;

// --- Projectiles ---

/// Projectiles farther than this from the player are culled.
pub const PROJECTILE_CULL_DISTANCE: f64 = 1600.0;

/// Homing projectile turn rate (radians per second).
pub const HOMING_TURN_RATE: f64 = 2.5;

// --- Enemy auras and explosions ---

/// Strong-enemy shield aura radius.
pub const SHIELD_AURA_RADIUS: f64 = 160.0;

/// Radius within which a Weak explosion damages the player.
pub const WEAK_EXPLOSION_RADIUS: f64 = 90.0;

/// Explosion damage as a multiple of the Weak enemy's contact damage.
pub const WEAK_EXPLOSION_DAMAGE_FACTOR: f64 = 2.0;

/// Berserker triggers once health drops below this fraction of max.
pub const BERSERKER_HEALTH_THRESHOLD: f64 = 0.7;

/// Berserker size multiplier.
pub const BERSERKER_SIZE_MULTIPLIER: f64 = 1.3;

/// Berserker movement speed multiplier.
pub const BERSERKER_SPEED_MULTIPLIER: f64 = 1.5;

// --- Split children ---

pub const SPLIT_HEALTH_FRACTION: f64 = 0.4;
pub const SPLIT_SPEED_FRACTION: f64 = 1.2;
pub const SPLIT_DAMAGE_FRACTION: f64 = 0.5;
pub const SPLIT_SIZE_FRACTION: f64 = 0.6;
/// Radius of the ring split children spawn on.
pub const SPLIT_RING_RADIUS: f64 = 40.0;

// --- Spawning ---

/// Number of spawn directions around the viewport.
pub const SPAWN_DIRECTIONS: usize = 8;

/// Probability a spawn comes from the side opposite the player's aim.
pub const SPAWN_OPPOSITE_AIM_BIAS: f64 = 0.7;

/// Distance beyond the camera edge where spawns are placed.
pub const SPAWN_MARGIN: f64 = 60.0;

/// Maximum extra random distance added to spawn placement.
pub const SPAWN_JITTER: f64 = 80.0;

/// Enemies farther than this multiple of the viewport diagonal are relocated.
pub const TELEPORT_DIAGONAL_FACTOR: f64 = 1.5;

/// Maximum lateral offset when relocating a far enemy behind the player.
pub const TELEPORT_LATERAL_JITTER: f64 = 250.0;

// --- Pickups ---

/// Extra reach around the player for collecting pickups.
pub const PICKUP_REACH: f64 = 10.0;

/// Pickup bobbing animation speed (radians per second).
pub const PICKUP_ANIM_SPEED: f64 = 4.0;
