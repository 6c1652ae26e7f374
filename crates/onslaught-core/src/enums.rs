//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    /// Fast, fragile, explodes on death or contact.
    Weak,
    /// Ranged shooter.
    #[default]
    Normal,
    /// Tank with a shield aura, charged shot and berserker mode. Splits on death.
    Strong,
    /// Elite. Lightning chains plus the globally exclusive major attack.
    Lazer,
}

impl EnemyType {
    pub const ALL: [EnemyType; 4] = [
        EnemyType::Weak,
        EnemyType::Normal,
        EnemyType::Strong,
        EnemyType::Lazer,
    ];
}

/// Player weapon archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    /// Single accurate shot.
    #[default]
    Pistol,
    /// Three-pellet narrow spread.
    Shotgun,
    /// Melee swing: zero-velocity piercing hitbox, one tick.
    Sword,
    /// Small-spread automatic.
    Smg,
    /// Long-range piercing shot.
    Sniper,
    /// High-rate automatic with wide spread.
    Minigun,
}

/// Weapon rarity tier. Scales base damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn damage_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.15,
            Rarity::Epic => 1.3,
            Rarity::Legendary => 1.5,
        }
    }
}

/// Timed player ability archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    /// Blocks every player damage path.
    Shield,
    /// Multiplies player projectile damage.
    DamageBoost,
    /// Multiplies player movement speed.
    SpeedBoost,
    /// Ignites enemies near the player.
    FireRing,
    /// Slows every enemy.
    TimeFreeze,
}

impl AbilityType {
    pub const ALL: [AbilityType; 5] = [
        AbilityType::Shield,
        AbilityType::DamageBoost,
        AbilityType::SpeedBoost,
        AbilityType::FireRing,
        AbilityType::TimeFreeze,
    ];
}

/// Permanent stat upgrades offered between waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatBoost {
    MaxHealth,
    Damage,
    AttackSpeed,
    MovementSpeed,
    ProjectileSize,
    Knockback,
    CooldownReduction,
}

impl StatBoost {
    pub const ALL: [StatBoost; 7] = [
        StatBoost::MaxHealth,
        StatBoost::Damage,
        StatBoost::AttackSpeed,
        StatBoost::MovementSpeed,
        StatBoost::ProjectileSize,
        StatBoost::Knockback,
        StatBoost::CooldownReduction,
    ];
}

/// A single power-up candidate: a stat boost or a new ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PowerUp {
    Stat(StatBoost),
    Ability(AbilityType),
}

/// Wave lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    InProgress,
    Completed,
    PowerUpSelection,
}

/// Beam category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamKind {
    /// Bounce-chained path, one hit per instance.
    Lightning,
    /// Major-attack beam: band with a warm-up and lateral knockback.
    #[default]
    Energy,
    /// Legacy laser: one-sided band with continuous damage.
    Laser,
}

/// Pickup category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Ammo,
    Vest,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Paused,
    GameOver,
}
