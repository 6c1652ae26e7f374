//! Projectile descriptors and the two projectile collections.
//!
//! Attack emitters (player weapons, enemy attacks) produce `ProjectileSpec`s;
//! the store assigns ids and owns the live projectiles.

use onslaught_core::entities::{Projectile, ProjectileFlags};
use onslaught_core::enums::ProjectileOwner;
use onslaught_core::types::{Position, Velocity};

/// A projectile waiting to be adopted by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
    pub size: f64,
    pub flags: ProjectileFlags,
    pub knockback: f64,
    pub range: f64,
}

impl ProjectileSpec {
    fn into_projectile(self, id: u32, owner: ProjectileOwner) -> Projectile {
        Projectile {
            id,
            owner,
            position: self.position,
            velocity: self.velocity,
            damage: self.damage,
            size: self.size,
            flags: self.flags,
            knockback: self.knockback,
            range: self.range,
            travelled: 0.0,
            hit_enemies: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProjectileStore {
    pub player: Vec<Projectile>,
    pub enemy: Vec<Projectile>,
    next_id: u32,
}

impl ProjectileStore {
    /// Assign ids and move the specs into the owner's collection.
    pub fn adopt(&mut self, owner: ProjectileOwner, specs: impl IntoIterator<Item = ProjectileSpec>) {
        for spec in specs {
            self.next_id += 1;
            let projectile = spec.into_projectile(self.next_id, owner);
            match owner {
                ProjectileOwner::Player => self.player.push(projectile),
                ProjectileOwner::Enemy => self.enemy.push(projectile),
            }
        }
    }

    pub fn clear(&mut self) {
        self.player.clear();
        self.enemy.clear();
    }
}
