use glam::Vec3;
use serde::Serialize;

use crate::constants::*;

/// Position component - world coordinates, y is up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Distance on the ground plane (x/z), ignoring height
    pub fn planar_distance(&self, other: Vec3) -> f32 {
        planar_distance(self.0, other)
    }
}

/// Distance between two points projected onto the ground plane
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Health component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, never dropping below zero
    pub fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).clamp(0, self.max);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

/// Mana component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mana {
    pub current: i32,
    pub max: i32,
}

impl Mana {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// Experience component - cumulative experience and the level derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub total: u32,
    pub level: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self { total: 0, level: 1 }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

/// The six crafting resources a player can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Iron,
    Leather,
    Crystal,
    Gold,
    DragonScale,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Wood,
        ResourceKind::Iron,
        ResourceKind::Leather,
        ResourceKind::Crystal,
        ResourceKind::Gold,
        ResourceKind::DragonScale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Wood => "Wood",
            ResourceKind::Iron => "Iron",
            ResourceKind::Leather => "Leather",
            ResourceKind::Crystal => "Crystal",
            ResourceKind::Gold => "Gold",
            ResourceKind::DragonScale => "Dragon Scale",
        }
    }

    fn index(self) -> usize {
        match self {
            ResourceKind::Wood => 0,
            ResourceKind::Iron => 1,
            ResourceKind::Leather => 2,
            ResourceKind::Crystal => 3,
            ResourceKind::Gold => 4,
            ResourceKind::DragonScale => 5,
        }
    }
}

/// Resource inventory component - one counter per resource kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    counts: [u32; 6],
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(amounts: &[(ResourceKind, u32)]) -> Self {
        let mut resources = Self::new();
        resources.add_all(amounts);
        resources
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn add_all(&mut self, amounts: &[(ResourceKind, u32)]) {
        for &(kind, amount) in amounts {
            self.add(kind, amount);
        }
    }

    /// First resource in `costs` that cannot be paid, with the shortfall details
    pub fn first_shortfall(&self, costs: &[(ResourceKind, u32)]) -> Option<(ResourceKind, u32, u32)> {
        costs
            .iter()
            .find(|(kind, needed)| self.get(*kind) < *needed)
            .map(|&(kind, needed)| (kind, needed, self.get(kind)))
    }

    pub fn can_afford(&self, costs: &[(ResourceKind, u32)]) -> bool {
        self.first_shortfall(costs).is_none()
    }

    /// Deduct every cost at once. Nothing is deducted unless all are affordable.
    pub fn try_spend(&mut self, costs: &[(ResourceKind, u32)]) -> bool {
        if !self.can_afford(costs) {
            return false;
        }
        for &(kind, amount) in costs {
            self.counts[kind.index()] -= amount;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }
}

/// Equipment slot an item occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Shield,
}

impl EquipmentSlot {
    /// Slot implied by an item name
    pub fn from_item_name(name: &str) -> Option<Self> {
        if name.contains("Shield") {
            Some(EquipmentSlot::Shield)
        } else if name.contains("Armor") {
            Some(EquipmentSlot::Armor)
        } else if name.contains("Sword") || name.contains("Blade") {
            Some(EquipmentSlot::Weapon)
        } else {
            None
        }
    }
}

/// Equipment component - names of the equipped catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Equipment {
    pub weapon: &'static str,
    pub armor: &'static str,
    pub shield: &'static str,
}

impl Equipment {
    pub fn starter() -> Self {
        Self {
            weapon: crate::systems::item_defs::STARTER_WEAPON,
            armor: crate::systems::item_defs::STARTER_ARMOR,
            shield: crate::systems::item_defs::STARTER_SHIELD,
        }
    }

    pub fn equip(&mut self, slot: EquipmentSlot, name: &'static str) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = name,
            EquipmentSlot::Armor => self.armor = name,
            EquipmentSlot::Shield => self.shield = name,
        }
    }
}

/// Held movement keys, one flag per compass direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Combat flags and timestamps for the player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatStatus {
    pub attacking: bool,
    pub dodging: bool,
    pub invulnerable: bool,
    /// Game time of the last accepted attack, if any
    pub last_attack_time: Option<f64>,
}

/// Dragon marker + attack scheduling state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragonAi {
    /// Advances by one per attack; used modulo the pattern list
    pub pattern_cursor: u32,
    /// Seconds until the next attack
    pub cooldown: f32,
}

impl DragonAi {
    pub fn new(cooldown: f32) -> Self {
        Self {
            pattern_cursor: 0,
            cooldown,
        }
    }
}

/// The four dragon attack patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Fireball,
    Breath,
    Aoe,
    Charge,
}

/// How an attack decides whether it connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResolution {
    /// Travels toward its aim point, hits on arrival
    Projectile,
    /// Stationary marker, checked once on expiry
    AreaOnExpiry,
}

impl AttackKind {
    /// Round-robin order the dragon cycles through
    pub const PATTERNS: [AttackKind; 4] = [
        AttackKind::Fireball,
        AttackKind::Breath,
        AttackKind::Aoe,
        AttackKind::Charge,
    ];

    pub fn from_cursor(cursor: u32) -> Self {
        Self::PATTERNS[(cursor % Self::PATTERNS.len() as u32) as usize]
    }

    pub fn duration(&self) -> f32 {
        match self {
            AttackKind::Fireball => FIREBALL_DURATION,
            AttackKind::Breath => BREATH_DURATION,
            AttackKind::Aoe => AOE_DURATION,
            AttackKind::Charge => CHARGE_DURATION,
        }
    }

    pub fn resolution(&self) -> HitResolution {
        match self {
            AttackKind::Aoe => HitResolution::AreaOnExpiry,
            AttackKind::Fireball | AttackKind::Breath | AttackKind::Charge => {
                HitResolution::Projectile
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::Fireball => "fireball",
            AttackKind::Breath => "breath",
            AttackKind::Aoe => "aoe",
            AttackKind::Charge => "charge",
        }
    }
}

/// An in-flight dragon attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attack {
    /// Session-unique serial
    pub id: u64,
    pub kind: AttackKind,
    pub origin: Vec3,
    /// Player position when the attack was fired; never re-aimed
    pub target: Vec3,
    pub spawn_time: f64,
    pub duration: f32,
    pub damage: i32,
}

impl Attack {
    /// Share of the flight completed at `now`, clamped to [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.spawn_time) as f32 / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated position of a travelling attack at `now`
    pub fn position_at(&self, now: f64) -> Vec3 {
        self.origin.lerp(self.target, self.progress(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps_at_zero() {
        let mut health = Health::new(100);
        health.take_damage(250);
        assert_eq!(health.current, 0);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_health_ignores_negative_damage() {
        let mut health = Health::new(100);
        health.take_damage(-40);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health { current: 90, max: 100 };
        health.heal(50);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_try_spend_is_all_or_nothing() {
        let mut resources = Resources::with(&[(ResourceKind::Iron, 5), (ResourceKind::Wood, 1)]);
        let spent = resources.try_spend(&[(ResourceKind::Iron, 5), (ResourceKind::Wood, 2)]);
        assert!(!spent);
        assert_eq!(resources.get(ResourceKind::Iron), 5);
        assert_eq!(resources.get(ResourceKind::Wood), 1);
    }

    #[test]
    fn test_first_shortfall_reports_details() {
        let resources = Resources::with(&[(ResourceKind::Iron, 2)]);
        let shortfall = resources.first_shortfall(&[(ResourceKind::Iron, 5)]);
        assert_eq!(shortfall, Some((ResourceKind::Iron, 5, 2)));
    }

    #[test]
    fn test_slot_from_item_name() {
        assert_eq!(EquipmentSlot::from_item_name("Iron Sword"), Some(EquipmentSlot::Weapon));
        assert_eq!(EquipmentSlot::from_item_name("Crystal Blade"), Some(EquipmentSlot::Weapon));
        assert_eq!(EquipmentSlot::from_item_name("Iron Armor"), Some(EquipmentSlot::Armor));
        assert_eq!(EquipmentSlot::from_item_name("Iron Shield"), Some(EquipmentSlot::Shield));
        assert_eq!(EquipmentSlot::from_item_name("Potion"), None);
    }

    #[test]
    fn test_pattern_cycle_wraps() {
        assert_eq!(AttackKind::from_cursor(0), AttackKind::Fireball);
        assert_eq!(AttackKind::from_cursor(2), AttackKind::Aoe);
        assert_eq!(AttackKind::from_cursor(5), AttackKind::Breath);
    }

    #[test]
    fn test_attack_position_interpolates() {
        let attack = Attack {
            id: 1,
            kind: AttackKind::Fireball,
            origin: Vec3::ZERO,
            target: Vec3::new(10.0, 0.0, 0.0),
            spawn_time: 1.0,
            duration: 2.0,
            damage: 20,
        };
        assert_eq!(attack.position_at(2.0), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(attack.position_at(10.0), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, 0.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
