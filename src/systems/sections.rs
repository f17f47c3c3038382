//! Résumé stations, section unlocks and station rewards.

use glam::Vec3;
use hecs::{Entity, World};
use log::info;
use serde::Serialize;

use crate::components::{Experience, Health, Mana, ResourceKind};
use crate::constants::*;
use crate::error::{BattleGateError, RewardError};
use crate::events::{EventQueue, GameEvent};
use crate::systems::experience::{apply_level_ups, grant_xp};
use crate::systems::inventory::add_resources;

/// The four résumé sections, one per station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    About,
    Experience,
    Skills,
    Projects,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Experience,
        Section::Skills,
        Section::Projects,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
        }
    }

    /// Where this section's station stands in the exploration world
    pub fn station_position(&self) -> Vec3 {
        match self {
            Section::About => Vec3::new(-10.0, 0.0, -10.0),
            Section::Experience => Vec3::new(10.0, 0.0, -10.0),
            Section::Skills => Vec3::new(-10.0, 0.0, 10.0),
            Section::Projects => Vec3::new(10.0, 0.0, 10.0),
        }
    }

    /// Resources handed out when this station's reward is claimed
    pub fn reward_resources(&self) -> &'static [(ResourceKind, u32)] {
        match self {
            Section::About => &[(ResourceKind::Wood, 5), (ResourceKind::Leather, 4)],
            Section::Experience => &[(ResourceKind::Iron, 8), (ResourceKind::Gold, 2)],
            Section::Skills => &[(ResourceKind::Crystal, 5), (ResourceKind::Iron, 4)],
            Section::Projects => &[(ResourceKind::DragonScale, 3), (ResourceKind::Leather, 4)],
        }
    }
}

/// Which sections have been revealed and which rewards taken
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionProgress {
    /// Append-only, deduplicated, in unlock order
    unlocked: Vec<Section>,
    claimed: Vec<Section>,
}

impl SectionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlocked(&self) -> &[Section] {
        &self.unlocked
    }

    pub fn claimed(&self) -> &[Section] {
        &self.claimed
    }

    pub fn is_unlocked(&self, section: Section) -> bool {
        self.unlocked.contains(&section)
    }

    pub fn is_claimed(&self, section: Section) -> bool {
        self.claimed.contains(&section)
    }
}

/// Reveal a section. Returns false if it was already revealed.
pub fn unlock_section(progress: &mut SectionProgress, section: Section, events: &mut EventQueue) -> bool {
    if progress.is_unlocked(section) {
        return false;
    }
    progress.unlocked.push(section);
    info!("Unlocked section {}", section.title());
    events.push(GameEvent::SectionUnlocked { section });
    true
}

/// Claim a station's reward: experience (with level-ups) plus its resource bundle.
/// Returns the number of levels gained.
pub fn claim_reward(
    world: &mut World,
    player_entity: Entity,
    progress: &mut SectionProgress,
    section: Section,
    events: &mut EventQueue,
) -> Result<u32, RewardError> {
    if !progress.is_unlocked(section) {
        return Err(RewardError::SectionLocked(section));
    }
    if progress.is_claimed(section) {
        return Err(RewardError::AlreadyClaimed(section));
    }
    progress.claimed.push(section);

    add_resources(world, player_entity, section.reward_resources());
    events.push(GameEvent::RewardClaimed {
        section,
        experience: SECTION_REWARD_XP,
    });

    Ok(grant_player_xp(world, player_entity, SECTION_REWARD_XP, events))
}

/// Grant XP to the player, applying stat growth for any levels gained
pub fn grant_player_xp(world: &mut World, player_entity: Entity, amount: u32, events: &mut EventQueue) -> u32 {
    let Ok((exp, health, mana)) =
        world.query_one_mut::<(&mut Experience, &mut Health, &mut Mana)>(player_entity)
    else {
        return 0;
    };

    let gained = grant_xp(exp, amount);
    if gained > 0 {
        apply_level_ups(health, mana, gained);
        info!("Reached level {} ({} xp)", exp.level, exp.total);
        events.push(GameEvent::LevelUp { new_level: exp.level });
    }
    gained
}

/// Whether the dragon may be challenged, and why not if it may not
pub fn battle_gate(progress: &SectionProgress, level: u32) -> Result<(), BattleGateError> {
    if progress.unlocked.len() < BATTLE_REQUIRED_SECTIONS {
        return Err(BattleGateError::SectionsMissing {
            unlocked: progress.unlocked.len(),
            required: BATTLE_REQUIRED_SECTIONS,
        });
    }
    if level < BATTLE_REQUIRED_LEVEL {
        return Err(BattleGateError::LevelTooLow {
            level,
            required: BATTLE_REQUIRED_LEVEL,
        });
    }
    Ok(())
}

pub fn ready_for_battle(progress: &SectionProgress, level: u32) -> bool {
    battle_gate(progress, level).is_ok()
}

/// Closest station within interaction range of `position`
pub fn nearby_station(position: Vec3) -> Option<Section> {
    Section::ALL
        .iter()
        .map(|section| {
            let d = crate::components::planar_distance(position, section.station_position());
            (*section, d)
        })
        .filter(|(_, d)| *d <= STATION_INTERACT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(section, _)| section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Player, Resources};

    fn spawn_player(world: &mut World) -> Entity {
        world.spawn((
            Player,
            Health::new(PLAYER_STARTING_HEALTH),
            Mana::new(PLAYER_STARTING_MANA),
            Experience::new(),
            Resources::new(),
        ))
    }

    #[test]
    fn test_unlock_is_deduplicated() {
        let mut progress = SectionProgress::new();
        let mut events = EventQueue::new();
        assert!(unlock_section(&mut progress, Section::Skills, &mut events));
        assert!(!unlock_section(&mut progress, Section::Skills, &mut events));
        assert_eq!(progress.unlocked(), &[Section::Skills]);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_ready_for_battle_all_combinations() {
        for sections in 0..=4 {
            for level in 1..=6 {
                let mut progress = SectionProgress::new();
                let mut events = EventQueue::new();
                for section in Section::ALL.iter().take(sections) {
                    unlock_section(&mut progress, *section, &mut events);
                }
                let expected = sections >= 4 && level >= 5;
                assert_eq!(
                    ready_for_battle(&progress, level),
                    expected,
                    "sections={} level={}",
                    sections,
                    level
                );
            }
        }
    }

    #[test]
    fn test_claim_requires_unlock() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let mut progress = SectionProgress::new();
        let mut events = EventQueue::new();

        let result = claim_reward(&mut world, player, &mut progress, Section::About, &mut events);
        assert_eq!(result, Err(RewardError::SectionLocked(Section::About)));
    }

    #[test]
    fn test_claim_grants_xp_and_resources_once() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let mut progress = SectionProgress::new();
        let mut events = EventQueue::new();
        unlock_section(&mut progress, Section::Experience, &mut events);

        let gained = claim_reward(&mut world, player, &mut progress, Section::Experience, &mut events);
        assert_eq!(gained, Ok(1));
        {
            let exp = world.get::<&Experience>(player).unwrap();
            assert_eq!(exp.level, 2);
            let resources = world.get::<&Resources>(player).unwrap();
            assert_eq!(resources.get(ResourceKind::Iron), 8);
            let health = world.get::<&Health>(player).unwrap();
            assert_eq!(health.max, PLAYER_STARTING_HEALTH + LEVEL_UP_HEALTH_BONUS);
        }

        let again = claim_reward(&mut world, player, &mut progress, Section::Experience, &mut events);
        assert_eq!(again, Err(RewardError::AlreadyClaimed(Section::Experience)));
        assert_eq!(world.get::<&Experience>(player).unwrap().total, SECTION_REWARD_XP);
    }

    #[test]
    fn test_all_rewards_reach_battle_level() {
        let mut world = World::new();
        let player = spawn_player(&mut world);
        let mut progress = SectionProgress::new();
        let mut events = EventQueue::new();
        for section in Section::ALL {
            unlock_section(&mut progress, section, &mut events);
            claim_reward(&mut world, player, &mut progress, section, &mut events).unwrap();
        }
        let level = world.get::<&Experience>(player).unwrap().level;
        assert_eq!(level, BATTLE_REQUIRED_LEVEL);
        assert!(ready_for_battle(&progress, level));
    }

    #[test]
    fn test_nearby_station() {
        assert_eq!(nearby_station(Vec3::new(-9.0, 0.0, -9.0)), Some(Section::About));
        assert_eq!(nearby_station(Vec3::ZERO), None);
    }
}
