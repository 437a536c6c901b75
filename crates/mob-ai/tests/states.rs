//! The non-default action states entered through the public mutators.

mod common;

use common::{FakeWorld, mob_at, player_at, think};
use mob_ai::{
    ActionState, AiCommand, AiConfig, AiProfile, Direction, FightMode, MobAi, MobId, Point, Tick,
};

fn lone_mob() -> (FakeWorld, MobAi) {
    let mut world = FakeWorld::new();
    world.insert(mob_at(1, 0, 0));
    let ai = MobAi::new(
        MobId(1),
        AiProfile::new(FightMode::AGGRESSOR),
        AiConfig::new(),
    );
    (world, ai)
}

#[test]
fn navigate_consumes_beacons_then_returns_to_wander() {
    let (mut world, mut ai) = lone_mob();
    ai.navigate_to([Point::new(3, 0), Point::new(3, 3)], Tick(0));
    assert_eq!(ai.action(), ActionState::Navigate);

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Travel(Point::new(3, 0))));

    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(3, 0);
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Travel(Point::new(3, 3))));

    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(3, 3);
    think(&mut ai, &world, 300);
    assert_eq!(ai.action(), ActionState::Wander);
}

#[test]
fn hunt_pursues_without_a_visibility_requirement() {
    let (mut world, mut ai) = lone_mob();
    world.insert(player_at(2, 5, 0));
    world.attack(MobId(2), MobId(1));

    think(&mut ai, &world, 0);
    assert_eq!(ai.combatant(), Some(MobId(2)));

    ai.set_action(ActionState::Hunt, Tick(100));
    // Hidden targets break combat but not a hunt.
    world.mobs.get_mut(&MobId(2)).unwrap().hidden = true;
    let out = think(&mut ai, &world, 200);
    assert_eq!(ai.action(), ActionState::Hunt);
    assert!(out.contains(&AiCommand::Approach(MobId(2))));
}

#[test]
fn chase_follows_the_focus_without_engaging() {
    let (mut world, mut ai) = lone_mob();
    world.insert(player_at(2, 4, 0));

    ai.set_action(ActionState::Chase, Tick(0));
    ai.set_focus(Some(MobId(2)));

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Approach(MobId(2))));
    assert!(!out.iter().any(|c| matches!(c, AiCommand::Engage(_))));

    world.mobs.remove(&MobId(2));
    think(&mut ai, &world, 200);
    assert_eq!(ai.action(), ActionState::Wander);
}

#[test]
fn interact_holds_while_the_focus_remains() {
    let (mut world, mut ai) = lone_mob();
    world.insert(player_at(2, 1, 0));

    ai.set_action(ActionState::Interact, Tick(0));
    ai.set_focus(Some(MobId(2)));

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Halt));
    assert_eq!(ai.action(), ActionState::Interact);

    world.mobs.get_mut(&MobId(2)).unwrap().deleted = true;
    think(&mut ai, &world, 200);
    assert_eq!(ai.action(), ActionState::Wander);
}

#[test]
fn backoff_steps_away_until_out_of_engage_range() {
    let (mut world, mut ai) = lone_mob();
    world.insert(player_at(2, 1, 0));

    ai.set_action(ActionState::Backoff, Tick(0));
    ai.set_focus(Some(MobId(2)));

    // Crowded: one step directly away from the focus.
    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Move(Direction::West)));

    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(-2, 0);
    think(&mut ai, &world, 200);
    assert_eq!(ai.action(), ActionState::Wander);
}
