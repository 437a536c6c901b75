//! Controller orders layered over the action machine.

mod common;

use common::{FakeWorld, mob_at, player_at, think};
use mob_ai::{
    ActionState, AiCommand, AiConfig, AiProfile, FightMode, MobAi, MobId, OrderState, Point, Tick,
};

/// A pet (mob 1) controlled by player 10.
fn pet_world() -> FakeWorld {
    let mut world = FakeWorld::new();
    let mut pet = mob_at(1, 0, 0);
    pet.controller = Some(MobId(10));
    world.insert(pet);
    world.insert(player_at(10, 5, 5));
    world
}

fn pet() -> MobAi {
    MobAi::new(MobId(1), AiProfile::new(FightMode::AGGRESSOR), AiConfig::new())
}

#[test]
fn come_travels_then_holds() {
    let mut world = pet_world();
    let mut ai = pet();
    let mut out = Vec::new();
    ai.give_order(MobId(10), OrderState::Come, None, Tick(0), &mut out);
    assert!(out.contains(&AiCommand::ForgiveAggressor(MobId(10))));

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Travel(Point::new(5, 5))));

    // The pet arrives next to the controller.
    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(5, 4);
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Halt));
    assert_eq!(ai.order(), OrderState::Stay);
}

#[test]
fn follow_keeps_pace_with_the_controller() {
    let mut world = pet_world();
    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Follow, None, Tick(0), &mut Vec::new());

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Approach(MobId(10))));

    // Close enough: no movement command.
    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(5, 4);
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Halt));
    assert_eq!(ai.order(), OrderState::Follow);
}

#[test]
fn attack_order_engages_and_stands_down_on_kill() {
    let mut world = pet_world();
    world.insert(player_at(7, 2, 0));
    let mut ai = pet();

    let mut out = Vec::new();
    ai.give_order(MobId(10), OrderState::Attack, Some(MobId(7)), Tick(0), &mut out);
    assert!(out.contains(&AiCommand::Engage(MobId(7))));

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Approach(MobId(7))));

    world.mobs.get_mut(&MobId(7)).unwrap().alive = false;
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Disengage));
    assert!(out.contains(&AiCommand::Halt));
    assert_eq!(ai.order(), OrderState::None);
    assert_eq!(ai.combatant(), None);
}

#[test]
fn guard_fights_the_principals_live_aggressor() {
    let mut world = pet_world();
    world.insert(player_at(7, 1, 1));
    world.attack(MobId(7), MobId(10));

    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Guard, None, Tick(0), &mut Vec::new());

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Engage(MobId(7))));
    assert!(out.contains(&AiCommand::Approach(MobId(7))));

    // The aggression resolves; the pet returns to the principal's side.
    world.aggressors.clear();
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Disengage));
    assert!(out.contains(&AiCommand::Approach(MobId(10))));
    assert_eq!(ai.combatant(), None);
}

#[test]
fn guard_ignores_expired_and_unperceivable_aggressors() {
    let mut world = pet_world();
    let mut lurker = player_at(7, 1, 1);
    lurker.hidden = true;
    world.insert(lurker);
    world.attack(MobId(7), MobId(10));

    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Guard, None, Tick(0), &mut Vec::new());

    let out = think(&mut ai, &world, 100);
    assert!(!out.contains(&AiCommand::Engage(MobId(7))));
    assert_eq!(ai.combatant(), None);
}

#[test]
fn stop_cancels_combat_and_movement() {
    let mut world = pet_world();
    world.insert(player_at(7, 2, 0));
    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Attack, Some(MobId(7)), Tick(0), &mut Vec::new());
    think(&mut ai, &world, 100);
    assert_eq!(ai.combatant(), Some(MobId(7)));

    let mut out = Vec::new();
    ai.give_order(MobId(10), OrderState::Stop, None, Tick(200), &mut out);
    assert!(out.contains(&AiCommand::Disengage));
    assert!(out.contains(&AiCommand::Halt));
    assert_eq!(ai.combatant(), None);

    let out = think(&mut ai, &world, 300);
    assert_eq!(out, vec![AiCommand::Halt]);
}

#[test]
fn urgent_orders_switch_to_the_engaged_interval() {
    let profile = AiProfile::new(FightMode::AGGRESSOR).with_intervals(200, 800);
    let mut ai = MobAi::new(MobId(1), profile, AiConfig::new());
    assert_eq!(ai.current_interval(), 800);

    ai.give_order(MobId(10), OrderState::Follow, None, Tick(0), &mut Vec::new());
    assert_eq!(ai.current_interval(), 200);

    ai.give_order(MobId(10), OrderState::Stay, None, Tick(100), &mut Vec::new());
    assert_eq!(ai.current_interval(), 800);
}

#[test]
fn new_orders_cancel_pending_investigations() {
    let mut world = pet_world();
    // An uncontrolled phase recorded an investigation first.
    world.mobs.get_mut(&MobId(1)).unwrap().controller = None;
    world.insert(player_at(2, 4, 0));
    world.block_sight(Point::new(0, 0), Point::new(4, 0));
    world.planned.insert(
        (Point::new(0, 0), Point::new(4, 0)),
        vec![mob_ai::Direction::East; 4],
    );

    let mut ai = MobAi::new(MobId(1), AiProfile::new(FightMode::ALL), AiConfig::new());
    think(&mut ai, &world, 0);
    assert!(!ai.memories().investigations.is_empty());

    ai.give_order(MobId(10), OrderState::Come, None, Tick(100), &mut Vec::new());
    assert!(ai.memories().investigations.is_empty());

    // Back under control: the order machine runs, not the replay.
    world.mobs.get_mut(&MobId(1)).unwrap().controller = Some(MobId(10));
    let out = think(&mut ai, &world, 1_000);
    assert!(out.contains(&AiCommand::Travel(Point::new(5, 5))));
}

#[test]
fn patrol_cycles_the_route() {
    let mut world = pet_world();
    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Patrol, None, Tick(0), &mut Vec::new());
    ai.set_patrol_route([Point::new(3, 0), Point::new(0, 3)]);

    let out = think(&mut ai, &world, 100);
    assert!(out.contains(&AiCommand::Travel(Point::new(3, 0))));

    // Reaching the first beacon rotates the route to the second.
    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(3, 0);
    let out = think(&mut ai, &world, 200);
    assert!(out.contains(&AiCommand::Travel(Point::new(0, 3))));

    // And back to the first after the second.
    world.mobs.get_mut(&MobId(1)).unwrap().position = Point::new(0, 3);
    let out = think(&mut ai, &world, 300);
    assert!(out.contains(&AiCommand::Travel(Point::new(3, 0))));
}

#[test]
fn release_falls_through_to_autonomous_behavior() {
    let mut world = pet_world();
    world.insert(player_at(7, 1, 0));
    world.attack(MobId(7), MobId(1));

    let mut ai = pet();
    ai.give_order(MobId(10), OrderState::Release, None, Tick(0), &mut Vec::new());

    // Still flagged as controlled in the world, but Release runs the action
    // machine, which scans and engages the aggressor.
    let out = think(&mut ai, &world, 1_000);
    assert!(out.contains(&AiCommand::Engage(MobId(7))));
    assert_eq!(ai.action(), ActionState::Combat);
}
