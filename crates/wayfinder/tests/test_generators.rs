//! Lifted/grounded agreement and grounding-cache behavior.

mod common;

use common::{applicable_set, build_generator, ferry, gripper, GeneratorKind};
use wayfinder::{GeneratorOps, LiftedGenerator, MinimalEventHandler, StateRepository};

#[test]
fn test_generators_agree_on_applicable_actions() {
    let fixtures: [fn() -> common::Fixture; 2] = [|| gripper(2), || ferry(2)];
    for fixture_fn in fixtures {
        let mut lifted = build_generator(fixture_fn(), GeneratorKind::Lifted);
        let mut grounded = build_generator(fixture_fn(), GeneratorKind::Grounded);

        let mut lifted_repo = StateRepository::new();
        let mut grounded_repo = StateRepository::new();
        let lifted_initial = lifted_repo.initial_state(&mut lifted).unwrap();
        let grounded_initial = grounded_repo.initial_state(&mut grounded).unwrap();

        let lifted_set = applicable_set(&mut lifted, &lifted_repo, lifted_initial);
        let grounded_set = applicable_set(&mut grounded, &grounded_repo, grounded_initial);
        assert_eq!(lifted_set, grounded_set);
        assert!(!lifted_set.is_empty());

        // Walk the same action on both sides and compare again one level
        // down, for every applicable action of the initial state.
        for step in &lifted_set {
            let mut lifted_actions = Vec::new();
            lifted
                .applicable_actions(lifted_repo.data(lifted_initial), &mut lifted_actions)
                .unwrap();
            let lifted_action = lifted_actions
                .iter()
                .copied()
                .find(|&a| wayfinder::search::format_ground_action(&lifted, a) == *step)
                .unwrap();

            let mut grounded_actions = Vec::new();
            grounded
                .applicable_actions(grounded_repo.data(grounded_initial), &mut grounded_actions)
                .unwrap();
            let grounded_action = grounded_actions
                .iter()
                .copied()
                .find(|&a| wayfinder::search::format_ground_action(&grounded, a) == *step)
                .unwrap();

            let lifted_successor =
                lifted_repo.successor_state(lifted_initial, lifted_action, &mut lifted);
            let grounded_successor =
                grounded_repo.successor_state(grounded_initial, grounded_action, &mut grounded);

            assert_eq!(
                applicable_set(&mut lifted, &lifted_repo, lifted_successor),
                applicable_set(&mut grounded, &grounded_repo, grounded_successor),
                "diverged after {step}"
            );
        }
    }
}

#[test]
fn test_generators_agree_on_successor_fluents() {
    let mut lifted = build_generator(gripper(2), GeneratorKind::Lifted);
    let mut grounded = build_generator(gripper(2), GeneratorKind::Grounded);

    let mut lifted_repo = StateRepository::new();
    let mut grounded_repo = StateRepository::new();
    let lifted_initial = lifted_repo.initial_state(&mut lifted).unwrap();
    let grounded_initial = grounded_repo.initial_state(&mut grounded).unwrap();

    // The two generators share no factories, but gripper interns its ground
    // atoms in the same order, so fluent bitsets are comparable.
    assert_eq!(
        lifted_repo.data(lifted_initial).fluent,
        grounded_repo.data(grounded_initial).fluent
    );
}

#[test]
fn test_grounding_cache_is_idempotent() {
    let fixture = gripper(1);
    let handler = wayfinder::search::shared(MinimalEventHandler::new());
    let mut generator =
        LiftedGenerator::new(fixture.problem, fixture.factories, handler.clone()).unwrap();

    let schema = generator.problem().domain.actions[0];
    let rooma = generator
        .factories()
        .object(wayfinder::ObjectId::new(0))
        .clone();
    assert_eq!(rooma.name, "rooma");

    let binding = vec![wayfinder::ObjectId::new(0), wayfinder::ObjectId::new(1)];
    let first = generator.ground_action(schema, binding.clone()).unwrap();
    let second = generator.ground_action(schema, binding).unwrap();

    assert_eq!(first, second);
    let statistics = handler.borrow().statistics().clone();
    assert_eq!(statistics.ground_action_cache_misses, 1);
    assert_eq!(statistics.ground_action_cache_hits, 1);
}

#[test]
fn test_repeated_queries_reuse_groundings() {
    let fixture = gripper(1);
    let handler = wayfinder::search::shared(MinimalEventHandler::new());
    let mut generator =
        LiftedGenerator::new(fixture.problem, fixture.factories, handler.clone()).unwrap();
    let mut repository = StateRepository::new();
    let initial = repository.initial_state(&mut generator).unwrap();

    let mut first = Vec::new();
    generator
        .applicable_actions(repository.data(initial), &mut first)
        .unwrap();
    let misses_after_first = handler.borrow().statistics().ground_action_cache_misses;

    let mut second = Vec::new();
    generator
        .applicable_actions(repository.data(initial), &mut second)
        .unwrap();

    assert_eq!(first, second);
    // The second query grounds nothing new.
    let statistics = handler.borrow().statistics().clone();
    assert_eq!(statistics.ground_action_cache_misses, misses_after_first);
    assert!(statistics.ground_action_cache_hits >= first.len() as u64);
}
