//! Shared problem fixtures for the end-to-end tests.
//!
//! Problems are assembled directly against the factories, the way the
//! parser front end would hand them to the engine.

#![allow(dead_code)]

use std::collections::BTreeSet;

use wayfinder::search::shared;
use wayfinder::{
    ActionSchemaData, BreadthFirstSearch, CategoryStore, Domain, Factories, Fluent,
    FunctionExpression, Generator, GeneratorOps, GroundLiteralId, LiteralId, MinimalEventHandler,
    ObjectId, Plan, PredicateId, Problem, SearchStatus, StateId, StateRepository, Static,
    Statistics, Term,
};

pub struct Fixture {
    pub problem: Problem,
    pub factories: Factories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Lifted,
    Grounded,
}

pub const BOTH_KINDS: [GeneratorKind; 2] = [GeneratorKind::Lifted, GeneratorKind::Grounded];

// =============================================================================
// Small construction helpers
// =============================================================================

pub fn lit<C: CategoryStore>(
    factories: &mut Factories,
    predicate: PredicateId<C>,
    terms: Vec<Term>,
    negated: bool,
) -> LiteralId<C> {
    let atom = factories.get_or_create_atom(predicate, terms);
    factories.get_or_create_literal(atom, negated)
}

pub fn ground_lit<C: CategoryStore>(
    factories: &mut Factories,
    predicate: PredicateId<C>,
    objects: Vec<ObjectId>,
    negated: bool,
) -> GroundLiteralId<C> {
    let atom = factories.get_or_create_ground_atom(predicate, objects);
    factories.get_or_create_ground_literal(atom, negated)
}

pub fn var(term: wayfinder::VariableId) -> Term {
    Term::Variable(term)
}

// =============================================================================
// Gripper: one robot with two grippers moves balls between two rooms
// =============================================================================

pub fn gripper(num_balls: usize) -> Fixture {
    let mut f = Factories::new();

    let room: PredicateId<Static> = f.get_or_create_predicate("room", 1);
    let ball: PredicateId<Static> = f.get_or_create_predicate("ball", 1);
    let gripper: PredicateId<Static> = f.get_or_create_predicate("gripper", 1);
    let at_robby: PredicateId<Fluent> = f.get_or_create_predicate("at-robby", 1);
    let at: PredicateId<Fluent> = f.get_or_create_predicate("at", 2);
    let free: PredicateId<Fluent> = f.get_or_create_predicate("free", 1);
    let carry: PredicateId<Fluent> = f.get_or_create_predicate("carry", 2);
    let equality = f.equality_predicate();

    // move(from, to)
    let move_id = {
        let from = f.get_or_create_variable("from", 0);
        let to = f.get_or_create_variable("to", 1);
        let pre_room_from = lit(&mut f, room, vec![var(from)], false);
        let pre_room_to = lit(&mut f, room, vec![var(to)], false);
        let pre_distinct = lit(&mut f, equality, vec![var(from), var(to)], true);
        let pre_at_from = lit(&mut f, at_robby, vec![var(from)], false);
        let add_at_to = lit(&mut f, at_robby, vec![var(to)], false);
        let del_at_from = lit(&mut f, at_robby, vec![var(from)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "move".into(),
            original_arity: 2,
            parameters: vec![from, to],
            static_conditions: vec![pre_room_from, pre_room_to, pre_distinct],
            fluent_conditions: vec![pre_at_from],
            derived_conditions: vec![],
            strips_effects: vec![add_at_to, del_at_from],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // pick(obj, loc, grip)
    let pick_id = {
        let obj = f.get_or_create_variable("obj", 0);
        let loc = f.get_or_create_variable("loc", 1);
        let grip = f.get_or_create_variable("grip", 2);
        let pre_ball = lit(&mut f, ball, vec![var(obj)], false);
        let pre_room = lit(&mut f, room, vec![var(loc)], false);
        let pre_gripper = lit(&mut f, gripper, vec![var(grip)], false);
        let pre_at = lit(&mut f, at, vec![var(obj), var(loc)], false);
        let pre_robby = lit(&mut f, at_robby, vec![var(loc)], false);
        let pre_free = lit(&mut f, free, vec![var(grip)], false);
        let add_carry = lit(&mut f, carry, vec![var(obj), var(grip)], false);
        let del_at = lit(&mut f, at, vec![var(obj), var(loc)], true);
        let del_free = lit(&mut f, free, vec![var(grip)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "pick".into(),
            original_arity: 3,
            parameters: vec![obj, loc, grip],
            static_conditions: vec![pre_ball, pre_room, pre_gripper],
            fluent_conditions: vec![pre_at, pre_robby, pre_free],
            derived_conditions: vec![],
            strips_effects: vec![add_carry, del_at, del_free],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // drop(obj, loc, grip)
    let drop_id = {
        let obj = f.get_or_create_variable("obj", 0);
        let loc = f.get_or_create_variable("loc", 1);
        let grip = f.get_or_create_variable("grip", 2);
        let pre_ball = lit(&mut f, ball, vec![var(obj)], false);
        let pre_room = lit(&mut f, room, vec![var(loc)], false);
        let pre_gripper = lit(&mut f, gripper, vec![var(grip)], false);
        let pre_carry = lit(&mut f, carry, vec![var(obj), var(grip)], false);
        let pre_robby = lit(&mut f, at_robby, vec![var(loc)], false);
        let add_at = lit(&mut f, at, vec![var(obj), var(loc)], false);
        let add_free = lit(&mut f, free, vec![var(grip)], false);
        let del_carry = lit(&mut f, carry, vec![var(obj), var(grip)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "drop".into(),
            original_arity: 3,
            parameters: vec![obj, loc, grip],
            static_conditions: vec![pre_ball, pre_room, pre_gripper],
            fluent_conditions: vec![pre_carry, pre_robby],
            derived_conditions: vec![],
            strips_effects: vec![add_at, add_free, del_carry],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    let rooma = f.get_or_create_object("rooma");
    let roomb = f.get_or_create_object("roomb");
    let left = f.get_or_create_object("left");
    let right = f.get_or_create_object("right");
    let balls: Vec<ObjectId> = (1..=num_balls)
        .map(|i| f.get_or_create_object(&format!("ball{i}")))
        .collect();

    let mut objects = vec![rooma, roomb, left, right];
    objects.extend(&balls);

    let mut static_initial = vec![
        ground_lit(&mut f, room, vec![rooma], false),
        ground_lit(&mut f, room, vec![roomb], false),
        ground_lit(&mut f, gripper, vec![left], false),
        ground_lit(&mut f, gripper, vec![right], false),
    ];
    for &b in &balls {
        static_initial.push(ground_lit(&mut f, ball, vec![b], false));
    }

    let mut fluent_initial = vec![
        ground_lit(&mut f, at_robby, vec![rooma], false),
        ground_lit(&mut f, free, vec![left], false),
        ground_lit(&mut f, free, vec![right], false),
    ];
    for &b in &balls {
        fluent_initial.push(ground_lit(&mut f, at, vec![b, rooma], false));
    }

    let fluent_goal = balls
        .iter()
        .map(|&b| ground_lit(&mut f, at, vec![b, roomb], false))
        .collect();

    let problem = Problem {
        name: format!("gripper-{num_balls}"),
        domain: Domain {
            name: "gripper".into(),
            static_predicates: vec![room, ball, gripper],
            fluent_predicates: vec![at_robby, at, free, carry],
            derived_predicates: vec![],
            function_skeletons: vec![],
            actions: vec![move_id, pick_id, drop_id],
        },
        objects,
        static_initial_literals: static_initial,
        fluent_initial_literals: fluent_initial,
        numeric_fluents: vec![],
        static_goal: vec![],
        fluent_goal,
        derived_goal: vec![],
        metric: None,
        axioms: vec![],
        static_atoms: Default::default(),
    }
    .finalize(&mut f)
    .unwrap();

    Fixture {
        problem,
        factories: f,
    }
}

// =============================================================================
// Ferry: a one-car ferry shuttles cars between two locations
// =============================================================================

pub fn ferry(num_cars: usize) -> Fixture {
    let mut f = Factories::new();

    let car: PredicateId<Static> = f.get_or_create_predicate("car", 1);
    let location: PredicateId<Static> = f.get_or_create_predicate("location", 1);
    let at: PredicateId<Fluent> = f.get_or_create_predicate("at", 2);
    let at_ferry: PredicateId<Fluent> = f.get_or_create_predicate("at-ferry", 1);
    let on: PredicateId<Fluent> = f.get_or_create_predicate("on", 1);
    let empty_ferry: PredicateId<Fluent> = f.get_or_create_predicate("empty-ferry", 0);
    let equality = f.equality_predicate();

    // board(c, l)
    let board_id = {
        let c = f.get_or_create_variable("c", 0);
        let l = f.get_or_create_variable("l", 1);
        let pre_car = lit(&mut f, car, vec![var(c)], false);
        let pre_location = lit(&mut f, location, vec![var(l)], false);
        let pre_at = lit(&mut f, at, vec![var(c), var(l)], false);
        let pre_ferry = lit(&mut f, at_ferry, vec![var(l)], false);
        let pre_empty = lit(&mut f, empty_ferry, vec![], false);
        let add_on = lit(&mut f, on, vec![var(c)], false);
        let del_at = lit(&mut f, at, vec![var(c), var(l)], true);
        let del_empty = lit(&mut f, empty_ferry, vec![], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "board".into(),
            original_arity: 2,
            parameters: vec![c, l],
            static_conditions: vec![pre_car, pre_location],
            fluent_conditions: vec![pre_at, pre_ferry, pre_empty],
            derived_conditions: vec![],
            strips_effects: vec![add_on, del_at, del_empty],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // sail(from, to)
    let sail_id = {
        let from = f.get_or_create_variable("from", 0);
        let to = f.get_or_create_variable("to", 1);
        let pre_loc_from = lit(&mut f, location, vec![var(from)], false);
        let pre_loc_to = lit(&mut f, location, vec![var(to)], false);
        let pre_distinct = lit(&mut f, equality, vec![var(from), var(to)], true);
        let pre_ferry = lit(&mut f, at_ferry, vec![var(from)], false);
        let add_ferry = lit(&mut f, at_ferry, vec![var(to)], false);
        let del_ferry = lit(&mut f, at_ferry, vec![var(from)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "sail".into(),
            original_arity: 2,
            parameters: vec![from, to],
            static_conditions: vec![pre_loc_from, pre_loc_to, pre_distinct],
            fluent_conditions: vec![pre_ferry],
            derived_conditions: vec![],
            strips_effects: vec![add_ferry, del_ferry],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // debark(c, l)
    let debark_id = {
        let c = f.get_or_create_variable("c", 0);
        let l = f.get_or_create_variable("l", 1);
        let pre_car = lit(&mut f, car, vec![var(c)], false);
        let pre_location = lit(&mut f, location, vec![var(l)], false);
        let pre_on = lit(&mut f, on, vec![var(c)], false);
        let pre_ferry = lit(&mut f, at_ferry, vec![var(l)], false);
        let add_at = lit(&mut f, at, vec![var(c), var(l)], false);
        let add_empty = lit(&mut f, empty_ferry, vec![], false);
        let del_on = lit(&mut f, on, vec![var(c)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "debark".into(),
            original_arity: 2,
            parameters: vec![c, l],
            static_conditions: vec![pre_car, pre_location],
            fluent_conditions: vec![pre_on, pre_ferry],
            derived_conditions: vec![],
            strips_effects: vec![add_at, add_empty, del_on],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    let l1 = f.get_or_create_object("l1");
    let l2 = f.get_or_create_object("l2");
    let cars: Vec<ObjectId> = (1..=num_cars)
        .map(|i| f.get_or_create_object(&format!("c{i}")))
        .collect();

    let mut objects = vec![l1, l2];
    objects.extend(&cars);

    let mut static_initial = vec![
        ground_lit(&mut f, location, vec![l1], false),
        ground_lit(&mut f, location, vec![l2], false),
    ];
    for &c in &cars {
        static_initial.push(ground_lit(&mut f, car, vec![c], false));
    }

    let mut fluent_initial = vec![
        ground_lit(&mut f, at_ferry, vec![l1], false),
        ground_lit(&mut f, empty_ferry, vec![], false),
    ];
    for &c in &cars {
        fluent_initial.push(ground_lit(&mut f, at, vec![c, l1], false));
    }

    let fluent_goal = cars
        .iter()
        .map(|&c| ground_lit(&mut f, at, vec![c, l2], false))
        .collect();

    let problem = Problem {
        name: format!("ferry-{num_cars}"),
        domain: Domain {
            name: "ferry".into(),
            static_predicates: vec![car, location],
            fluent_predicates: vec![at, at_ferry, on, empty_ferry],
            derived_predicates: vec![],
            function_skeletons: vec![],
            actions: vec![board_id, sail_id, debark_id],
        },
        objects,
        static_initial_literals: static_initial,
        fluent_initial_literals: fluent_initial,
        numeric_fluents: vec![],
        static_goal: vec![],
        fluent_goal,
        derived_goal: vec![],
        metric: None,
        axioms: vec![],
        static_atoms: Default::default(),
    }
    .finalize(&mut f)
    .unwrap();

    Fixture {
        problem,
        factories: f,
    }
}

// =============================================================================
// Blocks world, four operators
// =============================================================================

/// `layout` and `goal` list (block, support) pairs; a support of `"table"`
/// means the table.
pub fn blocks(names: &[&str], layout: &[(&str, &str)], goal: &[(&str, &str)]) -> Fixture {
    let mut f = Factories::new();

    let block: PredicateId<Static> = f.get_or_create_predicate("block", 1);
    let on: PredicateId<Fluent> = f.get_or_create_predicate("on", 2);
    let ontable: PredicateId<Fluent> = f.get_or_create_predicate("ontable", 1);
    let clear: PredicateId<Fluent> = f.get_or_create_predicate("clear", 1);
    let handempty: PredicateId<Fluent> = f.get_or_create_predicate("handempty", 0);
    let holding: PredicateId<Fluent> = f.get_or_create_predicate("holding", 1);

    // pickup(x)
    let pickup_id = {
        let x = f.get_or_create_variable("x", 0);
        let pre_block = lit(&mut f, block, vec![var(x)], false);
        let pre_clear = lit(&mut f, clear, vec![var(x)], false);
        let pre_ontable = lit(&mut f, ontable, vec![var(x)], false);
        let pre_handempty = lit(&mut f, handempty, vec![], false);
        let add_holding = lit(&mut f, holding, vec![var(x)], false);
        let del_ontable = lit(&mut f, ontable, vec![var(x)], true);
        let del_clear = lit(&mut f, clear, vec![var(x)], true);
        let del_handempty = lit(&mut f, handempty, vec![], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "pickup".into(),
            original_arity: 1,
            parameters: vec![x],
            static_conditions: vec![pre_block],
            fluent_conditions: vec![pre_clear, pre_ontable, pre_handempty],
            derived_conditions: vec![],
            strips_effects: vec![add_holding, del_ontable, del_clear, del_handempty],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // putdown(x)
    let putdown_id = {
        let x = f.get_or_create_variable("x", 0);
        let pre_block = lit(&mut f, block, vec![var(x)], false);
        let pre_holding = lit(&mut f, holding, vec![var(x)], false);
        let add_ontable = lit(&mut f, ontable, vec![var(x)], false);
        let add_clear = lit(&mut f, clear, vec![var(x)], false);
        let add_handempty = lit(&mut f, handempty, vec![], false);
        let del_holding = lit(&mut f, holding, vec![var(x)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "putdown".into(),
            original_arity: 1,
            parameters: vec![x],
            static_conditions: vec![pre_block],
            fluent_conditions: vec![pre_holding],
            derived_conditions: vec![],
            strips_effects: vec![add_ontable, add_clear, add_handempty, del_holding],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // stack(x, y)
    let stack_id = {
        let x = f.get_or_create_variable("x", 0);
        let y = f.get_or_create_variable("y", 1);
        let pre_block_x = lit(&mut f, block, vec![var(x)], false);
        let pre_block_y = lit(&mut f, block, vec![var(y)], false);
        let pre_holding = lit(&mut f, holding, vec![var(x)], false);
        let pre_clear_y = lit(&mut f, clear, vec![var(y)], false);
        let add_on = lit(&mut f, on, vec![var(x), var(y)], false);
        let add_clear_x = lit(&mut f, clear, vec![var(x)], false);
        let add_handempty = lit(&mut f, handempty, vec![], false);
        let del_holding = lit(&mut f, holding, vec![var(x)], true);
        let del_clear_y = lit(&mut f, clear, vec![var(y)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "stack".into(),
            original_arity: 2,
            parameters: vec![x, y],
            static_conditions: vec![pre_block_x, pre_block_y],
            fluent_conditions: vec![pre_holding, pre_clear_y],
            derived_conditions: vec![],
            strips_effects: vec![add_on, add_clear_x, add_handempty, del_holding, del_clear_y],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    // unstack(x, y)
    let unstack_id = {
        let x = f.get_or_create_variable("x", 0);
        let y = f.get_or_create_variable("y", 1);
        let pre_block_x = lit(&mut f, block, vec![var(x)], false);
        let pre_block_y = lit(&mut f, block, vec![var(y)], false);
        let pre_on = lit(&mut f, on, vec![var(x), var(y)], false);
        let pre_clear_x = lit(&mut f, clear, vec![var(x)], false);
        let pre_handempty = lit(&mut f, handempty, vec![], false);
        let add_holding = lit(&mut f, holding, vec![var(x)], false);
        let add_clear_y = lit(&mut f, clear, vec![var(y)], false);
        let del_on = lit(&mut f, on, vec![var(x), var(y)], true);
        let del_clear_x = lit(&mut f, clear, vec![var(x)], true);
        let del_handempty = lit(&mut f, handempty, vec![], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "unstack".into(),
            original_arity: 2,
            parameters: vec![x, y],
            static_conditions: vec![pre_block_x, pre_block_y],
            fluent_conditions: vec![pre_on, pre_clear_x, pre_handempty],
            derived_conditions: vec![],
            strips_effects: vec![
                add_holding,
                add_clear_y,
                del_on,
                del_clear_x,
                del_handempty,
            ],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    let objects: Vec<ObjectId> = names
        .iter()
        .map(|name| f.get_or_create_object(name))
        .collect();

    fn by_name(f: &mut Factories, name: &str) -> ObjectId {
        f.get_or_create_object(name)
    }

    let static_initial = objects
        .iter()
        .map(|&b| ground_lit(&mut f, block, vec![b], false))
        .collect();

    let mut fluent_initial = vec![ground_lit(&mut f, handempty, vec![], false)];
    let mut covered: Vec<ObjectId> = Vec::new();
    for &(top, support) in layout {
        let top_object = by_name(&mut f, top);
        if support == "table" {
            fluent_initial.push(ground_lit(&mut f, ontable, vec![top_object], false));
        } else {
            let support_object = by_name(&mut f, support);
            fluent_initial.push(ground_lit(&mut f, on, vec![top_object, support_object], false));
            covered.push(support_object);
        }
    }
    for &b in &objects {
        if !covered.contains(&b) {
            fluent_initial.push(ground_lit(&mut f, clear, vec![b], false));
        }
    }

    let fluent_goal = goal
        .iter()
        .map(|&(top, support)| {
            let top_object = by_name(&mut f, top);
            if support == "table" {
                ground_lit(&mut f, ontable, vec![top_object], false)
            } else {
                let support_object = by_name(&mut f, support);
                ground_lit(&mut f, on, vec![top_object, support_object], false)
            }
        })
        .collect();

    let problem = Problem {
        name: "blocks".into(),
        domain: Domain {
            name: "blocks".into(),
            static_predicates: vec![block],
            fluent_predicates: vec![on, ontable, clear, handempty, holding],
            derived_predicates: vec![],
            function_skeletons: vec![],
            actions: vec![pickup_id, putdown_id, stack_id, unstack_id],
        },
        objects,
        static_initial_literals: static_initial,
        fluent_initial_literals: fluent_initial,
        numeric_fluents: vec![],
        static_goal: vec![],
        fluent_goal,
        derived_goal: vec![],
        metric: None,
        axioms: vec![],
        static_atoms: Default::default(),
    }
    .finalize(&mut f)
    .unwrap();

    Fixture {
        problem,
        factories: f,
    }
}

// =============================================================================
// Visitall on a 2x2 grid
// =============================================================================

pub fn visitall_2x2() -> Fixture {
    let mut f = Factories::new();

    let connected: PredicateId<Static> = f.get_or_create_predicate("connected", 2);
    let at_robot: PredicateId<Fluent> = f.get_or_create_predicate("at-robot", 1);
    let visited: PredicateId<Fluent> = f.get_or_create_predicate("visited", 1);

    let move_id = {
        let from = f.get_or_create_variable("from", 0);
        let to = f.get_or_create_variable("to", 1);
        let pre_connected = lit(&mut f, connected, vec![var(from), var(to)], false);
        let pre_at = lit(&mut f, at_robot, vec![var(from)], false);
        let add_at = lit(&mut f, at_robot, vec![var(to)], false);
        let add_visited = lit(&mut f, visited, vec![var(to)], false);
        let del_at = lit(&mut f, at_robot, vec![var(from)], true);
        f.get_or_create_action_schema(ActionSchemaData {
            name: "move".into(),
            original_arity: 2,
            parameters: vec![from, to],
            static_conditions: vec![pre_connected],
            fluent_conditions: vec![pre_at],
            derived_conditions: vec![],
            strips_effects: vec![add_at, add_visited, del_at],
            conditional_effects: vec![],
            universal_effects: vec![],
            cost: FunctionExpression::unit(),
        })
    };

    let cells: Vec<ObjectId> = ["c11", "c12", "c21", "c22"]
        .iter()
        .map(|name| f.get_or_create_object(name))
        .collect();
    let (c11, c12, c21, c22) = (cells[0], cells[1], cells[2], cells[3]);

    let mut static_initial = Vec::new();
    for (a, b) in [(c11, c12), (c12, c22), (c22, c21), (c21, c11)] {
        static_initial.push(ground_lit(&mut f, connected, vec![a, b], false));
        static_initial.push(ground_lit(&mut f, connected, vec![b, a], false));
    }

    let fluent_initial = vec![
        ground_lit(&mut f, at_robot, vec![c11], false),
        ground_lit(&mut f, visited, vec![c11], false),
    ];

    let fluent_goal = cells
        .iter()
        .map(|&cell| ground_lit(&mut f, visited, vec![cell], false))
        .collect();

    let problem = Problem {
        name: "visitall-2x2".into(),
        domain: Domain {
            name: "visitall".into(),
            static_predicates: vec![connected],
            fluent_predicates: vec![at_robot, visited],
            derived_predicates: vec![],
            function_skeletons: vec![],
            actions: vec![move_id],
        },
        objects: cells,
        static_initial_literals: static_initial,
        fluent_initial_literals: fluent_initial,
        numeric_fluents: vec![],
        static_goal: vec![],
        fluent_goal,
        derived_goal: vec![],
        metric: None,
        axioms: vec![],
        static_atoms: Default::default(),
    }
    .finalize(&mut f)
    .unwrap();

    Fixture {
        problem,
        factories: f,
    }
}

// =============================================================================
// Running searches
// =============================================================================

pub fn build_generator(fixture: Fixture, kind: GeneratorKind) -> Generator {
    let handler = shared(MinimalEventHandler::new());
    match kind {
        GeneratorKind::Lifted => {
            Generator::lifted(fixture.problem, fixture.factories, handler).unwrap()
        }
        GeneratorKind::Grounded => {
            Generator::grounded(fixture.problem, fixture.factories, handler).unwrap()
        }
    }
}

pub fn solve_brfs(fixture: Fixture, kind: GeneratorKind) -> (SearchStatus, Plan, Statistics) {
    let mut generator = build_generator(fixture, kind);
    let mut repository = StateRepository::new();
    let mut plan = Plan::new();
    let status = BreadthFirstSearch::new(&mut generator, &mut repository)
        .find_solution(&mut plan)
        .unwrap();
    let statistics = generator.handler().borrow().statistics().clone();
    (status, plan, statistics)
}

/// The applicable actions of a state, rendered for cross-generator
/// comparison.
pub fn applicable_set(
    generator: &mut Generator,
    repository: &StateRepository,
    state: StateId,
) -> BTreeSet<String> {
    let mut actions = Vec::new();
    generator
        .applicable_actions(repository.data(state), &mut actions)
        .unwrap();
    actions
        .iter()
        .map(|&action| wayfinder::search::format_ground_action(generator, action))
        .collect()
}
