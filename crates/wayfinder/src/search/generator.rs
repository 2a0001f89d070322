//! The applicable-action generator seam.
//!
//! The two generator implementations (lifted and grounded) are enumerated
//! in a sum type rather than hidden behind trait objects; the search and
//! the state repository talk to either through [`GeneratorOps`], and the
//! hot paths below that boundary stay monomorphic over the packed types.

use crate::error::Result;
use crate::formalism::{Derived, Factories, Fluent, Problem};

use super::bitset::FactBitset;
use super::event_handlers::SharedEventHandler;
use super::ground_action::{GroundActionData, GroundActionId};
use super::grounded::GroundedGenerator;
use super::lifted::LiftedGenerator;
use super::state::StateData;

/// The operations a search needs from an applicable-action generator.
pub trait GeneratorOps {
    fn problem(&self) -> &Problem;
    fn factories(&self) -> &Factories;
    fn handler(&self) -> &SharedEventHandler;
    fn action(&self, id: GroundActionId) -> &GroundActionData;

    /// Enumerate all ground actions applicable in the state.
    fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()>;

    /// Compute the derived fixed point of `fluent` into `derived`.
    fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>);
}

impl GeneratorOps for LiftedGenerator {
    fn problem(&self) -> &Problem {
        LiftedGenerator::problem(self)
    }

    fn factories(&self) -> &Factories {
        LiftedGenerator::factories(self)
    }

    fn handler(&self) -> &SharedEventHandler {
        LiftedGenerator::handler(self)
    }

    fn action(&self, id: GroundActionId) -> &GroundActionData {
        LiftedGenerator::action(self, id)
    }

    fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()> {
        LiftedGenerator::applicable_actions(self, state, out)
    }

    fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>) {
        LiftedGenerator::evaluate_axioms(self, fluent, derived)
    }
}

impl GeneratorOps for GroundedGenerator {
    fn problem(&self) -> &Problem {
        GroundedGenerator::problem(self)
    }

    fn factories(&self) -> &Factories {
        GroundedGenerator::factories(self)
    }

    fn handler(&self) -> &SharedEventHandler {
        GroundedGenerator::handler(self)
    }

    fn action(&self, id: GroundActionId) -> &GroundActionData {
        GroundedGenerator::action(self, id)
    }

    fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()> {
        GroundedGenerator::applicable_actions(self, state, out)
    }

    fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>) {
        GroundedGenerator::evaluate_axioms(self, fluent, derived)
    }
}

/// An applicable-action generator, lifted or grounded.
pub enum Generator {
    Lifted(LiftedGenerator),
    Grounded(GroundedGenerator),
}

impl Generator {
    /// Build a lifted generator over a finalized problem.
    pub fn lifted(
        problem: Problem,
        factories: Factories,
        handler: SharedEventHandler,
    ) -> Result<Self> {
        Ok(Generator::Lifted(LiftedGenerator::new(
            problem, factories, handler,
        )?))
    }

    /// Build a grounded generator over a finalized problem. Pre-grounds the
    /// delete-free reachable actions and axioms and builds the match trees.
    pub fn grounded(
        problem: Problem,
        factories: Factories,
        handler: SharedEventHandler,
    ) -> Result<Self> {
        Ok(Generator::Grounded(GroundedGenerator::new(
            problem, factories, handler,
        )?))
    }
}

impl GeneratorOps for Generator {
    fn problem(&self) -> &Problem {
        match self {
            Generator::Lifted(generator) => generator.problem(),
            Generator::Grounded(generator) => generator.problem(),
        }
    }

    fn factories(&self) -> &Factories {
        match self {
            Generator::Lifted(generator) => generator.factories(),
            Generator::Grounded(generator) => generator.factories(),
        }
    }

    fn handler(&self) -> &SharedEventHandler {
        match self {
            Generator::Lifted(generator) => generator.handler(),
            Generator::Grounded(generator) => generator.handler(),
        }
    }

    fn action(&self, id: GroundActionId) -> &GroundActionData {
        match self {
            Generator::Lifted(generator) => generator.action(id),
            Generator::Grounded(generator) => generator.action(id),
        }
    }

    fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()> {
        match self {
            Generator::Lifted(generator) => generator.applicable_actions(state, out),
            Generator::Grounded(generator) => generator.applicable_actions(state, out),
        }
    }

    fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>) {
        match self {
            Generator::Lifted(generator) => generator.evaluate_axioms(fluent, derived),
            Generator::Grounded(generator) => generator.evaluate_axioms(fluent, derived),
        }
    }
}
