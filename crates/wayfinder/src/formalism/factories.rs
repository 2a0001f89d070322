//! The aggregate of all interning factories for one problem.
//!
//! `Factories` owns one factory per entity kind, with predicates, atoms,
//! literals, and their ground counterparts segregated by category so that a
//! ground atom's index lives in a category-specific namespace. Grounding
//! helpers (term substitution, literal grounding) live here because they
//! intern their results.

use super::action::{ActionSchemaData, ActionSchemaId};
use super::atom::{
    AtomData, AtomId, GroundAtomData, GroundAtomId, GroundLiteralData, GroundLiteralId,
    LiteralData, LiteralId,
};
use super::axiom::{AxiomData, AxiomId};
use super::category::{Category, Derived, Fluent, Static};
use super::factory::Factory;
use super::function::{
    FunctionData, FunctionId, FunctionSkeletonData, FunctionSkeletonId, GroundFunctionData,
    GroundFunctionId,
};
use super::predicate::{PredicateData, PredicateId, EQUALITY_PREDICATE_NAME};
use super::term::{ObjectData, ObjectId, Term, VariableData, VariableId};

/// Routes category-generic code to the category's factories.
pub trait CategoryStore: Category {
    fn predicates(f: &Factories) -> &Factory<PredicateData, PredicateId<Self>>;
    fn predicates_mut(f: &mut Factories) -> &mut Factory<PredicateData, PredicateId<Self>>;
    fn atoms(f: &Factories) -> &Factory<AtomData<Self>, AtomId<Self>>;
    fn atoms_mut(f: &mut Factories) -> &mut Factory<AtomData<Self>, AtomId<Self>>;
    fn literals(f: &Factories) -> &Factory<LiteralData<Self>, LiteralId<Self>>;
    fn literals_mut(f: &mut Factories) -> &mut Factory<LiteralData<Self>, LiteralId<Self>>;
    fn ground_atoms(f: &Factories) -> &Factory<GroundAtomData<Self>, GroundAtomId<Self>>;
    fn ground_atoms_mut(f: &mut Factories) -> &mut Factory<GroundAtomData<Self>, GroundAtomId<Self>>;
    fn ground_literals(f: &Factories) -> &Factory<GroundLiteralData<Self>, GroundLiteralId<Self>>;
    fn ground_literals_mut(
        f: &mut Factories,
    ) -> &mut Factory<GroundLiteralData<Self>, GroundLiteralId<Self>>;
}

macro_rules! impl_category_store {
    ($category:ty, $predicates:ident, $atoms:ident, $literals:ident, $ground_atoms:ident, $ground_literals:ident) => {
        impl CategoryStore for $category {
            fn predicates(f: &Factories) -> &Factory<PredicateData, PredicateId<Self>> {
                &f.$predicates
            }

            fn predicates_mut(f: &mut Factories) -> &mut Factory<PredicateData, PredicateId<Self>> {
                &mut f.$predicates
            }

            fn atoms(f: &Factories) -> &Factory<AtomData<Self>, AtomId<Self>> {
                &f.$atoms
            }

            fn atoms_mut(f: &mut Factories) -> &mut Factory<AtomData<Self>, AtomId<Self>> {
                &mut f.$atoms
            }

            fn literals(f: &Factories) -> &Factory<LiteralData<Self>, LiteralId<Self>> {
                &f.$literals
            }

            fn literals_mut(f: &mut Factories) -> &mut Factory<LiteralData<Self>, LiteralId<Self>> {
                &mut f.$literals
            }

            fn ground_atoms(f: &Factories) -> &Factory<GroundAtomData<Self>, GroundAtomId<Self>> {
                &f.$ground_atoms
            }

            fn ground_atoms_mut(
                f: &mut Factories,
            ) -> &mut Factory<GroundAtomData<Self>, GroundAtomId<Self>> {
                &mut f.$ground_atoms
            }

            fn ground_literals(
                f: &Factories,
            ) -> &Factory<GroundLiteralData<Self>, GroundLiteralId<Self>> {
                &f.$ground_literals
            }

            fn ground_literals_mut(
                f: &mut Factories,
            ) -> &mut Factory<GroundLiteralData<Self>, GroundLiteralId<Self>> {
                &mut f.$ground_literals
            }
        }
    };
}

impl_category_store!(
    Static,
    static_predicates,
    static_atoms,
    static_literals,
    static_ground_atoms,
    static_ground_literals
);
impl_category_store!(
    Fluent,
    fluent_predicates,
    fluent_atoms,
    fluent_literals,
    fluent_ground_atoms,
    fluent_ground_literals
);
impl_category_store!(
    Derived,
    derived_predicates,
    derived_atoms,
    derived_literals,
    derived_ground_atoms,
    derived_ground_literals
);

/// All interning factories of one planning problem.
///
/// Created once, populated by the front end and by the generators, and alive
/// for the full run. Entries are never removed, so indices stay stable.
#[derive(Debug, Clone, Default)]
pub struct Factories {
    objects: Factory<ObjectData, ObjectId>,
    variables: Factory<VariableData, VariableId>,

    static_predicates: Factory<PredicateData, PredicateId<Static>>,
    fluent_predicates: Factory<PredicateData, PredicateId<Fluent>>,
    derived_predicates: Factory<PredicateData, PredicateId<Derived>>,

    static_atoms: Factory<AtomData<Static>, AtomId<Static>>,
    fluent_atoms: Factory<AtomData<Fluent>, AtomId<Fluent>>,
    derived_atoms: Factory<AtomData<Derived>, AtomId<Derived>>,

    static_literals: Factory<LiteralData<Static>, LiteralId<Static>>,
    fluent_literals: Factory<LiteralData<Fluent>, LiteralId<Fluent>>,
    derived_literals: Factory<LiteralData<Derived>, LiteralId<Derived>>,

    static_ground_atoms: Factory<GroundAtomData<Static>, GroundAtomId<Static>>,
    fluent_ground_atoms: Factory<GroundAtomData<Fluent>, GroundAtomId<Fluent>>,
    derived_ground_atoms: Factory<GroundAtomData<Derived>, GroundAtomId<Derived>>,

    static_ground_literals: Factory<GroundLiteralData<Static>, GroundLiteralId<Static>>,
    fluent_ground_literals: Factory<GroundLiteralData<Fluent>, GroundLiteralId<Fluent>>,
    derived_ground_literals: Factory<GroundLiteralData<Derived>, GroundLiteralId<Derived>>,

    function_skeletons: Factory<FunctionSkeletonData, FunctionSkeletonId>,
    functions: Factory<FunctionData, FunctionId>,
    ground_functions: Factory<GroundFunctionData, GroundFunctionId>,

    actions: Factory<ActionSchemaData, ActionSchemaId>,
    axioms: Factory<AxiomData, AxiomId>,
}

impl Factories {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Objects and variables
    // =========================================================================

    pub fn get_or_create_object(&mut self, name: &str) -> ObjectId {
        self.objects.get_or_create(ObjectData::new(name))
    }

    pub fn object(&self, id: ObjectId) -> &ObjectData {
        self.objects.get(id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_or_create_variable(&mut self, name: &str, parameter_index: usize) -> VariableId {
        self.variables
            .get_or_create(VariableData::new(name, parameter_index))
    }

    pub fn variable(&self, id: VariableId) -> &VariableData {
        self.variables.get(id)
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    pub fn get_or_create_predicate<C: CategoryStore>(
        &mut self,
        name: &str,
        arity: usize,
    ) -> PredicateId<C> {
        C::predicates_mut(self).get_or_create(PredicateData::new(name, arity))
    }

    pub fn predicate<C: CategoryStore>(&self, id: PredicateId<C>) -> &PredicateData {
        C::predicates(self).get(id)
    }

    pub fn predicate_count<C: CategoryStore>(&self) -> usize {
        C::predicates(self).len()
    }

    /// The hidden equality predicate (created on first use).
    pub fn equality_predicate(&mut self) -> PredicateId<Static> {
        self.get_or_create_predicate::<Static>(EQUALITY_PREDICATE_NAME, 2)
    }

    // =========================================================================
    // Atoms and literals
    // =========================================================================

    pub fn get_or_create_atom<C: CategoryStore>(
        &mut self,
        predicate: PredicateId<C>,
        terms: Vec<Term>,
    ) -> AtomId<C> {
        C::atoms_mut(self).get_or_create(AtomData::new(predicate, terms))
    }

    pub fn atom<C: CategoryStore>(&self, id: AtomId<C>) -> &AtomData<C> {
        C::atoms(self).get(id)
    }

    pub fn get_or_create_literal<C: CategoryStore>(
        &mut self,
        atom: AtomId<C>,
        negated: bool,
    ) -> LiteralId<C> {
        C::literals_mut(self).get_or_create(LiteralData { atom, negated })
    }

    pub fn literal<C: CategoryStore>(&self, id: LiteralId<C>) -> LiteralData<C> {
        *C::literals(self).get(id)
    }

    // =========================================================================
    // Ground atoms and literals
    // =========================================================================

    pub fn get_or_create_ground_atom<C: CategoryStore>(
        &mut self,
        predicate: PredicateId<C>,
        objects: Vec<ObjectId>,
    ) -> GroundAtomId<C> {
        C::ground_atoms_mut(self).get_or_create(GroundAtomData::new(predicate, objects))
    }

    pub fn ground_atom<C: CategoryStore>(&self, id: GroundAtomId<C>) -> &GroundAtomData<C> {
        C::ground_atoms(self).get(id)
    }

    pub fn ground_atom_count<C: CategoryStore>(&self) -> usize {
        C::ground_atoms(self).len()
    }

    pub fn get_or_create_ground_literal<C: CategoryStore>(
        &mut self,
        atom: GroundAtomId<C>,
        negated: bool,
    ) -> GroundLiteralId<C> {
        C::ground_literals_mut(self).get_or_create(GroundLiteralData { atom, negated })
    }

    pub fn ground_literal_data<C: CategoryStore>(
        &self,
        id: GroundLiteralId<C>,
    ) -> GroundLiteralData<C> {
        *C::ground_literals(self).get(id)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub fn get_or_create_function_skeleton(
        &mut self,
        name: &str,
        arity: usize,
    ) -> FunctionSkeletonId {
        self.function_skeletons
            .get_or_create(FunctionSkeletonData::new(name, arity))
    }

    pub fn function_skeleton(&self, id: FunctionSkeletonId) -> &FunctionSkeletonData {
        self.function_skeletons.get(id)
    }

    pub fn get_or_create_function(
        &mut self,
        skeleton: FunctionSkeletonId,
        terms: Vec<Term>,
    ) -> FunctionId {
        self.functions.get_or_create(FunctionData { skeleton, terms })
    }

    pub fn function(&self, id: FunctionId) -> &FunctionData {
        self.functions.get(id)
    }

    pub fn get_or_create_ground_function(
        &mut self,
        skeleton: FunctionSkeletonId,
        objects: Vec<ObjectId>,
    ) -> GroundFunctionId {
        self.ground_functions
            .get_or_create(GroundFunctionData { skeleton, objects })
    }

    pub fn ground_function(&self, id: GroundFunctionId) -> &GroundFunctionData {
        self.ground_functions.get(id)
    }

    // =========================================================================
    // Action schemas and axioms
    // =========================================================================

    pub fn get_or_create_action_schema(&mut self, data: ActionSchemaData) -> ActionSchemaId {
        self.actions.get_or_create(data)
    }

    pub fn action_schema(&self, id: ActionSchemaId) -> &ActionSchemaData {
        self.actions.get(id)
    }

    pub fn action_schema_count(&self) -> usize {
        self.actions.len()
    }

    pub fn get_or_create_axiom(&mut self, data: AxiomData) -> AxiomId {
        self.axioms.get_or_create(data)
    }

    pub fn axiom(&self, id: AxiomId) -> &AxiomData {
        self.axioms.get(id)
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    // =========================================================================
    // Grounding
    // =========================================================================

    /// Substitute objects for variables through the binding vector.
    pub fn ground_terms(&self, terms: &[Term], binding: &[ObjectId]) -> Vec<ObjectId> {
        terms
            .iter()
            .map(|term| match term {
                Term::Object(object) => *object,
                Term::Variable(variable) => binding[self.variable(*variable).parameter_index],
            })
            .collect()
    }

    /// Ground an atom under a binding, interning the result.
    pub fn ground_atom_instance<C: CategoryStore>(
        &mut self,
        atom: AtomId<C>,
        binding: &[ObjectId],
    ) -> GroundAtomId<C> {
        let (predicate, terms) = {
            let data = C::atoms(self).get(atom);
            (data.predicate, data.terms.clone())
        };
        let objects = self.ground_terms(&terms, binding);
        C::ground_atoms_mut(self).get_or_create(GroundAtomData::new(predicate, objects))
    }

    /// Ground a literal under a binding, interning the underlying ground atom.
    pub fn ground_literal<C: CategoryStore>(
        &mut self,
        literal: LiteralId<C>,
        binding: &[ObjectId],
    ) -> GroundLiteralData<C> {
        let data = self.literal(literal);
        let atom = self.ground_atom_instance(data.atom, binding);
        GroundLiteralData {
            atom,
            negated: data.negated,
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Textual representation of a ground atom, e.g. `(at ball1 rooma)`.
    pub fn display_ground_atom<C: CategoryStore>(&self, id: GroundAtomId<C>) -> String {
        let data = self.ground_atom(id);
        let mut out = format!("({}", self.predicate(data.predicate).name);
        for object in &data.objects {
            out.push(' ');
            out.push_str(&self.object(*object).name);
        }
        out.push(')');
        out
    }

    /// Textual representation of a ground function, e.g. `(distance a b)`.
    pub fn display_ground_function(&self, id: GroundFunctionId) -> String {
        let data = self.ground_function(id);
        let mut out = format!("({}", self.function_skeleton(data.skeleton).name);
        for object in &data.objects {
            out.push(' ');
            out.push_str(&self.object(*object).name);
        }
        out.push(')');
        out
    }
}
