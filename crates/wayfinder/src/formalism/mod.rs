//! The interned planning formalism.
//!
//! This module provides the typed, first-order data model the search
//! infrastructure runs on: objects, variables, predicates (split into
//! static, fluent, and derived categories), atoms and literals with their
//! ground counterparts, numeric functions and cost expressions, action
//! schemas, axioms, and problem instances. Every entity is interned in a
//! content-addressed factory and referenced by a dense index.

pub mod action;
pub mod atom;
pub mod axiom;
pub mod category;
pub mod factories;
pub mod factory;
pub mod function;
pub mod predicate;
pub mod problem;
pub mod term;

pub use action::{ActionSchemaData, ActionSchemaId, ConditionalEffectSchema, UniversalEffectSchema};
pub use atom::{
    AtomData, AtomId, GroundAtomData, GroundAtomId, GroundLiteralData, GroundLiteralId,
    LiteralData, LiteralId,
};
pub use axiom::{AxiomData, AxiomId};
pub use category::{Category, Derived, Fluent, Static};
pub use factories::{CategoryStore, Factories};
pub use factory::{Factory, FactoryIndex};
pub use function::{
    BinaryOperator, FunctionData, FunctionExpression, FunctionId, FunctionSkeletonData,
    FunctionSkeletonId, GroundFunctionData, GroundFunctionId, MultiOperator,
};
pub use predicate::{PredicateData, PredicateId, EQUALITY_PREDICATE_NAME};
pub use problem::{Domain, MetricDirection, OptimizationMetric, Problem};
pub use term::{ObjectData, ObjectId, Term, VariableData, VariableId};
