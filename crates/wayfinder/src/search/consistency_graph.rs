//! Static consistency graphs.
//!
//! For a schema of arity k, the consistency graph is a k-partite graph: one
//! partition per parameter, one vertex per (parameter, object) pair that is
//! consistent with the schema's static precondition, and an edge between two
//! vertices of different partitions whenever their joint assignment is
//! consistent with every static precondition literal mentioning both
//! parameters. A complete parameter binding that can satisfy the static
//! precondition corresponds to a k-clique with one vertex per partition.
//!
//! The graph is built once per schema against the problem's static atoms;
//! at query time the lifted generator filters its edges further with the
//! fluent and derived assignment sets of the current state.

use crate::formalism::{Factories, LiteralId, ObjectId, Static};

use super::assignment_set::{AssignmentSet, ParameterAssignment};

/// A candidate assignment of one parameter to one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    /// Position of this vertex in the graph's vertex list.
    pub index: usize,
    /// Parameter this vertex assigns, in the owning binding's index space.
    pub parameter_index: usize,
    pub object: ObjectId,
}

impl ParameterAssignment for Vertex {
    fn object_for(&self, parameter_index: usize) -> Option<ObjectId> {
        (parameter_index == self.parameter_index).then_some(self.object)
    }
}

/// The joint assignment of an edge's two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct JointAssignment {
    pub src: Vertex,
    pub dst: Vertex,
}

impl ParameterAssignment for JointAssignment {
    fn object_for(&self, parameter_index: usize) -> Option<ObjectId> {
        self.src
            .object_for(parameter_index)
            .or_else(|| self.dst.object_for(parameter_index))
    }
}

/// The statically consistent assignments of one parameter list.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyGraph {
    vertices: Vec<Vertex>,
    edges: Vec<(usize, usize)>,
    /// Vertex indices grouped by local parameter position.
    vertices_by_parameter: Vec<Vec<usize>>,
    /// Consistent objects grouped by local parameter position.
    objects_by_parameter: Vec<Vec<ObjectId>>,
}

impl ConsistencyGraph {
    /// Build the graph for `arity` parameters whose binding positions start
    /// at `parameter_offset` (non-zero for quantified effect variables).
    pub fn new(
        factories: &Factories,
        objects: &[ObjectId],
        arity: usize,
        parameter_offset: usize,
        static_conditions: &[LiteralId<Static>],
        static_set: &AssignmentSet<Static>,
    ) -> Self {
        let mut vertices = Vec::new();
        let mut vertices_by_parameter = vec![Vec::new(); arity];
        let mut objects_by_parameter = vec![Vec::new(); arity];

        for position in 0..arity {
            for &object in objects {
                let vertex = Vertex {
                    index: vertices.len(),
                    parameter_index: parameter_offset + position,
                    object,
                };
                if static_set.literals_consistent(factories, static_conditions, &vertex) {
                    vertices_by_parameter[position].push(vertex.index);
                    objects_by_parameter[position].push(object);
                    vertices.push(vertex);
                }
            }
        }

        let mut edges = Vec::new();
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                let src = vertices[i];
                let dst = vertices[j];
                if src.parameter_index == dst.parameter_index {
                    continue;
                }
                let joint = JointAssignment { src, dst };
                if static_set.literals_consistent(factories, static_conditions, &joint) {
                    edges.push((i, j));
                }
            }
        }

        ConsistencyGraph {
            vertices,
            edges,
            vertices_by_parameter,
            objects_by_parameter,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn vertices_by_parameter(&self) -> &[Vec<usize>] {
        &self.vertices_by_parameter
    }

    pub fn objects_by_parameter(&self) -> &[Vec<ObjectId>] {
        &self.objects_by_parameter
    }
}

/// Enumerate the parameter bindings consistent with the current state.
///
/// The statically built graph is restricted on the fly: the fluent and
/// derived assignment sets of the state filter vertices (arity one) or
/// edges (general case), and the k-cliques of the restricted graph are the
/// candidate bindings. Arity zero yields the single empty binding; the
/// caller still has to test full applicability on every returned binding.
pub fn consistent_bindings(
    factories: &Factories,
    graph: &ConsistencyGraph,
    arity: usize,
    fluent_conditions: &[crate::formalism::LiteralId<crate::formalism::Fluent>],
    derived_conditions: &[crate::formalism::LiteralId<crate::formalism::Derived>],
    fluent_set: &AssignmentSet<crate::formalism::Fluent>,
    derived_set: &AssignmentSet<crate::formalism::Derived>,
) -> Vec<Vec<ObjectId>> {
    match arity {
        0 => vec![Vec::new()],
        1 => graph
            .vertices()
            .iter()
            .filter(|vertex| {
                fluent_set.literals_consistent(factories, fluent_conditions, *vertex)
                    && derived_set.literals_consistent(factories, derived_conditions, *vertex)
            })
            .map(|vertex| vec![vertex.object])
            .collect(),
        _ => {
            let num_vertices = graph.vertices().len();
            let mut adjacency = vec![roaring::RoaringBitmap::new(); num_vertices];
            for &(i, j) in graph.edges() {
                let joint = JointAssignment {
                    src: graph.vertices()[i],
                    dst: graph.vertices()[j],
                };
                if fluent_set.literals_consistent(factories, fluent_conditions, &joint)
                    && derived_set.literals_consistent(factories, derived_conditions, &joint)
                {
                    adjacency[i].insert(j as u32);
                    adjacency[j].insert(i as u32);
                }
            }

            let mut cliques = Vec::new();
            super::cliques::find_k_cliques_in_k_partite_graph(
                &adjacency,
                graph.vertices_by_parameter(),
                &mut cliques,
            );

            cliques
                .into_iter()
                .map(|clique| {
                    let mut binding = vec![ObjectId::new(0); arity];
                    for &vertex_index in &clique {
                        let vertex = graph.vertices()[vertex_index];
                        binding[vertex.parameter_index] = vertex.object;
                    }
                    binding
                })
                .collect()
        }
    }
}

/// Iterate every combination of one object per parameter position, in
/// lexicographic order over the per-parameter lists.
///
/// An empty list at any position yields no combinations; zero positions
/// yield the single empty combination.
pub fn for_each_combination(
    objects_by_parameter: &[Vec<ObjectId>],
    mut visit: impl FnMut(&[ObjectId]),
) {
    if objects_by_parameter.iter().any(|objects| objects.is_empty()) {
        return;
    }

    let arity = objects_by_parameter.len();
    let mut cursor = vec![0usize; arity];
    let mut combination: Vec<ObjectId> = objects_by_parameter
        .iter()
        .map(|objects| objects[0])
        .collect();

    loop {
        visit(&combination);

        // Advance the mixed-radix cursor.
        let mut position = arity;
        loop {
            if position == 0 {
                return;
            }
            position -= 1;
            cursor[position] += 1;
            if cursor[position] < objects_by_parameter[position].len() {
                combination[position] = objects_by_parameter[position][cursor[position]];
                break;
            }
            cursor[position] = 0;
            combination[position] = objects_by_parameter[position][0];
        }
    }
}
