//! The cross-referenced project graph.
//!
//! One node per loaded project, one edge per reference that resolved to a
//! project. Edges are direct (one hop); ordering builds is left to whoever
//! consumes the graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::core::{ProjectIdx, Workspace};
use crate::resolver::Resolve;

/// Directed graph of resolved project-to-project references.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    /// Edge weight is the position of the reference in the source project.
    graph: DiGraph<ProjectIdx, usize>,
    nodes: HashMap<ProjectIdx, NodeIndex>,
}

impl ProjectGraph {
    pub fn build(ws: &Workspace, resolve: &Resolve) -> Self {
        let mut graph = DiGraph::with_capacity(ws.len(), 0);
        let mut nodes = HashMap::with_capacity(ws.len());

        for (idx, _) in ws.iter() {
            nodes.insert(idx, graph.add_node(idx));
        }

        for (from, position, resolution) in resolve.iter() {
            // A project referencing its own output is not a dependency.
            let Some(to) = resolution.project().filter(|&to| to != from) else {
                continue;
            };
            if let (Some(&a), Some(&b)) = (nodes.get(&from), nodes.get(&to)) {
                graph.add_edge(a, b, position);
            }
        }

        ProjectGraph { graph, nodes }
    }

    /// Projects `project` references directly, deduplicated, in declaration order.
    pub fn dependencies(&self, project: ProjectIdx) -> Vec<ProjectIdx> {
        self.neighbors(project, Direction::Outgoing)
    }

    /// Projects that reference `project` directly, in project order.
    pub fn dependents(&self, project: ProjectIdx) -> Vec<ProjectIdx> {
        let mut out = self.neighbors(project, Direction::Incoming);
        out.sort();
        out
    }

    fn neighbors(&self, project: ProjectIdx, direction: Direction) -> Vec<ProjectIdx> {
        let Some(&node) = self.nodes.get(&project) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (*edge.weight(), self.graph[other])
            })
            .collect();
        edges.sort();

        let mut out: Vec<ProjectIdx> = Vec::with_capacity(edges.len());
        for (_, idx) in edges {
            if !out.contains(&idx) {
                out.push(idx);
            }
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
