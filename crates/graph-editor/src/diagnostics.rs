//! Advisory diagnostics for workflow graphs
//!
//! Reports structural oddities the editor deliberately accepts: parallel
//! edges, self-loops, a missing or repeated start node. Nothing here
//! blocks a mutation; hosts may surface the issues as hints.

use std::collections::{HashMap, HashSet};

use crate::types::{GraphSnapshot, NodeKind};

/// A structural issue found in a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    /// An edge references a node that is not in the graph
    DanglingEdge { edge_id: String, node_id: String },
    /// An edge starts and ends at the same node
    SelfLoop { edge_id: String, node_id: String },
    /// More than one edge connects the same source and target
    ParallelEdges {
        source: String,
        target: String,
        edge_ids: Vec<String>,
    },
    /// The graph has no start node
    MissingStartNode,
    /// The graph has more than one start node
    MultipleStartNodes { node_ids: Vec<String> },
}

impl std::fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingEdge { edge_id, node_id } => {
                write!(f, "Edge '{}' references unknown node '{}'", edge_id, node_id)
            }
            Self::SelfLoop { edge_id, node_id } => {
                write!(f, "Edge '{}' loops on node '{}'", edge_id, node_id)
            }
            Self::ParallelEdges {
                source,
                target,
                edge_ids,
            } => {
                write!(
                    f,
                    "{} edges connect '{}' to '{}': {}",
                    edge_ids.len(),
                    source,
                    target,
                    edge_ids.join(", ")
                )
            }
            Self::MissingStartNode => write!(f, "Graph has no start node"),
            Self::MultipleStartNodes { node_ids } => {
                write!(f, "Graph has multiple start nodes: {}", node_ids.join(", "))
            }
        }
    }
}

/// Inspect a graph and return every issue found (not just the first)
pub fn inspect(graph: &GraphSnapshot) -> Vec<GraphIssue> {
    let mut issues = Vec::new();

    check_edge_references(graph, &mut issues);
    check_self_loops(graph, &mut issues);
    check_parallel_edges(graph, &mut issues);
    check_start_nodes(graph, &mut issues);

    issues
}

fn check_edge_references(graph: &GraphSnapshot, issues: &mut Vec<GraphIssue>) {
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                issues.push(GraphIssue::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }
}

fn check_self_loops(graph: &GraphSnapshot, issues: &mut Vec<GraphIssue>) {
    for edge in graph.edges.iter().filter(|e| e.source == e.target) {
        issues.push(GraphIssue::SelfLoop {
            edge_id: edge.id.clone(),
            node_id: edge.source.clone(),
        });
    }
}

fn check_parallel_edges(graph: &GraphSnapshot, issues: &mut Vec<GraphIssue>) {
    let mut by_pair: HashMap<(&str, &str), Vec<String>> = HashMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for edge in &graph.edges {
        let pair = (edge.source.as_str(), edge.target.as_str());
        let ids = by_pair.entry(pair).or_insert_with(|| {
            order.push(pair);
            Vec::new()
        });
        ids.push(edge.id.clone());
    }

    for pair in order {
        if let Some(edge_ids) = by_pair.remove(&pair) {
            if edge_ids.len() > 1 {
                issues.push(GraphIssue::ParallelEdges {
                    source: pair.0.to_string(),
                    target: pair.1.to_string(),
                    edge_ids,
                });
            }
        }
    }
}

fn check_start_nodes(graph: &GraphSnapshot, issues: &mut Vec<GraphIssue>) {
    let starts: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Start)
        .map(|n| n.id.clone())
        .collect();

    match starts.len() {
        0 => issues.push(GraphIssue::MissingStartNode),
        1 => {}
        _ => issues.push(GraphIssue::MultipleStartNodes { node_ids: starts }),
    }
}
