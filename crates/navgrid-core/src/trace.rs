//! The trace protocol: complete snapshots of a run in progress.
//!
//! Every planner emits one snapshot per unit of work. A snapshot is the full
//! observable state, not a delta, so a consumer can render any step in
//! isolation. The shared invariant: `path` is non-empty only on a step with
//! `complete == true` where a route was actually found; a completed step
//! with an empty path means "no route exists" (or a budget ran out, which is
//! reported the same way).

use std::collections::HashMap;

use crate::geom::{euclid, Pos};

/// Per-node cost bookkeeping exposed by A*: cost from start, heuristic to
/// goal, and their sum.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeScore {
    pub g: i32,
    pub h: i32,
    pub f: i32,
}

/// Frontier scores keyed by position.
pub type NodeScores = HashMap<Pos, NodeScore>;

// JSON object keys must be strings, so the scores map crosses the serde
// boundary as a list of (position, score) pairs.
#[cfg(feature = "serde")]
mod scores_as_pairs {
    use super::{NodeScore, NodeScores, Pos};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<NodeScores>, s: S) -> Result<S::Ok, S::Error> {
        let pairs: Option<Vec<(Pos, NodeScore)>> =
            v.as_ref().map(|m| m.iter().map(|(k, v)| (*k, *v)).collect());
        pairs.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NodeScores>, D::Error> {
        let pairs: Option<Vec<(Pos, NodeScore)>> = Option::deserialize(d)?;
        Ok(pairs.map(|v| v.into_iter().collect()))
    }
}

/// One snapshot of a graph-search or reactive run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStep {
    /// Positions visited so far, in first-visit order.
    pub explored: Vec<Pos>,
    /// Positions waiting in the frontier (or advisory alternatives for the
    /// reactive planners).
    pub frontier: Vec<Pos>,
    /// The route, populated only on a successful completed step.
    pub path: Vec<Pos>,
    /// The cell the run is standing on, absent on terminal no-route steps.
    pub current: Option<Pos>,
    /// Whether the run is finished.
    pub complete: bool,
    /// Frontier (g, h, f) values, populated by A* only.
    #[cfg_attr(feature = "serde", serde(with = "scores_as_pairs"))]
    pub scores: Option<NodeScores>,
}

impl SearchStep {
    /// A terminal step that found no route.
    pub fn no_route(&self) -> bool {
        self.complete && self.path.is_empty()
    }

    /// How many cells the run has visited.
    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    /// Number of moves in the path (one less than the cell count).
    pub fn path_moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A node of a sampling planner's graph: position, parent index into the
/// step's `nodes` vector, and accumulated path length through the parent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanNode {
    pub pos: Pos,
    pub parent: Option<usize>,
    pub cost: f64,
}

/// One snapshot of a sampling-planner run (PRM, RRT, RRT*).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanStep {
    /// Every node placed so far; indices are stable across steps.
    pub nodes: Vec<PlanNode>,
    /// Every verified collision-free segment, as endpoint positions.
    pub edges: Vec<(Pos, Pos)>,
    /// The route, populated only on a successful completed step.
    pub path: Vec<Pos>,
    /// The most recently added node position, when one was added.
    pub current: Option<Pos>,
    /// The raw sample that produced this step, when one was drawn.
    pub sampled: Option<Pos>,
    /// Whether the run is finished.
    pub complete: bool,
}

impl PlanStep {
    /// A terminal step that found no route.
    pub fn no_route(&self) -> bool {
        self.complete && self.path.is_empty()
    }

    /// How many nodes the planner has placed.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Euclidean length of the path, 0.0 when empty.
    pub fn path_cost(&self) -> f64 {
        self.path
            .windows(2)
            .map(|w| euclid(w[0], w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_requires_completion() {
        let mut step = SearchStep::default();
        assert!(!step.no_route());
        step.complete = true;
        assert!(step.no_route());
        step.path = vec![Pos::new(0, 0)];
        assert!(!step.no_route());
    }

    #[test]
    fn path_moves_counts_edges() {
        let mut step = SearchStep::default();
        assert_eq!(step.path_moves(), 0);
        step.path = vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1)];
        assert_eq!(step.path_moves(), 2);
    }

    #[test]
    fn plan_path_cost_sums_segments() {
        let mut step = PlanStep::default();
        assert_eq!(step.path_cost(), 0.0);
        step.path = vec![Pos::new(0, 0), Pos::new(0, 3), Pos::new(4, 3)];
        assert!((step.path_cost() - 7.0).abs() < 1e-12);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_step_round_trip() {
        let mut scores = NodeScores::new();
        scores.insert(Pos::new(1, 2), NodeScore { g: 3, h: 4, f: 7 });
        let step = SearchStep {
            explored: vec![Pos::new(0, 0)],
            frontier: vec![Pos::new(0, 1), Pos::new(1, 0)],
            path: Vec::new(),
            current: Some(Pos::new(0, 0)),
            complete: false,
            scores: Some(scores),
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: SearchStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back.explored, step.explored);
        assert_eq!(back.frontier, step.frontier);
        assert_eq!(back.current, step.current);
        assert_eq!(back.scores.unwrap()[&Pos::new(1, 2)].f, 7);
    }

    #[test]
    fn plan_step_round_trip() {
        let step = PlanStep {
            nodes: vec![
                PlanNode {
                    pos: Pos::new(0, 0),
                    parent: None,
                    cost: 0.0,
                },
                PlanNode {
                    pos: Pos::new(2, 2),
                    parent: Some(0),
                    cost: 2.828,
                },
            ],
            edges: vec![(Pos::new(0, 0), Pos::new(2, 2))],
            path: Vec::new(),
            current: Some(Pos::new(2, 2)),
            sampled: Some(Pos::new(4, 4)),
            complete: false,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: PlanStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nodes.len(), 2);
        assert_eq!(back.nodes[1].parent, Some(0));
        assert_eq!(back.edges, step.edges);
    }
}
