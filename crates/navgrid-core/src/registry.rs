//! Names, groupings and blurbs for the eleven planners.
//!
//! A front-end selects a planner by its stable string id (the same ids the
//! course material uses, e.g. `"rrt-star"`) and groups the pickers by
//! [`Group`]. Construction of the actual computation lives in the planner
//! crates; this registry is pure data.

use std::fmt;

/// The three planner families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Group {
    Grid,
    Reactive,
    Sampling,
}

impl Group {
    /// All groups, in presentation order.
    pub const ALL: [Group; 3] = [Group::Reactive, Group::Grid, Group::Sampling];

    /// Stable string id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Reactive => "reactive",
            Self::Sampling => "sampling",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grid => "Graph / Grid-Based",
            Self::Reactive => "Reactive / Local",
            Self::Sampling => "Sampling-Based",
        }
    }

    /// Short tagline.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Grid => "Classic Planning",
            Self::Reactive => "No Global Map",
            Self::Sampling => "Continuous Space",
        }
    }

    /// One-sentence explanation.
    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Grid => "These algorithms plan on a map and compare possible paths.",
            Self::Reactive => {
                "These algorithms react to sensor input and do not plan the full path."
            }
            Self::Sampling => {
                "These algorithms explore space through random sampling rather than full maps."
            }
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Identifier of one planner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlgorithmId {
    WallFollowing,
    Bug,
    Dwa,
    Bfs,
    Dfs,
    Dijkstra,
    Greedy,
    Astar,
    Prm,
    Rrt,
    RrtStar,
}

impl AlgorithmId {
    /// All planners, grouped in presentation order.
    pub const ALL: [AlgorithmId; 11] = [
        AlgorithmId::WallFollowing,
        AlgorithmId::Bug,
        AlgorithmId::Dwa,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
        AlgorithmId::Greedy,
        AlgorithmId::Astar,
        AlgorithmId::Prm,
        AlgorithmId::Rrt,
        AlgorithmId::RrtStar,
    ];

    /// Stable string id, e.g. `"astar"` or `"rrt-star"`.
    pub fn id(self) -> &'static str {
        match self {
            Self::WallFollowing => "wall-following",
            Self::Bug => "bug",
            Self::Dwa => "dwa",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::Greedy => "greedy",
            Self::Astar => "astar",
            Self::Prm => "prm",
            Self::Rrt => "rrt",
            Self::RrtStar => "rrt-star",
        }
    }

    /// Look an id up by its stable string form.
    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == s)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::WallFollowing => "Wall Following / Left-Hand Rule",
            Self::Bug => "Bug Algorithm",
            Self::Dwa => "Dynamic Window Approach (DWA)",
            Self::Bfs => "Breadth-First Search (BFS)",
            Self::Dfs => "Depth-First Search (DFS)",
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::Greedy => "Greedy Best-First Search",
            Self::Astar => "A* Algorithm",
            Self::Prm => "Probabilistic Roadmap (PRM)",
            Self::Rrt => "Rapidly-Exploring Random Tree (RRT)",
            Self::RrtStar => "RRT*",
        }
    }

    /// One-line description.
    pub fn blurb(self) -> &'static str {
        match self {
            Self::WallFollowing => "Moves by following obstacles without planning ahead.",
            Self::Bug => "Moves toward the goal, detours around obstacles when blocked.",
            Self::Dwa => "Chooses safe motions based on current velocity and obstacles.",
            Self::Bfs => "Explores evenly without considering distance.",
            Self::Dfs => "Explores deeply, may find poor paths.",
            Self::Dijkstra => "Evaluates all paths by accumulated cost.",
            Self::Greedy => "Moves toward the goal using heuristic only.",
            Self::Astar => "Balances cost so far and estimated cost to goal.",
            Self::Prm => "Builds a roadmap by randomly sampling free space.",
            Self::Rrt => "Explores space by growing random branches.",
            Self::RrtStar => "Improves RRT by optimizing path quality over time.",
        }
    }

    /// The family this planner belongs to.
    pub fn group(self) -> Group {
        match self {
            Self::WallFollowing | Self::Bug | Self::Dwa => Group::Reactive,
            Self::Bfs | Self::Dfs | Self::Dijkstra | Self::Greedy | Self::Astar => Group::Grid,
            Self::Prm | Self::Rrt | Self::RrtStar => Group::Sampling,
        }
    }

    /// Every planner in a group, in presentation order.
    pub fn in_group(group: Group) -> impl Iterator<Item = AlgorithmId> {
        Self::ALL.into_iter().filter(move |a| a.group() == group)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for algo in AlgorithmId::ALL {
            assert_eq!(AlgorithmId::from_id(algo.id()), Some(algo));
        }
        assert_eq!(AlgorithmId::from_id("simulated-annealing"), None);
    }

    #[test]
    fn group_sizes() {
        assert_eq!(AlgorithmId::in_group(Group::Reactive).count(), 3);
        assert_eq!(AlgorithmId::in_group(Group::Grid).count(), 5);
        assert_eq!(AlgorithmId::in_group(Group::Sampling).count(), 3);
    }

    #[test]
    fn every_planner_has_metadata() {
        for algo in AlgorithmId::ALL {
            assert!(!algo.name().is_empty());
            assert!(!algo.blurb().is_empty());
            assert!(Group::ALL.contains(&algo.group()));
        }
    }

    #[test]
    fn display_matches_id() {
        assert_eq!(AlgorithmId::RrtStar.to_string(), "rrt-star");
        assert_eq!(Group::Sampling.to_string(), "sampling");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serde_uses_stable_ids() {
        assert_eq!(
            serde_json::to_string(&AlgorithmId::RrtStar).unwrap(),
            "\"rrt-star\""
        );
        assert_eq!(
            serde_json::to_string(&AlgorithmId::WallFollowing).unwrap(),
            "\"wall-following\""
        );
        let back: AlgorithmId = serde_json::from_str("\"dijkstra\"").unwrap();
        assert_eq!(back, AlgorithmId::Dijkstra);
    }
}
