use navgrid_core::{euclid, PlanNode, Pos};

/// Arena of [`PlanNode`]s plus the edges between them, both index-keyed.
///
/// Nodes are never removed; RRT* rewiring re-parents a node in place and
/// replaces its single inbound edge. Because edges are stored as index
/// pairs, the replacement cannot match the wrong edge even when several
/// nodes share a position.
pub(crate) struct PlanTree {
    nodes: Vec<PlanNode>,
    edges: Vec<(usize, usize)>,
}

impl PlanTree {
    /// A tree with one root at `pos`, cost zero.
    pub(crate) fn rooted(pos: Pos) -> Self {
        Self {
            nodes: vec![PlanNode {
                pos,
                parent: None,
                cost: 0.0,
            }],
            edges: Vec::new(),
        }
    }

    /// An unrooted node set seeded with `start` and `goal` (indices 0 and 1),
    /// as PRM wants it.
    pub(crate) fn seeded(start: Pos, goal: Pos) -> Self {
        let mut tree = Self::rooted(start);
        tree.push(goal, None, 0.0);
        tree
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, idx: usize) -> &PlanNode {
        &self.nodes[idx]
    }

    pub(crate) fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Append a node, returning its index.
    pub(crate) fn push(&mut self, pos: Pos, parent: Option<usize>, cost: f64) -> usize {
        self.nodes.push(PlanNode { pos, parent, cost });
        self.nodes.len() - 1
    }

    /// Record a traversable segment between two nodes.
    pub(crate) fn link(&mut self, from: usize, to: usize) {
        self.edges.push((from, to));
    }

    /// Index of the node nearest to `p` by Euclidean distance (linear scan,
    /// earliest on ties).
    pub(crate) fn nearest(&self, p: Pos) -> usize {
        let mut best = 0;
        let mut best_dist = euclid(self.nodes[0].pos, p);
        for (i, n) in self.nodes.iter().enumerate().skip(1) {
            let d = euclid(n.pos, p);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Indices of all nodes strictly within `radius` of `p`.
    pub(crate) fn near(&self, p: Pos, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| euclid(n.pos, p) < radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// Re-parent `node` through `new_parent` at the given total cost,
    /// replacing its inbound edge.
    pub(crate) fn reparent(&mut self, node: usize, new_parent: usize, cost: f64) {
        if let Some(edge) = self.edges.iter_mut().find(|(_, to)| *to == node) {
            edge.0 = new_parent;
        }
        self.nodes[node].parent = Some(new_parent);
        self.nodes[node].cost = cost;
    }

    /// Positions along the parent chain from the root to `idx`.
    pub(crate) fn path_to(&self, idx: usize) -> Vec<Pos> {
        let mut path = vec![self.nodes[idx].pos];
        let mut cur = idx;
        while let Some(parent) = self.nodes[cur].parent {
            path.push(self.nodes[parent].pos);
            cur = parent;
        }
        path.reverse();
        path
    }

    /// Snapshot of the node arena for a trace step.
    pub(crate) fn nodes_snapshot(&self) -> Vec<PlanNode> {
        self.nodes.clone()
    }

    /// Edges rendered to endpoint positions for a trace step.
    pub(crate) fn edge_endpoints(&self) -> Vec<(Pos, Pos)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].pos, self.nodes[b].pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_prefers_the_earliest_on_ties() {
        let mut tree = PlanTree::rooted(Pos::new(0, 0));
        tree.push(Pos::new(4, 0), None, 0.0);
        tree.push(Pos::new(0, 4), None, 0.0);
        assert_eq!(tree.nearest(Pos::new(4, 1)), 1);
        // (2, 2) is equidistant from all three nodes; the earliest wins.
        assert_eq!(tree.nearest(Pos::new(2, 2)), 0);
    }

    #[test]
    fn near_uses_a_strict_radius() {
        let mut tree = PlanTree::rooted(Pos::new(0, 0));
        tree.push(Pos::new(0, 3), None, 0.0);
        tree.push(Pos::new(0, 5), None, 0.0);
        assert_eq!(tree.near(Pos::new(0, 0), 5.0), vec![0, 1]);
        assert_eq!(tree.near(Pos::new(0, 0), 5.1), vec![0, 1, 2]);
    }

    #[test]
    fn reparent_replaces_the_inbound_edge() {
        let mut tree = PlanTree::rooted(Pos::new(0, 0));
        let a = tree.push(Pos::new(0, 3), Some(0), 3.0);
        tree.link(0, a);
        let b = tree.push(Pos::new(3, 0), Some(0), 3.0);
        tree.link(0, b);
        let c = tree.push(Pos::new(3, 3), Some(a), 6.0);
        tree.link(a, c);

        tree.reparent(c, b, 6.0);
        assert_eq!(tree.node(c).parent, Some(b));
        assert_eq!(tree.edges(), &[(0, a), (0, b), (b, c)]);
        assert_eq!(
            tree.path_to(c),
            vec![Pos::new(0, 0), Pos::new(3, 0), Pos::new(3, 3)]
        );
    }

    #[test]
    fn path_to_walks_the_parent_chain() {
        let mut tree = PlanTree::rooted(Pos::new(0, 0));
        let a = tree.push(Pos::new(1, 1), Some(0), 1.5);
        let b = tree.push(Pos::new(2, 2), Some(a), 3.0);
        assert_eq!(
            tree.path_to(b),
            vec![Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 2)]
        );
        assert_eq!(tree.path_to(0), vec![Pos::new(0, 0)]);
    }
}
