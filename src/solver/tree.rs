//! Strategy tree: the full decision structure produced by a breaker
//!
//! Nodes live in an arena (`Vec<Node>`) indexed by `NodeId` and are freed
//! in bulk when the tree is dropped. A child edge is keyed by feedback and
//! is either another node or the terminal `Solved` marker. For a node
//! holding `N` possibilities, the solved leaves reachable from it number
//! exactly `N`.

use crate::core::{Codeword, Feedback, Rules};

/// Index of a node within its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

/// Outcome of following one feedback edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// The guess at the parent node was the secret
    Solved,
    /// Further guessing is needed
    Node(NodeId),
}

/// One decision point: a guess and the per-feedback continuations
#[derive(Debug, Clone)]
pub struct Node {
    guess: Codeword,
    possibility_count: usize,
    candidate_count: usize,
    children: Vec<(Feedback, Child)>,
}

impl Node {
    #[must_use]
    pub fn new(
        guess: Codeword,
        possibility_count: usize,
        candidate_count: usize,
        children: Vec<(Feedback, Child)>,
    ) -> Self {
        Self {
            guess,
            possibility_count,
            candidate_count,
            children,
        }
    }

    #[inline]
    #[must_use]
    pub const fn guess(&self) -> &Codeword {
        &self.guess
    }

    /// Possibilities remaining when this guess was chosen
    #[inline]
    #[must_use]
    pub const fn possibility_count(&self) -> usize {
        self.possibility_count
    }

    /// Candidate guesses examined when this guess was chosen
    #[inline]
    #[must_use]
    pub const fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Child edges in ascending feedback-ordinal order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[(Feedback, Child)] {
        &self.children
    }

    /// Follow the edge for `feedback`, if present
    #[must_use]
    pub fn child(&self, feedback: Feedback) -> Option<Child> {
        self.children
            .iter()
            .find(|(fb, _)| *fb == feedback)
            .map(|(_, child)| *child)
    }
}

/// Aggregate depth statistics of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthInfo {
    /// Sum of leaf depths: total guesses to identify every secret
    pub total_steps: u64,
    /// `histogram[d]` = secrets identified in exactly `d` guesses;
    /// index 0 is unused, depths beyond the cap land in the last bucket
    pub histogram: Vec<usize>,
}

/// One edge record emitted by [`StrategyTree::for_each_edge`]
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub feedback: Feedback,
    /// The child's guess, or `None` for a solved leaf
    pub guess: Option<Codeword>,
    pub possibility_count: usize,
    pub candidate_count: usize,
    pub depth: usize,
}

/// Recursive decision tree covering every reachable feedback sequence
#[derive(Debug, Clone)]
pub struct StrategyTree {
    rules: Rules,
    nodes: Vec<Node>,
    root: NodeId,
}

/// Arena under construction; becomes a [`StrategyTree`] once the root is
/// known
#[derive(Debug)]
pub struct TreeBuilder {
    rules: Rules,
    nodes: Vec<Node>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            nodes: Vec::new(),
        }
    }

    /// Add a node whose children are already built
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Finish construction. Nodes unreachable from `root` (abandoned
    /// search branches) are dropped here, in bulk.
    #[must_use]
    pub fn finish(self, root: NodeId) -> StrategyTree {
        let mut tree = StrategyTree {
            rules: self.rules,
            nodes: self.nodes,
            root,
        };
        tree.compact();
        tree
    }
}

impl StrategyTree {
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    #[inline]
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Number of decision nodes reachable from the root
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total steps and per-depth leaf histogram, root depth = 1
    ///
    /// Every solved leaf accounts for exactly one secret; the histogram
    /// therefore sums to the root's possibility count.
    #[must_use]
    pub fn depth_info(&self, max_depth: usize) -> DepthInfo {
        let mut info = DepthInfo {
            total_steps: 0,
            histogram: vec![0; max_depth + 1],
        };
        self.visit_depths(self.root, 1, max_depth, &mut info);
        info
    }

    fn visit_depths(&self, id: NodeId, depth: usize, max_depth: usize, info: &mut DepthInfo) {
        for &(_, child) in self.node(id).children() {
            match child {
                Child::Solved => {
                    info.total_steps += depth as u64;
                    info.histogram[depth.min(max_depth)] += 1;
                }
                Child::Node(next) => self.visit_depths(next, depth + 1, max_depth, info),
            }
        }
    }

    /// Depth-first edge traversal for external writers
    ///
    /// Emits one record per edge: the feedback label, the child guess (or
    /// `None` when solved), and the child's possibility/candidate counts.
    pub fn for_each_edge<F: FnMut(&EdgeRecord)>(&self, mut f: F) {
        self.walk_edges(self.root, 1, &mut f);
    }

    fn walk_edges<F: FnMut(&EdgeRecord)>(&self, id: NodeId, depth: usize, f: &mut F) {
        let node = self.node(id);
        for &(feedback, child) in node.children() {
            match child {
                Child::Solved => f(&EdgeRecord {
                    feedback,
                    guess: None,
                    possibility_count: 1,
                    candidate_count: 0,
                    depth,
                }),
                Child::Node(next) => {
                    let target = self.node(next);
                    f(&EdgeRecord {
                        feedback,
                        guess: Some(*target.guess()),
                        possibility_count: target.possibility_count(),
                        candidate_count: target.candidate_count(),
                        depth,
                    });
                    self.walk_edges(next, depth + 1, f);
                }
            }
        }
    }

    /// Drop arena nodes unreachable from the root, remapping ids
    fn compact(&mut self) {
        let mut keep = vec![false; self.nodes.len()];
        mark(&self.nodes, self.root, &mut keep);
        if keep.iter().all(|&k| k) {
            return;
        }

        let mut remap = vec![u32::MAX; self.nodes.len()];
        let mut next = 0u32;
        for (index, &kept) in keep.iter().enumerate() {
            if kept {
                remap[index] = next;
                next += 1;
            }
        }

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .enumerate()
            .filter(|(index, _)| keep[*index])
            .map(|(_, mut node)| {
                for (_, child) in &mut node.children {
                    if let Child::Node(id) = child {
                        *child = Child::Node(NodeId(remap[id.0 as usize]));
                    }
                }
                node
            })
            .collect();
        self.root = NodeId(remap[self.root.0 as usize]);
    }
}

fn mark(nodes: &[Node], id: NodeId, keep: &mut [bool]) {
    if keep[id.0 as usize] {
        return;
    }
    keep[id.0 as usize] = true;
    for &(_, child) in nodes[id.0 as usize].children() {
        if let Child::Node(next) = child {
            mark(nodes, next, keep);
        }
    }
}

/// Replay a secret against the tree, returning the number of guesses a
/// player following the tree would need, or `None` if the tree has no
/// path for it.
#[cfg(test)]
pub(crate) fn replay(tree: &StrategyTree, secret: &Codeword) -> Option<usize> {
    use crate::core::compare;

    let rules = tree.rules();
    let mut id = tree.root();
    for depth in 1.. {
        let node = tree.node(id);
        let feedback = compare(rules, node.guess(), secret);
        if feedback.is_perfect(rules) {
            return Some(depth);
        }
        match node.child(feedback)? {
            Child::Solved => return None, // solved edge for a non-perfect feedback
            Child::Node(next) => id = next,
        }
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Codeword;

    fn rules() -> Rules {
        Rules::new(2, 3, true).unwrap()
    }

    fn leaf(builder: &mut TreeBuilder, guess: &str) -> NodeId {
        let rules = builder.rules;
        let cw = Codeword::parse(rules, guess).unwrap();
        builder.push(Node::new(
            cw,
            1,
            1,
            vec![(rules.perfect(), Child::Solved)],
        ))
    }

    #[test]
    fn depth_info_counts_leaves() {
        let rules = rules();
        let mut builder = TreeBuilder::new(rules);
        let deep = leaf(&mut builder, "01");
        let root_guess = Codeword::parse(rules, "00").unwrap();
        let root = builder.push(Node::new(
            root_guess,
            2,
            2,
            vec![
                (Feedback::new(1, 0), Child::Node(deep)),
                (rules.perfect(), Child::Solved),
            ],
        ));
        let tree = builder.finish(root);

        let info = tree.depth_info(10);
        // One secret solved at depth 1, one at depth 2.
        assert_eq!(info.total_steps, 3);
        assert_eq!(info.histogram[1], 1);
        assert_eq!(info.histogram[2], 1);
        assert_eq!(info.histogram.iter().sum::<usize>(), 2);
    }

    #[test]
    fn compaction_drops_abandoned_nodes() {
        let rules = rules();
        let mut builder = TreeBuilder::new(rules);
        let _abandoned = leaf(&mut builder, "11");
        let kept = leaf(&mut builder, "01");
        let root_guess = Codeword::parse(rules, "00").unwrap();
        let root = builder.push(Node::new(
            root_guess,
            2,
            1,
            vec![
                (Feedback::new(1, 0), Child::Node(kept)),
                (rules.perfect(), Child::Solved),
            ],
        ));
        let tree = builder.finish(root);

        assert_eq!(tree.node_count(), 2);
        let root_node = tree.node(tree.root());
        assert_eq!(root_node.guess().to_string(), "00");
        match root_node.child(Feedback::new(1, 0)).unwrap() {
            Child::Node(id) => assert_eq!(tree.node(id).guess().to_string(), "01"),
            Child::Solved => panic!("expected a node child"),
        }
    }

    #[test]
    fn edge_traversal_emits_every_edge() {
        let rules = rules();
        let mut builder = TreeBuilder::new(rules);
        let deep = leaf(&mut builder, "01");
        let root_guess = Codeword::parse(rules, "00").unwrap();
        let root = builder.push(Node::new(
            root_guess,
            2,
            2,
            vec![
                (Feedback::new(1, 0), Child::Node(deep)),
                (rules.perfect(), Child::Solved),
            ],
        ));
        let tree = builder.finish(root);

        let mut records = Vec::new();
        tree.for_each_edge(|edge| records.push(edge.clone()));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].guess.unwrap().to_string(), "01");
        assert_eq!(records[0].depth, 1);
        assert!(records[1].guess.is_none()); // solved leaf beneath "01"
        assert_eq!(records[1].depth, 2);
        assert!(records[2].guess.is_none());
    }
}
