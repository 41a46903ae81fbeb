use crate::board::*;
use crate::engine::side_score;
use rand::Rng;
use std::time::{Duration, Instant};

type NodeIdx = u32;
const NULL_NODE_IDX: NodeIdx = std::u32::MAX;

// default exploration constant of the UCT score
pub const EXPLORATION: f32 = std::f32::consts::SQRT_2;

pub struct SearchResult {
    pub best_move: Idx,
    pub rollouts: u64,
}

// a Monte-Carlo tree node; parent/children are arena indices
struct TreeNode {
    position: Position,
    parent: NodeIdx,
    mover: Side, // side that played `mov`; meaningless at the root
    mov: Idx,
    children: Vec<NodeIdx>,
    untried: Moves,
    visits: u32,
    wins: u32,
}

impl TreeNode {
    fn new(pos: Position, parent: NodeIdx, mover: Side, mov: Idx) -> TreeNode {
        TreeNode {
            untried: pos.legal_moves(),
            position: pos,
            parent,
            mover,
            mov,
            children: Vec::new(),
            visits: 0,
            wins: 0,
        }
    }
}

/// One search tree, rooted at a position snapshot. Built fresh for
/// every decision and dropped (arena and all) once the move is read
/// off.
pub struct Searcher<R: Rng> {
    nodes: Vec<TreeNode>,
    c: f32,
    rng: R,
}

impl<R: Rng> Searcher<R> {
    pub fn new(pos: Position, c: f32, rng: R) -> Searcher<R> {
        let root = TreeNode::new(pos, NULL_NODE_IDX, pos.side_to_move().other(), 0);
        Searcher {
            nodes: vec![root],
            c,
            rng,
        }
    }

    // run iterations until the budget is spent. The clock is checked
    // between iterations only; a started iteration always completes.
    pub fn go(&mut self, budget: Duration) -> u64 {
        let start = Instant::now();
        let mut rollouts: u64 = 0;
        while start.elapsed() < budget {
            self.iterate();
            rollouts += 1;
        }
        rollouts
    }

    // one select -> expand -> simulate -> backpropagate pass,
    // allocating at most one node
    pub fn iterate(&mut self) {
        // selection: descend while fully expanded and non-terminal
        let mut idx: NodeIdx = 0;
        while self.nodes[idx as usize].untried.is_empty()
            && !self.nodes[idx as usize].children.is_empty()
        {
            idx = self.select_child(idx);
        }
        // expansion
        if !self.nodes[idx as usize].untried.is_empty() {
            idx = self.expand(idx);
        }
        // simulation; a terminal position simulates to itself
        let outcome = self.rollout(self.nodes[idx as usize].position);
        self.backpropagate(idx, outcome);
    }

    fn select_child(&self, idx: NodeIdx) -> NodeIdx {
        let node = &self.nodes[idx as usize];
        let ln = (node.visits as f32).ln();
        let mut best_ucb = std::f32::NEG_INFINITY;
        let mut best_idx = NULL_NODE_IDX;
        for &i in &node.children {
            let child = &self.nodes[i as usize];
            // every child is visited by the iteration that created it,
            // so the score is always defined here
            debug_assert!(child.visits > 0);
            let ucb = child.wins as f32 / child.visits as f32
                + self.c * (ln / child.visits as f32).sqrt();
            debug_assert!(!ucb.is_nan());
            if ucb > best_ucb {
                best_ucb = ucb;
                best_idx = i;
            }
        }
        debug_assert!(best_idx != NULL_NODE_IDX);
        best_idx
    }

    // take one random untried move and descend into the new child
    fn expand(&mut self, idx: NodeIdx) -> NodeIdx {
        let n = self.nodes[idx as usize].untried.size();
        let j = self.rng.gen_range(0, n);
        let new_idx = self.nodes.len() as NodeIdx;

        let node = &mut self.nodes[idx as usize];
        let mov = node.untried.nth(j);
        node.untried.remove(mov);
        let mover = node.position.side_to_move();
        let mut pos = node.position;
        pos.make_move(mov);
        node.children.push(new_idx);

        self.nodes.push(TreeNode::new(pos, idx, mover, mov));
        new_idx
    }

    // uniformly random playout to termination
    fn rollout(&mut self, mut pos: Position) -> i32 {
        while !pos.is_over() {
            let moves = pos.legal_moves();
            let j = self.rng.gen_range(0, moves.size());
            pos.make_move(moves.nth(j));
        }
        pos.outcome()
    }

    // walk the parent chain up to and including the root. A node's win
    // counter is credited when the outcome matches the side that moved
    // into it; the root has no incoming move and only counts the visit.
    fn backpropagate(&mut self, mut idx: NodeIdx, outcome: i32) {
        loop {
            let node = &mut self.nodes[idx as usize];
            node.visits += 1;
            if node.parent == NULL_NODE_IDX {
                break;
            }
            if outcome == side_score(node.mover) {
                node.wins += 1;
            }
            idx = node.parent;
        }
    }

    // robust child: most visits, first encountered wins ties
    pub fn best_move(&self) -> Option<Idx> {
        let mut best: Option<Idx> = None;
        let mut best_visits: u32 = 0;
        for &i in &self.nodes[0].children {
            let child = &self.nodes[i as usize];
            if best.is_none() || child.visits > best_visits {
                best_visits = child.visits;
                best = Some(child.mov);
            }
        }
        best
    }

    /// Search, then read the decision off the root. `valid` is the
    /// externally supplied legal-move list and has the final say: an
    /// empty tree, or a disagreement with it about legality, falls
    /// back to a uniformly random member of the list.
    pub fn decide(&mut self, budget: Duration, valid: &[Idx]) -> SearchResult {
        assert!(!valid.is_empty(), "decide() needs a non-empty fallback list");
        let rollouts = self.go(budget);
        let best_move = match self.best_move() {
            Some(mov) if valid.contains(&mov) => mov,
            _ => valid[self.rng.gen_range(0, valid.len())],
        };
        SearchResult {
            best_move,
            rollouts,
        }
    }

    pub fn root_visits(&self) -> u32 {
        self.nodes[0].visits
    }

    // (move, visits) per direct root child, in creation order
    pub fn root_children(&self) -> Vec<(Idx, u32)> {
        self.nodes[0]
            .children
            .iter()
            .map(|&i| {
                let child = &self.nodes[i as usize];
                (child.mov, child.visits)
            })
            .collect()
    }
}
