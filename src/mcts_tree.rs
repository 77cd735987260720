//! Search tree with arena allocation.
//!
//! Nodes live in an `ego_tree::Tree` and refer to their parent and children by
//! [`NodeId`], so walking up for backpropagation never needs a back-reference.

use crate::board::Board;
use crate::error::MctsError;
use crate::mcts_node::MctsNode;
use ego_tree::{NodeId, NodeRef, Tree};

/// The tree built by one search, rooted at the position being searched.
#[derive(Debug, Clone)]
pub struct SearchTree<T: Board> {
    tree: Tree<MctsNode<T>>,
}

impl<T: Board> SearchTree<T> {
    /// Creates a tree holding a single unvisited root for `board`.
    pub fn new(board: T) -> Self {
        Self {
            tree: Tree::new(MctsNode::new(board, None)),
        }
    }

    /// Returns an immutable reference to the underlying tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn root(&self) -> &MctsNode<T> {
        self.tree.root().value()
    }

    pub fn get(&self, id: NodeId) -> Option<&MctsNode<T>> {
        self.tree.get(id).map(|node| node.value())
    }

    /// Child ids of `id` in expansion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|parent| parent.id())
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.tree.root().descendants().count()
    }

    /// Always false, a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn node(&self, id: NodeId) -> Result<NodeRef<'_, MctsNode<T>>, MctsError> {
        self.tree
            .get(id)
            .ok_or(MctsError::InvariantViolation("node id does not belong to this tree"))
    }

    /// Descends from the root while the current node is non-terminal and fully expanded,
    /// each time moving to the child with the best UCT score for `exploration`.
    pub fn select(&self, exploration: f64) -> NodeId {
        let mut current = self.tree.root();
        while !current.value().is_terminal() && current.value().is_fully_expanded() {
            match best_child_of(current, exploration) {
                Some(child) => current = child,
                None => break,
            }
        }
        current.id()
    }

    /// Child of `id` with the best UCT score for `exploration`. The first child wins ties.
    pub fn best_child(&self, id: NodeId, exploration: f64) -> Result<Option<NodeId>, MctsError> {
        let node = self.node(id)?;
        Ok(best_child_of(node, exploration).map(|child| child.id()))
    }

    /// Expands the last untried move of `id` into a new child and returns the child.
    ///
    /// Returns `id` unchanged when the node is terminal or has nothing left to try.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId, MctsError> {
        let mut node = self
            .tree
            .get_mut(id)
            .ok_or(MctsError::InvariantViolation("node id does not belong to this tree"))?;
        let data = node.value();
        if data.is_terminal() {
            return Ok(id);
        }
        let Some(b_move) = data.untried_moves.pop() else {
            return Ok(id);
        };

        let player = data.board.next_player();
        let board = data.board.apply(b_move, player)?;
        let child = node.append(MctsNode::new(board, Some(b_move)));
        Ok(child.id())
    }

    /// Adds one visit and `reward` to `id`, then walks to the root flipping the sign of
    /// the reward at every level.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) -> Result<(), MctsError> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }

        let mut reward = reward;
        for node_id in path {
            let mut node = self
                .tree
                .get_mut(node_id)
                .ok_or(MctsError::InvariantViolation("node id does not belong to this tree"))?;
            let stats = node.value();
            stats.visits += 1;
            stats.reward += reward;
            reward = -reward;
        }
        Ok(())
    }

    /// Depth of `id` below the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// The move of the root child with the best win rate, without exploration.
    pub fn best_move(&self) -> Result<T::Move, MctsError> {
        let best = self
            .best_child(self.root_id(), 0.0)?
            .ok_or(MctsError::InvariantViolation("root has no expanded children"))?;
        self.node(best)?
            .value()
            .prev_move
            .ok_or(MctsError::InvariantViolation("best child has no originating move"))
    }
}

fn best_child_of<T: Board>(
    node: NodeRef<'_, MctsNode<T>>,
    exploration: f64,
) -> Option<NodeRef<'_, MctsNode<T>>> {
    let parent_visits = node.value().visits;
    let mut best = None;
    let mut max_score = f64::NEG_INFINITY;
    for child in node.children() {
        let score = child.value().uct_score(parent_visits, exploration);
        if best.is_none() || score > max_score {
            max_score = score;
            best = Some(child);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use crate::board::Player;
    use crate::boards::tic_tac_toe::{Move, TicTacToeBoard};
    use crate::error::MctsError;
    use crate::mcts_tree::SearchTree;

    #[test]
    fn expansion_consumes_moves_in_reverse_order() {
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root = tree.root_id();

        let first = tree.expand(root).unwrap();
        let second = tree.expand(root).unwrap();

        assert_eq!(tree.get(first).unwrap().prev_move, Some(Move::new(2, 2)));
        assert_eq!(tree.get(second).unwrap().prev_move, Some(Move::new(2, 1)));
        assert_eq!(tree.root().untried_moves.len(), 7);
        assert_eq!(tree.children(root), vec![first, second]);
        assert_eq!(tree.parent(first), Some(root));
        assert_eq!(tree.depth(first), 1);
        assert_eq!(tree.len(), 3);

        let child = tree.get(first).unwrap();
        assert_eq!(child.board.cell(Move::new(2, 2)), Some(Player::X));
        assert_eq!(child.untried_moves.len(), 8);
    }

    #[test]
    fn terminal_nodes_are_not_expanded() {
        let board: TicTacToeBoard = "XX./OO./...".parse().unwrap();
        let mut tree = SearchTree::new(board);
        let root = tree.root_id();
        for _ in 0..5 {
            tree.expand(root).unwrap();
        }
        let winning = tree
            .children(root)
            .into_iter()
            .find(|id| tree.get(*id).unwrap().prev_move == Some(Move::new(0, 2)))
            .unwrap();

        assert!(tree.get(winning).unwrap().is_terminal());
        assert_eq!(tree.expand(winning), Ok(winning));
        assert_eq!(tree.expand(root), Ok(root));
        assert!(tree.children(winning).is_empty());
    }

    #[test]
    fn backpropagation_flips_sign_per_level() {
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root = tree.root_id();
        let child = tree.expand(root).unwrap();
        let grandchild = tree.expand(child).unwrap();

        tree.backpropagate(grandchild, 1.0).unwrap();
        tree.backpropagate(child, 1.0).unwrap();

        assert_eq!(tree.get(grandchild).unwrap().visits, 1);
        assert_eq!(tree.get(grandchild).unwrap().reward, 1.0);
        assert_eq!(tree.get(child).unwrap().visits, 2);
        assert_eq!(tree.get(child).unwrap().reward, 0.0);
        assert_eq!(tree.root().visits, 2);
        assert_eq!(tree.root().reward, 0.0);
        assert_eq!(tree.depth(grandchild), 2);
    }

    #[test]
    fn selection_descends_through_fully_expanded_nodes() {
        // Only two empty cells, so the root is fully expanded after two expansions.
        let board: TicTacToeBoard = "XOX/OOX/X..".parse().unwrap();
        let mut tree = SearchTree::new(board);
        let root = tree.root_id();
        assert_eq!(tree.select(2f64.sqrt()), root);

        let a = tree.expand(root).unwrap();
        tree.backpropagate(a, 0.0).unwrap();
        let b = tree.expand(root).unwrap();
        tree.backpropagate(b, 1.0).unwrap();

        // Both children have one visit, `b` has the better mean.
        assert_eq!(tree.select(2f64.sqrt()), b);
        assert_eq!(tree.best_child(root, 0.0), Ok(Some(b)));
        assert_eq!(tree.best_move(), Ok(Move::new(2, 1)));
    }

    #[test]
    fn ties_keep_the_first_child() {
        let mut tree = SearchTree::new(TicTacToeBoard::default());
        let root = tree.root_id();
        let first = tree.expand(root).unwrap();
        let second = tree.expand(root).unwrap();
        tree.backpropagate(first, 1.0).unwrap();
        tree.backpropagate(second, 1.0).unwrap();

        assert_eq!(tree.best_child(root, 0.0), Ok(Some(first)));
        assert_eq!(tree.best_child(root, 1.0), Ok(Some(first)));
    }

    #[test]
    fn best_move_needs_a_child() {
        let tree = SearchTree::new(TicTacToeBoard::default());
        assert!(matches!(
            tree.best_move(),
            Err(MctsError::InvariantViolation(_))
        ));
    }
}
