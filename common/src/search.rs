use std::iter::successors;

use crate::{Board, visit_map::VisitMap};

/// Index of a board in the [`SearchTree`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct BoardId(u32);

impl BoardId {
    pub const ROOT: BoardId = BoardId(0);

    fn index(self) -> usize {
        self.0 as usize
    }

    /// Position in discovery order, starting at 1 for the root.
    pub fn ordinal(self) -> u32 {
        self.0 + 1
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    board: Board,
    depth: u32,
    parent: Option<BoardId>,
    children: Vec<BoardId>,
    next_on_winning_path: Option<BoardId>,
}

impl Node {
    fn new(board: Board, depth: u32, parent: Option<BoardId>) -> Self {
        Node {
            board,
            depth,
            parent,
            children: Vec::new(),
            next_on_winning_path: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of jumps taken from the root to reach this board
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn parent(&self) -> Option<BoardId> {
        self.parent
    }

    /// Boards reached by one jump, in the order the jumps were found.
    pub fn children(&self) -> &[BoardId] {
        &self.children
    }

    /// No legal jump is left on this board.
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_winner(&self) -> bool {
        self.board.count_pegs() == 1
    }

    /// The next board towards the first winner. Only set on the winning path.
    pub fn next_on_winning_path(&self) -> Option<BoardId> {
        self.next_on_winning_path
    }
}

/// Receives every board of a search as soon as it is discovered, before any
/// of its children exist.
pub trait Observer {
    fn on_visit(&mut self, id: BoardId, node: &Node);
}

impl Observer for () {
    fn on_visit(&mut self, _id: BoardId, _node: &Node) {}
}

/// The full tree of boards reachable from a root, plus what the search
/// learned about winners along the way.
pub struct SearchTree {
    nodes: Vec<Node>,
    total_wins: u64,
    first_win: Option<BoardId>,
}

impl SearchTree {
    pub fn explore(root: Board) -> Self {
        Self::explore_with(root, &mut ())
    }

    /// Visit every board reachable from `root` depth first. Jumps are tried
    /// in [`Board::jumps`] order and each child is explored completely before
    /// the next jump is considered, which fixes the discovery order.
    ///
    /// Afterwards the winning path to the first winner is linked, see
    /// [`SearchTree::winning_path`].
    pub fn explore_with(root: Board, observer: &mut impl Observer) -> Self {
        let mut tree = SearchTree {
            nodes: vec![Node::new(root, 0, None)],
            total_wins: 0,
            first_win: None,
        };

        tree.expand(BoardId::ROOT, observer);
        tree.link_winning_path();

        log::debug!(
            "explored {} boards, {} winners",
            tree.total_boards(),
            tree.total_wins
        );
        tree
    }

    /// Returns whether any legal jump was found from this board.
    fn expand(&mut self, id: BoardId, observer: &mut impl Observer) -> bool {
        let node = &self.nodes[id.index()];
        let board = node.board;
        let depth = node.depth;
        let is_winner = node.is_winner();
        observer.on_visit(id, node);

        // no early return on a winner, the scan below still runs
        if is_winner {
            if self.first_win.is_none() {
                log::debug!("first winner found at board {}", id.ordinal());
                self.first_win = Some(id);
            }
            self.total_wins += 1;
        }

        let mut found_jump = false;
        for jump in board.jumps() {
            let child = self.push(Node::new(board.apply_jump(jump), depth + 1, Some(id)));
            self.nodes[id.index()].children.push(child);
            found_jump = true;

            self.expand(child, observer);
        }

        found_jump
    }

    fn push(&mut self, node: Node) -> BoardId {
        let id = BoardId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Walk from the first winner up to the root, pointing every parent at
    /// the child it was left through.
    fn link_winning_path(&mut self) {
        let Some(winner) = self.first_win else {
            return;
        };

        let mut id = winner;
        while let Some(parent) = self.nodes[id.index()].parent {
            self.nodes[parent.index()].next_on_winning_path = Some(id);
            id = parent;
        }
        log::debug!(
            "linked winning path of {} boards",
            self.nodes[winner.index()].depth + 1
        );
    }

    pub fn root(&self) -> &Node {
        &self.nodes[BoardId::ROOT.index()]
    }

    pub fn node(&self, id: BoardId) -> &Node {
        &self.nodes[id.index()]
    }

    /// All boards in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = (BoardId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (BoardId(i as u32), node))
    }

    /// Number of boards discovered, the root included.
    pub fn total_boards(&self) -> usize {
        self.nodes.len()
    }

    /// Number of discovered boards with a single peg left.
    pub fn total_wins(&self) -> u64 {
        self.total_wins
    }

    /// The winning board that was discovered first, if any.
    pub fn first_win(&self) -> Option<BoardId> {
        self.first_win
    }

    /// The board itself followed by its parents, up to the root.
    pub fn ancestors(&self, id: BoardId) -> impl Iterator<Item = BoardId> + '_ {
        successors(Some(id), |&id| self.node(id).parent)
    }

    /// Boards from the root to the first winner, following the forward links.
    /// Empty if no winner was found.
    pub fn winning_path(&self) -> WinningPath<'_> {
        WinningPath {
            tree: self,
            next: self.first_win.map(|_| BoardId::ROOT),
        }
    }

    /// Number of different peg arrangements among all discovered boards.
    pub fn distinct_positions(&self) -> u64 {
        let mut map = VisitMap::new(self.root().board.nr_holes());
        for node in &self.nodes {
            map.visit(&node.board);
        }
        map.nr_visited()
    }
}

pub struct WinningPath<'a> {
    tree: &'a SearchTree,
    next: Option<BoardId>,
}

impl<'a> Iterator for WinningPath<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.next?);
        self.next = node.next_on_winning_path;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use crate::{Cell, Layout, coord::Coord};

    use super::*;

    fn coord(row: i8, col: i8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn center_tree() -> &'static SearchTree {
        static TREE: OnceLock<SearchTree> = OnceLock::new();
        TREE.get_or_init(|| SearchTree::explore(Board::initial(Layout::Center)))
    }

    fn only_peg(board: &Board) -> Coord {
        let mut pegs = board.coords().filter(|&c| board.cell(c) == Cell::Occupied);
        let peg = pegs.next().unwrap();
        assert_eq!(pegs.next(), None);
        peg
    }

    #[test]
    fn test_center_layout_baseline() {
        let tree = center_tree();
        assert_eq!(tree.total_boards(), 323873);
        assert_eq!(tree.total_wins(), 1550);
        assert_eq!(tree.distinct_positions(), 1651);

        let winner = tree.first_win().unwrap();
        assert_eq!(winner.ordinal(), 19402);
        assert_eq!(only_peg(tree.node(winner).board()), coord(6, 6));
    }

    #[test]
    fn test_every_jump_removes_one_peg() {
        let tree = center_tree();
        for (id, node) in tree.nodes() {
            for &child in node.children() {
                let child = tree.node(child);
                assert_eq!(child.board().count_pegs(), node.board().count_pegs() - 1);
                assert_eq!(child.parent(), Some(id));
                assert_eq!(child.depth(), node.depth() + 1);
            }
        }
    }

    #[test]
    fn test_invalid_cells_never_change() {
        let tree = center_tree();
        let root = tree.root().board();
        let invalid: Vec<_> = root
            .coords()
            .filter(|&c| root.cell(c) == Cell::Invalid)
            .collect();

        for (_, node) in tree.nodes() {
            for &c in &invalid {
                assert_eq!(node.board().cell(c), Cell::Invalid);
            }
        }
    }

    #[test]
    fn test_last_moved_marks_the_landing_hole() {
        let tree = center_tree();
        assert_eq!(tree.root().board().last_moved(), None);

        for (id, node) in tree.nodes().skip(1) {
            let landed = node.board().last_moved().unwrap();
            assert_eq!(node.board().cell(landed), Cell::Occupied, "board {id:?}");
        }
    }

    #[test]
    fn test_terminal_boards_have_no_jumps() {
        let tree = center_tree();
        assert!(!tree.root().is_terminal());

        for (_, node) in tree.nodes() {
            assert_eq!(node.is_terminal(), node.board().jumps().next().is_none());
            if node.is_winner() {
                assert!(node.is_terminal());
            }
        }
    }

    #[test]
    fn test_discovery_order_is_depth_first() {
        let tree = center_tree();
        let root = tree.root();
        // the first child is explored completely before the second one exists
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].ordinal(), 2);

        let second = root.children()[1];
        let first_subtree = tree
            .nodes()
            .filter(|&(id, _)| tree.ancestors(id).any(|a| a == root.children()[0]))
            .count();
        assert_eq!(second.ordinal() as usize, 2 + first_subtree);
    }

    #[test]
    fn test_winning_path_drops_one_peg_per_board() {
        let tree = center_tree();
        let path: Vec<_> = tree.winning_path().collect();

        let counts: Vec<_> = path.iter().map(|n| n.board().count_pegs()).collect();
        assert_eq!(counts, (1..=14).rev().collect::<Vec<_>>());

        assert_eq!(path[0].board(), tree.root().board());
        let winner = tree.node(tree.first_win().unwrap());
        assert_eq!(path.last().unwrap().board(), winner.board());
        assert_eq!(winner.next_on_winning_path(), None);

        for pair in path.windows(2) {
            let next = tree.node(pair[0].next_on_winning_path().unwrap());
            assert_eq!(next.board(), pair[1].board());
            assert_eq!(tree.node(next.parent().unwrap()).board(), pair[0].board());
        }
    }

    #[test]
    fn test_winning_path_moves() {
        let landings: Vec<_> = center_tree()
            .winning_path()
            .skip(1)
            .map(|n| n.board().last_moved().unwrap())
            .collect();

        assert_eq!(
            landings,
            vec![
                coord(4, 6),
                coord(5, 5),
                coord(5, 7),
                coord(5, 9),
                coord(3, 5),
                coord(4, 4),
                coord(6, 4),
                coord(6, 6),
                coord(6, 8),
                coord(4, 8),
                coord(6, 6),
                coord(6, 4),
                coord(6, 6),
            ]
        );
    }

    #[test]
    fn test_repeated_search_finds_same_winner() {
        let a = center_tree();
        let b = SearchTree::explore(Board::initial(Layout::Center));

        assert_eq!(a.total_boards(), b.total_boards());
        assert_eq!(a.first_win(), b.first_win());

        let chain_a: Vec<_> = a.ancestors(a.first_win().unwrap()).collect();
        let chain_b: Vec<_> = b.ancestors(b.first_win().unwrap()).collect();
        assert_eq!(chain_a, chain_b);
        assert!(a.winning_path().map(Node::board).eq(b.winning_path().map(Node::board)));
    }

    #[test]
    fn test_observer_sees_every_board_in_order() {
        struct Recorder(Vec<(u32, u32)>);
        impl Observer for Recorder {
            fn on_visit(&mut self, id: BoardId, node: &Node) {
                assert!(node.is_terminal(), "children are added after the visit");
                self.0.push((id.ordinal(), node.parent().map_or(0, BoardId::ordinal)));
            }
        }

        let board = Board::from_ascii([
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "__#_#_._#_.__",
            "_____________",
            "_____________",
        ]);
        let mut recorder = Recorder(Vec::new());
        let tree = SearchTree::explore_with(board, &mut recorder);

        // one opening jump, after which either remaining peg can take the other
        assert_eq!(recorder.0.len(), tree.total_boards());
        assert_eq!(recorder.0, vec![(1, 0), (2, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_small_board_tree() {
        let board = Board::from_ascii([
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "__._#_#_.____",
            "_____________",
            "_____________",
        ]);
        let tree = SearchTree::explore(board);

        assert_eq!(tree.total_boards(), 3);
        assert_eq!(tree.total_wins(), 2);
        assert_eq!(tree.distinct_positions(), 3);

        let winner = tree.first_win().unwrap();
        assert_eq!(winner.ordinal(), 2);
        assert_eq!(only_peg(tree.node(winner).board()), coord(6, 8));
        assert_eq!(tree.winning_path().count(), 2);
    }

    #[test]
    fn test_unsolvable_board() {
        let board = Board::from_ascii([
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "_____________",
            "__#_._#_.____",
            "_____________",
            "_____________",
        ]);
        let tree = SearchTree::explore(board);

        assert_eq!(tree.total_boards(), 1);
        assert_eq!(tree.total_wins(), 0);
        assert_eq!(tree.first_win(), None);
        assert!(tree.root().is_terminal());
        assert_eq!(tree.winning_path().count(), 0);
    }

    #[test]
    fn test_single_peg_root_is_its_own_winning_path() {
        let board = Board::from_ascii([
            "_____________",
            "_____________",
            "______#______",
            "_____._._____",
            "____._._.____",
            "___._._._.___",
            "__._._._._.__",
            "_____________",
            "_____________",
        ]);
        let tree = SearchTree::explore(board);

        assert_eq!(tree.total_boards(), 1);
        assert_eq!(tree.first_win(), Some(BoardId::ROOT));
        assert_eq!(tree.winning_path().count(), 1);
    }

    #[test]
    #[ignore = "large search"]
    fn test_alternate_layout_baselines() {
        let expected = [
            (Layout::Apex, 1293179, 29760),
            (Layout::SecondRowLeft, 671085, 14880),
            (Layout::ThirdRowLeft, 2592133, 85258),
        ];

        for (layout, total_boards, total_wins) in expected {
            let tree = SearchTree::explore(Board::initial(layout));
            assert_eq!(tree.total_boards(), total_boards, "{layout:?}");
            assert_eq!(tree.total_wins(), total_wins, "{layout:?}");
            assert_eq!(tree.winning_path().count(), 14, "{layout:?}");
        }
    }
}
