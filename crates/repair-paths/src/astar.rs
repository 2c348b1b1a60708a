use std::collections::{BinaryHeap, HashMap, HashSet};

use repair_core::Cell;

use crate::neighbors::Neighbors;
use crate::node::PathNode;
use crate::strategy::{Goals, Strategy};
use crate::tiles::WeightedMap;

/// What happens when a cheaper route to a cell already in the open set is
/// found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelinkPolicy {
    /// Relink the predecessor and take over the cheaper weight, fill and
    /// step count.
    #[default]
    Strict,
    /// Relink the predecessor only, leaving the stale weight in the open
    /// set. Reproduces traces recorded with the legacy engine.
    PredecessorOnly,
}

/// Tuning for a single search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub relink: RelinkPolicy,
    /// Give up (no path) once this many nodes have been closed.
    pub max_expanded: Option<usize>,
}

/// Counters collected during one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Start cells admitted into the open set.
    pub seeded: usize,
    /// Nodes moved to the closed set.
    pub expanded: usize,
    /// Open nodes relinked to a cheaper predecessor.
    pub relinked: usize,
    /// Whether `max_expanded` ended the search.
    pub capped: bool,
}

/// A finished search: the post-processed path and its counters.
#[derive(Debug)]
pub struct SearchResult {
    pub path: Option<PathNode>,
    pub stats: SearchStats,
}

// Arena entry. `node.predecessor` stays empty until the chain is assembled;
// the search tree is tracked through `parent` indices.
struct Slot {
    node: PathNode,
    parent: Option<usize>,
    closed: bool,
}

/// Open-set entry, ordered by weight then insertion for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    weight: i64,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest weight, oldest first.
        other
            .weight
            .cmp(&self.weight)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path between `source` and `target` with default options.
///
/// Expansion starts from `target` and stops on `source`: the returned head
/// is a `source` cell and following `predecessor` leads to a `target` cell
/// (before the strategy's post-processing). `None` means no path exists.
pub fn find_path<S: Strategy + ?Sized>(
    map: &WeightedMap,
    strategy: &S,
    source: &[Cell],
    target: &[Cell],
) -> Option<PathNode> {
    search(map, strategy, source, target, &SearchOptions::default()).path
}

/// Best-first search over `map` driven by `strategy`.
///
/// The tile lock is taken once per cell lookup and released before the next,
/// so edits from other threads may interleave with the search.
pub fn search<S: Strategy + ?Sized>(
    map: &WeightedMap,
    strategy: &S,
    source: &[Cell],
    target: &[Cell],
    opts: &SearchOptions,
) -> SearchResult {
    let goals = Goals::new(source);
    let extent = map.extent();
    let mut stats = SearchStats::default();

    let mut slots: Vec<Slot> = Vec::new();
    let mut open: HashMap<Cell, usize> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut heap: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq: u64 = 0;

    // Seed the open set from the expansion side.
    for &c in target {
        if open.contains_key(&c) {
            continue;
        }
        let mut node = PathNode::root(c);
        let allowed = {
            let tiles = map.lock();
            strategy.compute_weight(&mut node, tiles.get(c), &goals)
        };
        if !allowed {
            continue;
        }
        let idx = slots.len();
        heap.push(NodeRef {
            idx,
            weight: node.weight,
            seq,
        });
        seq += 1;
        slots.push(Slot {
            node,
            parent: None,
            closed: false,
        });
        open.insert(c, idx);
        stats.seeded += 1;
    }

    let mut nb = Neighbors::new();

    let found = 'search: loop {
        let Some(current) = heap.pop() else {
            break 'search None;
        };
        let ci = current.idx;

        // Skip entries superseded by a relink or already closed.
        if slots[ci].closed || slots[ci].node.weight != current.weight {
            continue;
        }

        let cell = slots[ci].node.cell;
        if strategy.is_goal(cell, &goals) {
            break 'search Some(ci);
        }

        if opts.max_expanded.is_some_and(|max| stats.expanded >= max) {
            log::warn!(
                "{} search gave up after expanding {} nodes",
                strategy.name(),
                stats.expanded
            );
            stats.capped = true;
            break 'search None;
        }

        open.remove(&cell);
        closed.insert(cell);
        slots[ci].closed = true;
        stats.expanded += 1;

        let cur_fill = slots[ci].node.fill_weight;
        let cur_dist = slots[ci].node.dist_traveled;

        for &np in nb.orthogonal(cell, extent) {
            if closed.contains(&np) {
                continue;
            }

            let mut cand = PathNode::root(np);
            cand.dist_traveled = cur_dist + 1;
            let allowed = {
                let tiles = map.lock();
                let fill = tiles.get(np);
                cand.fill_weight = cur_fill + i64::from(fill);
                strategy.compute_weight(&mut cand, fill, &goals)
            };
            if !allowed {
                continue;
            }

            match open.get(&np).copied() {
                None => {
                    let idx = slots.len();
                    heap.push(NodeRef {
                        idx,
                        weight: cand.weight,
                        seq,
                    });
                    seq += 1;
                    slots.push(Slot {
                        node: cand,
                        parent: Some(ci),
                        closed: false,
                    });
                    open.insert(np, idx);
                }
                Some(ni) => {
                    let existing = &mut slots[ni];
                    if cand.weight >= existing.node.weight {
                        continue;
                    }
                    log::trace!(
                        "relink {np} via {cell}: weight {} -> {}",
                        existing.node.weight,
                        cand.weight
                    );
                    existing.parent = Some(ci);
                    stats.relinked += 1;
                    if opts.relink == RelinkPolicy::Strict {
                        existing.node = cand;
                        heap.push(NodeRef {
                            idx: ni,
                            weight: existing.node.weight,
                            seq,
                        });
                        seq += 1;
                    }
                }
            }
        }
    };

    let head = found.map(|idx| assemble(&mut slots, idx));
    log::debug!(
        "{} search from {} start cell(s) to {} goal cell(s): {} expanded, {} relinked, {}",
        strategy.name(),
        target.len(),
        source.len(),
        stats.expanded,
        stats.relinked,
        if head.is_some() { "found" } else { "no path" }
    );

    let path = {
        let tiles = map.lock();
        strategy.post_process(head, extent, &tiles)
    };
    SearchResult { path, stats }
}

/// Move the nodes on the route ending at `idx` out of the arena and link
/// them into an owned chain headed by `idx`.
fn assemble(slots: &mut [Slot], idx: usize) -> PathNode {
    let mut route = Vec::new();
    let mut next = slots[idx].parent;
    while let Some(i) = next {
        route.push(i);
        next = slots[i].parent;
    }

    let mut chain: Option<Box<PathNode>> = None;
    for &i in route.iter().rev() {
        let mut node = std::mem::replace(&mut slots[i].node, PathNode::root(Cell::ZERO));
        node.predecessor = chain;
        chain = Some(Box::new(node));
    }

    let mut head = std::mem::replace(&mut slots[idx].node, PathNode::root(Cell::ZERO));
    head.predecessor = chain;
    head
}

impl WeightedMap {
    /// Shorthand for [`find_path`] on this map.
    pub fn find_path<S: Strategy + ?Sized>(
        &self,
        strategy: &S,
        source: &[Cell],
        target: &[Cell],
    ) -> Option<PathNode> {
        find_path(self, strategy, source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::strategies::{ListToPoint, list_to_point, point_to_point, row_to_row};
    use crate::tiles::IMPASSABLE;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use repair_core::{Extent, to_cell, to_world};
    use std::collections::VecDeque;

    fn assert_connected(path: &PathNode) {
        let cells = path.cells();
        for w in cells.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not one step", w[0], w[1]);
        }
    }

    /// Reference shortest step count over passable cells.
    fn bfs_len(map: &WeightedMap, from: Cell, to: Cell) -> Option<usize> {
        let ext = map.extent();
        let blocked = |c: Cell| map.weight(c) == IMPASSABLE;
        if blocked(from) || blocked(to) {
            return None;
        }
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0usize)]);
        while let Some((c, d)) = queue.pop_front() {
            if c == to {
                return Some(d);
            }
            for n in c.neighbors_4() {
                if ext.contains(n) && !blocked(n) && seen.insert(n) {
                    queue.push_back((n, d + 1));
                }
            }
        }
        None
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let map = WeightedMap::new(10, 10);
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(9, 9)])
            .expect("open grid has a path");
        assert_eq!(path.len(), 19);
        assert_eq!(path.cell, Cell::new(0, 0));
        assert_eq!(path.tail().cell, Cell::new(9, 9));
        assert_eq!(path.dist_traveled, 18);
        assert_eq!(path.fill_weight, 0);
        assert_connected(&path);
    }

    #[test]
    fn same_cell_is_single_node() {
        let map = WeightedMap::new(4, 4);
        let c = Cell::new(2, 1);
        let path = map.find_path(&point_to_point(), &[c], &[c]).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path.predecessor.is_none());
    }

    #[test]
    fn open_grid_length_is_manhattan() {
        let map = WeightedMap::new(12, 9);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let a = Cell::new(rng.random_range(0..12), rng.random_range(0..9));
            let b = Cell::new(rng.random_range(0..12), rng.random_range(0..9));
            let path = find_path(&map, &point_to_point(), &[a], &[b]).unwrap();
            assert_eq!(path.len() as i32, manhattan(a, b) + 1, "{a} -> {b}");
            assert_eq!(path.cell, a);
            assert_eq!(path.tail().cell, b);
            assert_connected(&path);
        }
    }

    #[test]
    fn wall_forces_detour_through_gap() {
        let map = WeightedMap::new(10, 10);
        map.fill_tiles((0..9).map(|r| Cell::new(r, 5)), IMPASSABLE);
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(9, 9)])
            .unwrap();
        let cells = path.cells();
        assert!(cells.contains(&Cell::new(9, 5)));
        for r in 0..9 {
            assert!(!cells.contains(&Cell::new(r, 5)));
        }
        assert_eq!(path.len(), 19);
        assert_connected(&path);
    }

    #[test]
    fn blocked_straight_line_uses_alternate_route() {
        let map = WeightedMap::new(5, 5);
        let blocked = [Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)];
        map.fill_tiles(blocked, IMPASSABLE);
        let path = find_path(&map, &point_to_point(), &[Cell::new(2, 0)], &[Cell::new(2, 4)])
            .unwrap();
        for c in path.cells() {
            assert!(!blocked.contains(&c));
        }
        assert_eq!(path.len(), 7);
        assert_connected(&path);
    }

    #[test]
    fn full_wall_means_no_path() {
        let map = WeightedMap::new(10, 10);
        map.fill_tiles((0..10).map(|r| Cell::new(r, 5)), IMPASSABLE);
        let res = search(
            &map,
            &point_to_point(),
            &[Cell::new(0, 0)],
            &[Cell::new(9, 9)],
            &SearchOptions::default(),
        );
        assert!(res.path.is_none());
        assert!(!res.stats.capped);
        // Everything right of the wall was explored.
        assert_eq!(res.stats.expanded, 40);
    }

    #[test]
    fn impassable_endpoints() {
        let map = WeightedMap::new(6, 6);
        map.fill_tile(Cell::new(5, 5), IMPASSABLE);
        let res = search(
            &map,
            &point_to_point(),
            &[Cell::new(0, 0)],
            &[Cell::new(5, 5)],
            &SearchOptions::default(),
        );
        assert!(res.path.is_none());
        assert_eq!(res.stats.seeded, 0);

        assert!(find_path(&map, &point_to_point(), &[Cell::new(5, 5)], &[Cell::new(0, 0)]).is_none());
    }

    #[test]
    fn clearing_reopens_route() {
        let map = WeightedMap::new(3, 3);
        map.fill_tiles((0..3).map(|r| Cell::new(r, 1)), IMPASSABLE);
        let (src, dst) = ([Cell::new(0, 0)], [Cell::new(0, 2)]);
        assert!(find_path(&map, &point_to_point(), &src, &dst).is_none());
        map.clear_tile(Cell::new(1, 1));
        let path = find_path(&map, &point_to_point(), &src, &dst).unwrap();
        assert!(path.cells().contains(&Cell::new(1, 1)));
    }

    #[test]
    fn costly_tiles_are_avoided_when_cheaper() {
        let map = WeightedMap::new(5, 5);
        map.fill_tiles((0..4).map(|r| Cell::new(r, 2)), 10);
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(0, 4)])
            .unwrap();
        assert!(path.cells().contains(&Cell::new(4, 2)));
        assert_eq!(path.fill_weight, 0);
        assert_eq!(path.dist_traveled, 12);
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn costly_tiles_are_crossed_when_cheaper() {
        let map = WeightedMap::new(5, 5);
        map.fill_tiles((0..4).map(|r| Cell::new(r, 2)), 3);
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(0, 4)])
            .unwrap();
        assert_eq!(path.fill_weight, 3);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn matches_reference_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..40 {
            let map = WeightedMap::new(15, 15);
            for c in Extent::new(15, 15) {
                if rng.random_bool(0.25) {
                    map.fill_tile(c, IMPASSABLE);
                }
            }
            let a = Cell::new(rng.random_range(0..15), rng.random_range(0..15));
            let b = Cell::new(rng.random_range(0..15), rng.random_range(0..15));
            let expected = bfs_len(&map, a, b);
            let path = find_path(&map, &point_to_point(), &[a], &[b]);
            match (expected, path) {
                (None, None) => {}
                (Some(steps), Some(path)) => {
                    assert_eq!(path.len(), steps + 1, "round {round}: {a} -> {b}");
                    assert_connected(&path);
                    for c in path.cells() {
                        assert_ne!(map.weight(c), IMPASSABLE);
                    }
                }
                (e, p) => panic!("round {round}: expected {e:?}, got {:?}", p.map(|p| p.cells())),
            }
        }
    }

    #[test]
    fn strict_relink_keeps_costs_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = WeightedMap::new(12, 12);
        for c in Extent::new(12, 12) {
            if rng.random_bool(0.3) {
                map.fill_tile(c, rng.random_range(1..6));
            }
        }
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(11, 11)])
            .unwrap();
        let cells = path.cells();
        let fill: i64 = cells[..cells.len() - 1]
            .iter()
            .map(|&c| i64::from(map.weight(c)))
            .sum();
        assert_eq!(path.fill_weight, fill);
        assert_eq!(path.dist_traveled as usize, cells.len() - 1);
        assert_connected(&path);
    }

    #[test]
    fn predecessor_only_relink_still_connects() {
        let mut rng = StdRng::seed_from_u64(11);
        let map = WeightedMap::new(12, 12);
        for c in Extent::new(12, 12) {
            if rng.random_bool(0.3) {
                map.fill_tile(c, rng.random_range(1..6));
            }
        }
        let opts = SearchOptions {
            relink: RelinkPolicy::PredecessorOnly,
            max_expanded: None,
        };
        let res = search(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(11, 11)], &opts);
        let path = res.path.unwrap();
        assert_eq!(path.cell, Cell::new(0, 0));
        assert_eq!(path.tail().cell, Cell::new(11, 11));
        assert_connected(&path);
    }

    /// 2x5 map where (1,2) is first reached the long way round through the
    /// top row and then relinked through the cheaper (1,3).
    fn relink_map() -> WeightedMap {
        let map = WeightedMap::new(2, 5);
        map.fill_tile(Cell::new(0, 1), 9);
        map.fill_tile(Cell::new(1, 3), 1);
        map
    }

    fn relink_search(relink: RelinkPolicy) -> SearchResult {
        let opts = SearchOptions {
            relink,
            max_expanded: None,
        };
        search(&relink_map(), &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(1, 4)], &opts)
    }

    fn bottom_row() -> Vec<Cell> {
        vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(1, 2),
            Cell::new(1, 3),
            Cell::new(1, 4),
        ]
    }

    #[test]
    fn strict_relink_takes_over_cheaper_costs() {
        let res = relink_search(RelinkPolicy::Strict);
        assert!(res.stats.relinked >= 1);
        let path = res.path.unwrap();
        assert_eq!(path.cells(), bottom_row());
        // Only (1,3) carries weight; the root's own cell is not counted.
        assert_eq!(path.fill_weight, 1);
        assert_eq!(path.dist_traveled, 5);
        assert_eq!(path.weight, 6);
    }

    #[test]
    fn predecessor_only_relink_keeps_stale_costs() {
        let res = relink_search(RelinkPolicy::PredecessorOnly);
        assert!(res.stats.relinked >= 1);
        let path = res.path.unwrap();
        assert_eq!(path.cells(), bottom_row());
        assert_connected(&path);
        // Costs still describe the route through the top row.
        assert_eq!(path.fill_weight, 0);
        assert_eq!(path.dist_traveled, 7);
        assert_ne!(path.dist_traveled as usize, path.len() - 1);
    }

    #[test]
    fn heavy_corridor_does_not_overflow() {
        let map = WeightedMap::new(1, 4);
        map.fill_tile(Cell::new(0, 1), 1_500_000_000);
        map.fill_tile(Cell::new(0, 2), 1_500_000_000);
        let path = find_path(&map, &point_to_point(), &[Cell::new(0, 3)], &[Cell::new(0, 0)])
            .expect("corridor is passable");
        assert_eq!(path.len(), 4);
        assert_eq!(path.fill_weight, 3_000_000_000);
        assert_eq!(path.dist_traveled, 3);
        assert_eq!(path.weight, 3_000_000_003);
    }

    #[test]
    fn expansion_cap_gives_up() {
        let map = WeightedMap::new(50, 50);
        let opts = SearchOptions {
            max_expanded: Some(5),
            ..SearchOptions::default()
        };
        let res = search(&map, &point_to_point(), &[Cell::new(0, 0)], &[Cell::new(49, 49)], &opts);
        assert!(res.path.is_none());
        assert!(res.stats.capped);
        assert_eq!(res.stats.expanded, 5);
    }

    #[test]
    fn row_to_row_stops_on_goal_column() {
        let map = WeightedMap::new(10, 10);
        let path = find_path(&map, &row_to_row(), &[Cell::new(0, 6)], &[Cell::new(8, 2)]).unwrap();
        assert_eq!(path.cell, Cell::new(8, 6));
        assert_eq!(path.len(), 5);
        assert_connected(&path);
    }

    #[test]
    #[should_panic(expected = "requires exactly one goal cell")]
    fn point_to_point_with_many_sources_panics() {
        let map = WeightedMap::new(5, 5);
        find_path(
            &map,
            &point_to_point(),
            &[Cell::new(0, 0), Cell::new(4, 4)],
            &[Cell::new(2, 2)],
        );
    }

    #[test]
    fn list_to_point_breaks_ties_toward_later_goal() {
        let map = WeightedMap::new(10, 10);
        let goals = [Cell::new(5, 2), Cell::new(5, 8)];
        let start = [Cell::new(5, 5)];

        let fwd = find_path(&map, &list_to_point(false), &goals, &start).unwrap();
        assert_eq!(fwd.cell, Cell::new(5, 8));
        assert_eq!(fwd.tail().cell, Cell::new(5, 5));
        assert_eq!(fwd.len(), 4);

        let rev = find_path(&map, &list_to_point(true), &goals, &start).unwrap();
        assert_eq!(rev.cell, Cell::new(5, 5));
        assert_eq!(rev.tail().cell, Cell::new(5, 8));
        let mut back = fwd.cells();
        back.reverse();
        assert_eq!(rev.cells(), back);
    }

    #[test]
    fn list_to_point_reaches_nearest_goal() {
        let map = WeightedMap::new(10, 10);
        let goals = [Cell::new(0, 0), Cell::new(9, 9), Cell::new(4, 0)];
        let path = find_path(&map, &ListToPoint::new(false), &goals, &[Cell::new(4, 3)]).unwrap();
        assert_eq!(path.cell, Cell::new(4, 0));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn multiple_start_cells() {
        let map = WeightedMap::new(10, 10);
        let starts = [Cell::new(0, 9), Cell::new(9, 0), Cell::new(9, 0)];
        let res = search(
            &map,
            &point_to_point(),
            &[Cell::new(7, 0)],
            &starts,
            &SearchOptions::default(),
        );
        assert_eq!(res.stats.seeded, 2);
        let path = res.path.unwrap();
        assert_eq!(path.tail().cell, Cell::new(9, 0));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn no_goals_exhausts_open_set() {
        let map = WeightedMap::new(10, 10);
        let res = search(&map, &list_to_point(false), &[], &[Cell::new(3, 3)], &SearchOptions::default());
        assert!(res.path.is_none());
        assert_eq!(res.stats.expanded, 100);
    }

    #[test]
    fn empty_start_set_has_no_path() {
        let map = WeightedMap::new(10, 10);
        let res = search(&map, &point_to_point(), &[Cell::new(3, 3)], &[], &SearchOptions::default());
        assert!(res.path.is_none());
        assert_eq!(res.stats, SearchStats::default());
    }

    /// Tags every node with its step count; exercises the payload slot.
    struct StepTagging;

    impl Strategy for StepTagging {
        fn compute_weight(&self, node: &mut PathNode, fill: i32, goals: &Goals<'_>) -> bool {
            node.set_payload(format!("step {}", node.dist_traveled));
            point_to_point().compute_weight(node, fill, goals)
        }

        fn is_goal(&self, cell: Cell, goals: &Goals<'_>) -> bool {
            point_to_point().is_goal(cell, goals)
        }

        fn name(&self) -> &'static str {
            "step-tagging"
        }
    }

    #[test]
    fn payload_travels_with_nodes() {
        let map = WeightedMap::new(6, 6);
        let path = find_path(&map, &StepTagging, &[Cell::new(0, 0)], &[Cell::new(0, 3)]).unwrap();
        let tags: Vec<_> = path
            .iter()
            .map(|n| n.payload::<String>().cloned().unwrap())
            .collect();
        assert_eq!(tags, ["step 3", "step 2", "step 1", "step 0"]);
    }

    #[test]
    fn boxed_strategy_dispatch() {
        let map = WeightedMap::new(8, 8);
        let strategy = crate::StrategyKind::PointToPoint.build();
        let path = find_path(&map, strategy.as_ref(), &[Cell::new(1, 1)], &[Cell::new(6, 2)]);
        assert_eq!(path.unwrap().len(), 7);
    }

    #[test]
    fn world_positions_round_trip_through_search() {
        let map = WeightedMap::new(20, 20);
        let unit = to_cell(repair_core::WorldPoint::new(10.0, 3.0));
        let dest = to_cell(repair_core::WorldPoint::new(100.0, 60.0));
        let path = find_path(&map, &point_to_point(), &[unit], &[dest]).unwrap();
        let waypoints: Vec<_> = path.iter().map(|n| to_world(n.cell)).collect();
        assert_eq!(waypoints.first().copied(), Some(to_world(unit)));
        assert_eq!(waypoints.last().copied(), Some(to_world(dest)));
    }

    #[test]
    fn concurrent_searches_and_edits() {
        let map = WeightedMap::new(30, 30);
        let strategy = point_to_point();
        std::thread::scope(|s| {
            s.spawn(|| {
                for round in 0..200 {
                    let row = round % 29;
                    map.fill_tile(Cell::new(row, 15), IMPASSABLE);
                    if round % 3 == 0 {
                        map.clear_tile(Cell::new((row + 7) % 29, 15));
                    }
                }
            });
            for t in 0..4 {
                let map = &map;
                let strategy = &strategy;
                s.spawn(move || {
                    for i in 0..20 {
                        let a = Cell::new((t * 7 + i) % 30, 0);
                        let b = Cell::new((i * 3) % 30, 29);
                        if let Some(path) = find_path(map, strategy, &[a], &[b]) {
                            assert_eq!(path.cell, a);
                            assert_eq!(path.tail().cell, b);
                            assert_connected(&path);
                        }
                    }
                });
            }
        });
        // Row 29 of the wall column is never filled.
        assert_eq!(map.weight(Cell::new(29, 15)), 0);
        map.fill_tiles((0..29).map(|r| Cell::new(r, 15)), IMPASSABLE);
        let path = find_path(&map, &strategy, &[Cell::new(0, 0)], &[Cell::new(0, 29)]).unwrap();
        assert!(path.cells().contains(&Cell::new(29, 15)));
    }
}
