//! Shortest-path search over a built [`TerrainGraph`]

use crate::graph::TerrainGraph;
use crate::route::Route;
use crate::{Cost, Point, PointMap};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry: a node and the best known cost to reach it. Ordered by cost,
/// inverted so that `BinaryHeap` pops the cheapest entry first.
#[derive(PartialEq, Eq)]
struct Element(Point, Cost);

impl PartialOrd for Element {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for Element {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.1.cmp(&self.1)
    }
}

/// Runs Dijkstra from `start` until `goal` is settled, then reconstructs the
/// route from the predecessor chain. Returns `None` if `goal` is unreachable.
///
/// Edge weights are non-negative integers by construction, so no negative
/// handling is needed. Stale heap entries (a node re-pushed with a cheaper
/// cost before the old entry was popped) are skipped by comparing against the
/// recorded best cost.
pub(crate) fn dijkstra_search(graph: &TerrainGraph, start: Point, goal: Point) -> Option<Route> {
    let mut visited: PointMap<(Cost, Point)> = PointMap::default();
    let mut next = BinaryHeap::new();
    next.push(Element(start, 0));
    visited.insert(start, (0, start));

    let mut goal_cost = None;

    while let Some(Element(current, current_cost)) = next.pop() {
        match current_cost.cmp(&visited[&current].0) {
            Ordering::Greater => continue,
            Ordering::Equal => {}
            Ordering::Less => unreachable!("heap entry below the recorded best cost"),
        }

        if current == goal {
            goal_cost = Some(current_cost);
            break;
        }

        for &(other, weight) in graph.neighbors(current) {
            let other_cost = current_cost + weight;

            let mut needs_visit = true;
            if let Some((prev_cost, prev_id)) = visited.get_mut(&other) {
                if *prev_cost > other_cost {
                    *prev_cost = other_cost;
                    *prev_id = current;
                } else {
                    needs_visit = false;
                }
            } else {
                visited.insert(other, (other_cost, current));
            }

            if needs_visit {
                next.push(Element(other, other_cost));
            }
        }
    }

    let cost = goal_cost?;
    let steps = {
        let mut steps = vec![];
        let mut current = goal;
        while current != start {
            steps.push(current);
            let (_, prev) = visited[&current];
            current = prev;
        }
        steps.push(start);
        steps.reverse();
        steps
    };
    Some(Route::new(steps, cost))
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const PLAIN: (u8, u8, u8, u8) = (129, 255, 0, 153);
    const WATER: (u8, u8, u8, u8) = (22, 64, 223, 153);

    fn table() -> TerrainTable {
        let mut table = TerrainTable::new();
        // cost 4 keeps diagonal weights (6) strictly above orthogonal ones
        // (4), so the expected routes below are uniquely minimal
        table.insert(PLAIN, "Plain", 4.0).unwrap();
        table.insert(WATER, "Water", 1000.0).unwrap();
        table
    }

    #[test]
    fn trivial_route() {
        let raster = PixelBuffer::new(7, 7, PLAIN);
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table()).unwrap();

        let route = graph.shortest_path((1, 1), (1, 1)).unwrap();
        assert_eq!(route, vec![(1, 1)]);
        assert_eq!(route.weight(), 0);
    }

    #[test]
    fn straight_route_over_uniform_terrain() {
        let raster = PixelBuffer::new(8, 8, PLAIN);
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table()).unwrap();

        let route = graph.shortest_path((1, 1), (4, 1)).unwrap();
        assert_eq!(route, vec![(1, 1), (2, 1), (3, 1), (4, 1)]);
        assert_eq!(route.weight(), 12);
    }

    #[test]
    fn route_stays_out_of_the_water() {
        // columns 4.. are water; the goal sits right at the shore
        let raster = PixelBuffer::from_fn(9, 9, |x, _| if x >= 4 { WATER } else { PLAIN });
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table()).unwrap();

        let route = graph.shortest_path((1, 1), (3, 1)).unwrap();
        assert_eq!(route, vec![(1, 1), (2, 1), (3, 1)]);
        // every node on the route is on dry land
        for &node in route.nodes() {
            assert_eq!(&*graph.terrain_at(node).unwrap().label, "Plain");
        }
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let raster = PixelBuffer::new(7, 7, PLAIN);
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table()).unwrap();

        assert_eq!(
            graph.shortest_path((100, 100), (1, 1)),
            Err(Error::NodeNotFound((100, 100)))
        );
        assert_eq!(
            graph.shortest_path((1, 1), (6, 6)),
            Err(Error::NodeNotFound((6, 6)))
        );
    }

    #[test]
    fn isolated_corner_has_no_route() {
        // with step 2 on a 7x7 raster only (2, 2) emits a forward star,
        // so the border node (0, 4) never receives an edge
        let raster = PixelBuffer::new(7, 7, PLAIN);
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 2).unwrap();
        graph.build_edges(&table()).unwrap();

        assert_eq!(
            graph.shortest_path((2, 2), (0, 4)),
            Err(Error::NoPathFound((2, 2), (0, 4)))
        );
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let raster = PixelBuffer::from_fn(12, 12, |x, y| {
            if (x + y) % 5 == 0 {
                WATER
            } else {
                PLAIN
            }
        });
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table()).unwrap();

        let first = graph.shortest_path((1, 1), (9, 9)).unwrap();
        for _ in 0..5 {
            assert_eq!(graph.shortest_path((1, 1), (9, 9)).unwrap(), first);
        }
    }
}
