//! Turning a route into terrain stages and daily rest checkpoints

use crate::error::{Error, Result};
use crate::graph::TerrainGraph;
use crate::Point;
use std::sync::Arc;

/// One entry of an [`Itinerary`]: a node anchoring the entry, the real-world
/// distance and cost accumulated since the previous entry, and a terrain
/// label.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// For a stage: the node the stage started at. For a rest: the node the
    /// day's travel ends at.
    pub node: Point,
    /// Distance accumulated since the previous checkpoint of the same kind.
    pub distance: f64,
    /// Cost accumulated since the previous checkpoint of the same kind.
    pub cost: f64,
    /// For a stage: the terrain the stage crosses. For a rest: the terrain
    /// of the edge the day ended on.
    pub terrain: Arc<str>,
}

/// Two independent decompositions of one walked route, plus the raw node
/// list for rendering.
///
/// `stages` partitions the walk at terrain changes, `rests` partitions the
/// same walk at daily cost-budget boundaries. Both cover every edge exactly
/// once, so their distance sums agree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Itinerary {
    /// Terrain-homogeneous stretches, in travel order.
    pub stages: Vec<Checkpoint>,
    /// Budget-bounded daily checkpoints, in travel order. Empty if rests
    /// were disabled.
    pub rests: Vec<Checkpoint>,
    /// The ordered nodes of the walked route.
    pub nodes: Vec<Point>,
}

impl Itinerary {
    /// Total distance travelled: the sum over all stages.
    pub fn total_distance(&self) -> f64 {
        self.stages.iter().map(|stage| stage.distance).sum()
    }

    /// The day of arrival, counting from day 1: one more than the number of
    /// full travel days closed by a rest.
    pub fn travel_days(&self) -> usize {
        self.rests.len() + 1
    }
}

impl TerrainGraph {
    /// Walks `path` edge by edge and reports it as terrain stages and
    /// budget-driven rests.
    ///
    /// Per edge, `distance = pixel_length * factor * step` and
    /// `cost = distance * weight / factor`. The cost deliberately re-expands
    /// the *truncated* integer edge weight rather than the original terrain
    /// cost, so diagonal edges carry a small systematic rounding difference
    /// against orthogonal ones. That arithmetic is part of the observable
    /// output and is kept as is.
    ///
    /// Two accumulators run over the same edge stream:
    /// - a rest checkpoint is emitted whenever `rest_budget > 0` and the
    ///   accumulated cost since the last rest reaches `rest_budget`; a
    ///   budget of zero or less disables rests entirely.
    /// - a stage is emitted when the edge's terrain differs from the running
    ///   stage terrain, or the final node is reached. The first stage's
    ///   terrain is the source node's own class.
    ///
    /// A path of one node (or none) yields empty stages and rests. Fails
    /// with [`Error::InvalidParameter`] for a non-positive `pixel_length`,
    /// [`Error::GraphNotInitialized`] if the graph is not fully built or a
    /// consecutive pair has no connecting edge, and [`Error::NodeNotFound`]
    /// if the path's source is not a node.
    pub fn segment(&self, path: &[Point], pixel_length: f64, rest_budget: f64) -> Result<Itinerary> {
        if !(pixel_length > 0.0) || !pixel_length.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "pixel_length must be positive, got {}",
                pixel_length
            )));
        }
        let step = self.step().ok_or_else(|| {
            Error::GraphNotInitialized("segment requires a built graph".into())
        })? as f64;

        let mut itinerary = Itinerary {
            nodes: path.to_vec(),
            ..Itinerary::default()
        };
        let (&first, tail) = match path.split_first() {
            Some(split) => split,
            None => return Ok(itinerary),
        };
        if tail.is_empty() {
            return Ok(itinerary);
        }

        let mut stage_terrain = self
            .terrain_at(first)
            .ok_or(Error::NodeNotFound(first))?
            .label
            .clone();
        let mut stage_start = first;
        let mut stage_distance = 0.0;
        let mut stage_cost = 0.0;
        let mut rest_distance = 0.0;
        let mut rest_cost = 0.0;

        let mut last = first;
        for (index, &node) in tail.iter().enumerate() {
            let edge = self.edge_between(last, node).ok_or_else(|| {
                Error::GraphNotInitialized(format!("no edge between {:?} and {:?}", last, node))
            })?;
            let distance = pixel_length * edge.factor * step;
            let cost = distance * edge.weight as f64 / edge.factor;

            rest_distance += distance;
            rest_cost += cost;
            stage_distance += distance;
            stage_cost += cost;

            if rest_budget > 0.0 && rest_cost >= rest_budget {
                itinerary.rests.push(Checkpoint {
                    node,
                    distance: rest_distance,
                    cost: rest_cost,
                    terrain: edge.terrain.clone(),
                });
                rest_distance = 0.0;
                rest_cost = 0.0;
            }

            let is_final = index + 1 == tail.len();
            if edge.terrain != stage_terrain || is_final {
                itinerary.stages.push(Checkpoint {
                    node: stage_start,
                    distance: stage_distance,
                    cost: stage_cost,
                    terrain: stage_terrain,
                });
                stage_terrain = edge.terrain.clone();
                stage_start = node;
                stage_distance = 0.0;
                stage_cost = 0.0;
            }

            last = node;
        }

        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const PLAIN: (u8, u8, u8, u8) = (129, 255, 0, 153);
    const FOREST: (u8, u8, u8, u8) = (11, 119, 0, 153);

    fn uniform_graph(cost: f64) -> TerrainGraph {
        let mut table = TerrainTable::new();
        table.insert(PLAIN, "Plain", cost).unwrap();
        let raster = PixelBuffer::new(10, 10, PLAIN);
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table).unwrap();
        graph
    }

    #[test]
    fn rest_every_two_edges() {
        // 4 orthogonal edges, cost 4 each, budget 8: a rest after every
        // second edge
        let graph = uniform_graph(4.0);
        let path = [(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)];

        let itinerary = graph.segment(&path, 1.0, 8.0).unwrap();

        assert_eq!(itinerary.rests.len(), 2);
        assert_eq!(itinerary.rests[0].node, (3, 1));
        assert_eq!(itinerary.rests[0].distance, 2.0);
        assert_eq!(itinerary.rests[0].cost, 8.0);
        assert_eq!(itinerary.rests[1].node, (5, 1));
        assert_eq!(itinerary.travel_days(), 3);
    }

    #[test]
    fn uniform_terrain_is_a_single_stage() {
        let graph = uniform_graph(4.0);
        let path = [(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)];

        let itinerary = graph.segment(&path, 1.0, 0.0).unwrap();

        assert_eq!(itinerary.stages.len(), 1);
        let stage = &itinerary.stages[0];
        assert_eq!(stage.node, (1, 1));
        assert_eq!(stage.distance, 4.0);
        assert_eq!(stage.cost, 16.0);
        assert_eq!(&*stage.terrain, "Plain");
        assert_eq!(itinerary.total_distance(), 4.0);
    }

    #[test]
    fn zero_budget_disables_rests() {
        let graph = uniform_graph(1000.0);
        let path = [(1, 1), (2, 1), (3, 1), (4, 1)];

        assert!(graph.segment(&path, 1.0, 0.0).unwrap().rests.is_empty());
        assert!(graph.segment(&path, 1.0, -5.0).unwrap().rests.is_empty());
    }

    #[test]
    fn single_node_path_is_empty() {
        let graph = uniform_graph(4.0);

        let itinerary = graph.segment(&[(1, 1)], 1.0, 8.0).unwrap();
        assert!(itinerary.stages.is_empty());
        assert!(itinerary.rests.is_empty());
        assert_eq!(itinerary.nodes, vec![(1, 1)]);
        assert_eq!(itinerary.travel_days(), 1);

        let empty = graph.segment(&[], 1.0, 8.0).unwrap();
        assert!(empty.nodes.is_empty());
    }

    #[test]
    fn invalid_pixel_length() {
        let graph = uniform_graph(4.0);
        let path = [(1, 1), (2, 1)];

        for bad in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                graph.segment(&path, bad, 8.0),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn diagonal_cost_reexpansion_keeps_the_rounding() {
        // terrain cost 5: diagonal weight trunc(7.5) = 7, so the walked cost
        // of one diagonal edge is 1.5 * 7 / 1.5 = 7, not 7.5
        let graph = uniform_graph(5.0);

        let diagonal = graph.segment(&[(2, 2), (3, 3)], 1.0, 0.0).unwrap();
        assert_eq!(diagonal.stages[0].distance, 1.5);
        assert_eq!(diagonal.stages[0].cost, 7.0);

        let straight = graph.segment(&[(2, 2), (3, 2)], 1.0, 0.0).unwrap();
        assert_eq!(straight.stages[0].cost, 5.0);
    }

    #[test]
    fn stage_splits_on_terrain_change() {
        let mut table = TerrainTable::new();
        table.insert(PLAIN, "Plain", 4.0).unwrap();
        table.insert(FOREST, "Forest", 12.0).unwrap();
        // columns 0..=4 plain, 5.. forest
        let raster = PixelBuffer::from_fn(12, 12, |x, _| if x >= 5 { FOREST } else { PLAIN });
        let mut graph = TerrainGraph::new();
        graph.build_nodes(&raster, 1).unwrap();
        graph.build_edges(&table).unwrap();

        let path = [(2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (7, 2)];
        let itinerary = graph.segment(&path, 1.0, 0.0).unwrap();

        // the (4,2)-(5,2) edge still counts as Plain (cheaper endpoint), and
        // the first Forest edge closes the Plain stage *after* being added
        // to it, so the Plain stage spans 4 edges
        assert_eq!(itinerary.stages.len(), 2);
        assert_eq!(itinerary.stages[0].node, (2, 2));
        assert_eq!(&*itinerary.stages[0].terrain, "Plain");
        assert_eq!(itinerary.stages[0].distance, 4.0);
        assert_eq!(itinerary.stages[0].cost, 24.0);
        assert_eq!(itinerary.stages[1].node, (6, 2));
        assert_eq!(&*itinerary.stages[1].terrain, "Forest");
        assert_eq!(itinerary.stages[1].distance, 1.0);
        assert_eq!(itinerary.total_distance(), 5.0);
    }

    #[test]
    fn unknown_edge_is_reported() {
        let graph = uniform_graph(4.0);

        // (1, 1) and (4, 4) are both nodes but share no edge
        assert!(matches!(
            graph.segment(&[(1, 1), (4, 4)], 1.0, 0.0),
            Err(Error::GraphNotInitialized(_))
        ));
    }
}
