//! The weighted grid graph sampled from a raster

use crate::dijkstra::dijkstra_search;
use crate::error::{Error, Result};
use crate::raster::PixelSource;
use crate::route::Route;
use crate::terrain::{TerrainClass, TerrainTable};
use crate::{Color, Cost, Point, PointMap};
use hashbrown::HashMap;
use std::sync::Arc;

/// A single undirected connection between two sample points.
///
/// All three attributes are fixed when the edge is built and never
/// recomputed. `terrain` and `weight` come from whichever endpoint's class
/// has the (weakly) lower cost, so an edge along a road next to a swamp is
/// costed as road.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// Distance multiplier: 1.0 for orthogonal neighbors, 1.5 for diagonal.
    pub factor: f64,
    /// Label of the cheaper endpoint's terrain class.
    pub terrain: Arc<str>,
    /// `trunc(cheaper cost * factor)`. The truncation to an integer is part
    /// of the observable route/itinerary arithmetic, see
    /// [`segment`](TerrainGraph::segment).
    pub weight: Cost,
}

/// The full node/edge collection for one raster, parameterized by the
/// sampling step.
///
/// Build order is fixed: [`build_nodes`](TerrainGraph::build_nodes) samples
/// the raster on a regular lattice, then
/// [`build_edges`](TerrainGraph::build_edges) connects the lattice using a
/// terrain table. A fully built graph is immutable as far as queries are
/// concerned; [`shortest_path`](TerrainGraph::shortest_path) and
/// [`segment`](TerrainGraph::segment) only read it, so concurrent queries on
/// a shared reference are safe. Rebuilding while a query is in flight is not,
/// which the borrow checker already rules out for a single instance.
#[derive(Clone, Debug, Default)]
pub struct TerrainGraph {
    width: usize,
    height: usize,
    step: Option<usize>,
    table: TerrainTable,
    nodes: PointMap<Color>,
    edges: HashMap<(Point, Point), Edge>,
    adjacency: PointMap<Vec<(Point, Cost)>>,
}

/// Edges are stored once per unordered pair of endpoints.
fn edge_key(a: Point, b: Point) -> (Point, Point) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl TerrainGraph {
    /// Creates an empty graph. Nothing can be queried until
    /// [`build_nodes`](TerrainGraph::build_nodes) and
    /// [`build_edges`](TerrainGraph::build_edges) have run.
    pub fn new() -> TerrainGraph {
        TerrainGraph::default()
    }

    /// Samples `source` on a regular lattice with `step` pixels between
    /// neighboring samples, creating one node per sample point.
    ///
    /// Nodes are placed at every `(i, j)` with `0 <= i < width - 1` and
    /// `0 <= j < height - 1`, both stepping by `step`. Colors the graph's
    /// table has not seen yet are registered as unclassified (empty label,
    /// zero cost), so unclassified background pixels never fail the build.
    ///
    /// Any previously built nodes *and edges* are discarded: the step is a
    /// property of the whole graph, and edge weights depend on it.
    ///
    /// Fails with [`Error::InvalidParameter`] if `step` is zero or the
    /// raster has no pixels.
    pub fn build_nodes<S: PixelSource>(&mut self, source: &S, step: usize) -> Result<()> {
        if step == 0 {
            return Err(Error::InvalidParameter("step must be positive".into()));
        }
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(format!(
                "raster has degenerate dimensions {}x{}",
                width, height
            )));
        }

        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.width = width;
        self.height = height;
        self.step = Some(step);

        let mut i = 0;
        while i + 1 < width {
            let mut j = 0;
            while j + 1 < height {
                let color = source.color_at(i, j);
                self.table.register(color);
                self.nodes.insert((i, j), color);
                j += step;
            }
            i += step;
        }

        #[cfg(feature = "log")]
        log::debug!(
            "sampled {} nodes from a {}x{} raster at step {}",
            self.nodes.len(),
            width,
            height,
            step
        );
        Ok(())
    }

    /// Connects the sampled lattice using `table`, replacing the graph's own
    /// table with a copy of it.
    ///
    /// Every node at `(i, j)` with `step <= i < width - step - 1` and
    /// `step <= j < height - step - 1` (stepping by `step`) gets edges to its
    /// forward star: `(i+step, j)` and `(i, j+step)` with factor 1.0,
    /// `(i+step, j+step)` and `(i+step, j-step)` with factor 1.5. The inset
    /// sweep guarantees all four targets exist; the backward directions are
    /// covered by treating every edge as undirected. Border nodes therefore
    /// have no forward star of their own but may still be reached through
    /// edges registered by their inset neighbors.
    ///
    /// Fails with [`Error::GraphNotInitialized`] if nodes have not been
    /// built, or if a sampled color is missing from `table`.
    pub fn build_edges(&mut self, table: &TerrainTable) -> Result<()> {
        let step = self.step.ok_or_else(|| {
            Error::GraphNotInitialized("build_nodes must run before build_edges".into())
        })?;
        self.edges.clear();
        self.adjacency.clear();
        self.table = table.clone();

        let mut i = step;
        while i + step + 1 < self.width {
            let mut j = step;
            while j + step + 1 < self.height {
                self.connect_star((i, j), step)?;
                j += step;
            }
            i += step;
        }

        #[cfg(feature = "log")]
        log::debug!("registered {} edges at step {}", self.edges.len(), step);
        Ok(())
    }

    /// Registers the four forward-star edges of `src`.
    fn connect_star(&mut self, src: Point, step: usize) -> Result<()> {
        let (i, j) = src;
        let star = [
            ((i + step, j), 1.0),
            ((i, j + step), 1.0),
            ((i + step, j + step), 1.5),
            ((i + step, j - step), 1.5),
        ];
        for (target, factor) in star {
            let (terrain, cost) = self.cheaper_endpoint(src, target)?;
            let edge = Edge {
                factor,
                terrain,
                weight: (cost * factor) as Cost,
            };
            self.adjacency
                .entry(src)
                .or_default()
                .push((target, edge.weight));
            self.adjacency
                .entry(target)
                .or_default()
                .push((src, edge.weight));
            self.edges.insert(edge_key(src, target), edge);
        }
        Ok(())
    }

    /// Label and cost of whichever endpoint's terrain class is (weakly)
    /// cheaper. Ties keep the source endpoint.
    fn cheaper_endpoint(&self, src: Point, target: Point) -> Result<(Arc<str>, f64)> {
        let src_class = self.resolved_class(src)?;
        let target_class = self.resolved_class(target)?;
        let class = if target_class.cost < src_class.cost {
            target_class
        } else {
            src_class
        };
        Ok((class.label.clone(), class.cost))
    }

    fn resolved_class(&self, pos: Point) -> Result<&TerrainClass> {
        let color = self
            .nodes
            .get(&pos)
            .ok_or_else(|| Error::GraphNotInitialized(format!("no node at {:?}", pos)))?;
        self.table.get(*color).ok_or_else(|| {
            Error::GraphNotInitialized(format!(
                "sampled color {:?} is missing from the terrain table",
                color
            ))
        })
    }

    /// Computes the route minimizing the summed edge weight between `source`
    /// and `target`.
    ///
    /// Both coordinates must be existing nodes ([`Error::NodeNotFound`]).
    /// `source == target` yields the single-node route with weight 0. If the
    /// grid topology leaves the two nodes disconnected, the search fails with
    /// [`Error::NoPathFound`] -- expensive terrain never disconnects anything,
    /// it is merely avoided.
    ///
    /// Repeated calls on the same graph return the same route; ties between
    /// equal-weight routes are broken arbitrarily but consistently.
    pub fn shortest_path(&self, source: Point, target: Point) -> Result<Route> {
        if !self.nodes.contains_key(&source) {
            return Err(Error::NodeNotFound(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(Error::NodeNotFound(target));
        }
        dijkstra_search(self, source, target).ok_or(Error::NoPathFound(source, target))
    }

    /// The sampling step, if nodes have been built.
    pub fn step(&self) -> Option<usize> {
        self.step
    }

    /// Number of sampled nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `true` if `pos` is a sampled node.
    pub fn contains_node(&self, pos: Point) -> bool {
        self.nodes.contains_key(&pos)
    }

    /// The terrain class sampled at `pos`, resolved through the graph's
    /// current table.
    pub fn terrain_at(&self, pos: Point) -> Option<&TerrainClass> {
        self.table.get(*self.nodes.get(&pos)?)
    }

    /// The edge connecting `a` and `b`, in either direction.
    pub fn edge_between(&self, a: Point, b: Point) -> Option<&Edge> {
        self.edges.get(&edge_key(a, b))
    }

    /// The colors the graph's table currently knows, including
    /// auto-registered unclassified ones.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.table.colors()
    }

    /// The graph's own copy of the terrain table.
    pub fn table(&self) -> &TerrainTable {
        &self.table
    }

    pub(crate) fn neighbors(&self, pos: Point) -> &[(Point, Cost)] {
        self.adjacency.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }
}
