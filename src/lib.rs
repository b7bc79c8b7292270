#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to plan travel routes and day-by-day itineraries on raster
//! terrain maps.
//!
//! ## Introduction
//! The input is a classified terrain image: every pixel color stands for one
//! kind of terrain ("Plain", "Marsh", "Water", ...) with a travel cost per
//! unit distance. The crate samples that raster on a regular lattice into a
//! weighted grid graph, finds the cost-optimal route between two sample
//! points with Dijkstra, and then walks the route once to report it in two
//! human-readable decompositions: terrain-homogeneous *stages* and
//! budget-driven *rest* checkpoints (one per travel day).
//!
//! Note that the graph never asks for the image itself. Colors are sampled
//! through the [`PixelSource`] trait, so the caller may keep the raster in
//! any format they want, as long as a specific `(x, y)` can be resolved to
//! an RGBA value.
//!
//! ## Examples
//! Building the graph and finding a route:
//! ```
//! use pixelmap_routing::prelude::*;
//!
//! // an 8x8 map: plains with a marsh band across the middle
//! let plain = (129, 255, 0, 255);
//! let marsh = (99, 175, 89, 255);
//! let raster = PixelBuffer::from_fn(8, 8, |_, y| if y == 4 { marsh } else { plain });
//!
//! let mut table = TerrainTable::new();
//! table.insert(plain, "Plain", 4.0)?;
//! table.insert(marsh, "Marsh", 32.0)?;
//!
//! let mut graph = TerrainGraph::new();
//! graph.build_nodes(&raster, 1)?;
//! graph.build_edges(&table)?;
//!
//! let route = graph.shortest_path((1, 1), (5, 1))?;
//! assert_eq!(route, vec![(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]);
//! # Ok::<(), pixelmap_routing::Error>(())
//! ```
//!
//! Turning the route into an itinerary with a daily cost budget of 16:
//! ```
//! # use pixelmap_routing::prelude::*;
//! # let plain = (129, 255, 0, 255);
//! # let raster = PixelBuffer::new(8, 8, plain);
//! # let mut table = TerrainTable::new();
//! # table.insert(plain, "Plain", 4.0)?;
//! # let mut graph = TerrainGraph::new();
//! # graph.build_nodes(&raster, 1)?;
//! # graph.build_edges(&table)?;
//! # let route = graph.shortest_path((1, 1), (5, 1))?;
//! let itinerary = graph.segment(route.nodes(), 1.0, 16.0)?;
//!
//! // four edges over uniform plains: one stage, one full travel day
//! assert_eq!(itinerary.stages.len(), 1);
//! assert_eq!(&*itinerary.stages[0].terrain, "Plain");
//! assert_eq!(itinerary.total_distance(), 4.0);
//! assert_eq!(itinerary.rests.len(), 1);
//! assert_eq!(itinerary.travel_days(), 2);
//! # Ok::<(), pixelmap_routing::Error>(())
//! ```
//!
//! ## Edge weights
//! Each sample point is connected to its lattice neighbors to the right,
//! below, and on both forward diagonals; traversal treats every edge as
//! undirected. An edge is costed by whichever endpoint's terrain is cheaper
//! (the "best footing" rule) and its weight is that cost times a distance
//! factor of 1.0 (orthogonal) or 1.5 (diagonal), truncated to an integer.
//! The truncation is observable in reported itinerary costs and is part of
//! the contract; see [`TerrainGraph::segment`].
//!
//! ## Logging
//! With the optional `log` feature the build and search routines emit
//! internal diagnostics through the [`log`](https://docs.rs/log) facade.
//! The library never logs user-facing messages.

/// A position on the raster, in source-image pixel space.
pub type Point = (usize, usize);

/// A raw RGBA pixel value.
pub type Color = (u8, u8, u8, u8);

/// The discretized weight of an edge, and the total weight of a route.
pub type Cost = usize;

/// A [`HashMap`](hashbrown::HashMap) keyed by [`Point`].
pub type PointMap<V> = hashbrown::HashMap<Point, V>;
/// A [`HashSet`](hashbrown::HashSet) of [`Point`]s.
pub type PointSet = hashbrown::HashSet<Point>;

mod dijkstra;
mod error;
mod graph;
mod itinerary;
mod raster;
mod route;
mod terrain;

pub use self::error::{Error, Result};
pub use self::graph::{Edge, TerrainGraph};
pub use self::itinerary::{Checkpoint, Itinerary};
pub use self::raster::{PixelBuffer, PixelSource};
pub use self::route::Route;
pub use self::terrain::{TerrainClass, TerrainTable};

/// The most common imports in one place.
pub mod prelude {
    pub use crate::{
        Checkpoint, Error, Itinerary, PixelBuffer, PixelSource, Route, TerrainClass, TerrainGraph,
        TerrainTable,
    };
}
