//! Terrain classification: colors mapped to named travel costs

use crate::error::{Error, Result};
use crate::Color;
use hashbrown::HashMap;
use std::sync::Arc;

/// A named terrain category with a travel cost per unit distance.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainClass {
    /// Human-readable terrain name ("Moor", "Desert sand", ...).
    ///
    /// Shared into every edge that crosses this terrain, hence the `Arc`.
    pub label: Arc<str>,
    /// Cost of travelling one unit of distance over this terrain.
    /// Always finite and `>= 0`.
    pub cost: f64,
}

impl TerrainClass {
    /// The class assigned to colors that were sampled but never classified:
    /// an empty label and zero cost, so background pixels never fail a build.
    pub fn unclassified() -> TerrainClass {
        TerrainClass {
            label: Arc::from(""),
            cost: 0.0,
        }
    }
}

/// The color-to-terrain lookup used while building edges.
///
/// The table is an explicit value owned by whoever authors it; the graph
/// keeps its own copy and never shares it behind the caller's back. Colors
/// sampled during [`build_nodes`](crate::TerrainGraph::build_nodes) that the
/// table does not know yet are auto-registered as
/// [`unclassified`](TerrainClass::unclassified).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainTable {
    classes: HashMap<Color, TerrainClass>,
}

impl TerrainTable {
    /// Creates an empty table.
    pub fn new() -> TerrainTable {
        TerrainTable::default()
    }

    /// Maps `color` to a terrain with the given label and per-distance cost.
    ///
    /// Replaces any previous class for that color. Fails with
    /// [`Error::InvalidParameter`] if `cost` is negative or not finite.
    pub fn insert(&mut self, color: Color, label: &str, cost: f64) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "terrain cost for {:?} must be finite and >= 0, got {}",
                color, cost
            )));
        }
        self.classes.insert(
            color,
            TerrainClass {
                label: Arc::from(label),
                cost,
            },
        );
        Ok(())
    }

    /// Ensures `color` has a class, inserting the unclassified default if not.
    pub(crate) fn register(&mut self, color: Color) {
        self.classes
            .entry(color)
            .or_insert_with(TerrainClass::unclassified);
    }

    /// The class mapped to `color`, if any.
    pub fn get(&self, color: Color) -> Option<&TerrainClass> {
        self.classes.get(&color)
    }

    /// All colors the table currently knows.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.classes.keys().copied()
    }

    /// Number of registered colors.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` if no color is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
