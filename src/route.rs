//! The result of a shortest-path query

use crate::{Cost, Point};

/// An ordered sequence of nodes from source to target, together with the
/// summed weight of the edges connecting them.
///
/// Produced fresh by every [`shortest_path`](crate::TerrainGraph::shortest_path)
/// call; the graph keeps no record of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<Point>,
    weight: Cost,
}

impl Route {
    pub(crate) fn new(nodes: Vec<Point>, weight: Cost) -> Route {
        Route { nodes, weight }
    }

    /// The summed edge weight of the route.
    pub fn weight(&self) -> Cost {
        self.weight
    }

    /// The ordered node list, source first.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// Number of nodes on the route. A source-equals-target route has
    /// length 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the route contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the nodes in travel order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.nodes.iter()
    }
}

use std::ops::Index;

impl Index<usize> for Route {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl PartialEq<Vec<Point>> for Route {
    fn eq(&self, rhs: &Vec<Point>) -> bool {
        self.nodes == *rhs
    }
}

impl<'a> PartialEq<&'a [Point]> for Route {
    fn eq(&self, rhs: &&'a [Point]) -> bool {
        self.nodes == *rhs
    }
}

use std::fmt;

impl fmt::Display for Route {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Route[Weight = {}]: ", self.weight)?;
        if self.nodes.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{:?}", self.nodes[0])?;
            for p in self.nodes.iter().skip(1) {
                write!(fmt, " -> {:?}", p)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn index() {
        let route = Route::new(vec![(4, 0), (2, 0), (0, 0)], 42);

        assert_eq!(route[0], (4, 0));
        assert_eq!(route[1], (2, 0));
        assert_eq!(route[2], (0, 0));
    }

    #[test]
    fn display() {
        let route = Route::new(vec![(4, 0), (2, 0)], 42);

        assert_eq!(
            &format!("{}", route),
            "Route[Weight = 42]: (4, 0) -> (2, 0)"
        );
    }

    #[test]
    fn display_empty() {
        let route = Route::new(Vec::new(), 0);

        assert_eq!(&format!("{}", route), "Route[Weight = 0]: <empty>");
    }
}
