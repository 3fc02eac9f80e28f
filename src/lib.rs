//! **Largest empty circle search over planar point sets.**
//!
//! Given at least three points in the plane, this crate builds an
//! incremental [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation)
//! on a doubly-connected edge list, derives the dual
//! [Voronoi diagram](https://en.wikipedia.org/wiki/Voronoi_diagram), extracts
//! the convex hull, and finds the largest circle whose interior contains no
//! input point and whose center lies inside the hull.
//!
//! The construction follows the classic randomized-incremental scheme (de
//! Berg et al., *Computational Geometry*, ch. 9): the triangulation starts
//! from a triangle spanned by the highest input point and two *symbolic*
//! points at infinity, so no coordinate bounding box is ever needed. Point
//! location goes through a history DAG of triangles; every insertion splits
//! a triangle (or an edge) and restores the Delaunay property by recursive
//! edge flips.
//!
//! # Example
//!
//! ```
//! use empty_circle::{ConvexHull, Delaunay, LargestEmptyCircle, Voronoi};
//! use glam::DVec2;
//!
//! let points = [
//!     DVec2::new(0., 0.),
//!     DVec2::new(0., 1.),
//!     DVec2::new(1., 0.),
//!     DVec2::new(1., 1.),
//! ];
//! let delaunay = Delaunay::build(&points)?;
//! let voronoi = Voronoi::build(&delaunay);
//! let hull = ConvexHull::new(&delaunay);
//! let lec = LargestEmptyCircle::new(&delaunay, &voronoi);
//!
//! assert_eq!(hull.edges().len(), 4);
//! let largest = lec.largest().unwrap();
//! assert!((largest.radius - 0.5f64.sqrt()).abs() < 1e-4);
//! # Ok::<(), empty_circle::TriangulationError>(())
//! ```

mod convex_hull;
pub mod dcel;
mod delaunay;
pub mod geometry;
mod largest_empty_circle;
mod voronoi;

pub use convex_hull::ConvexHull;
pub use delaunay::{Delaunay, TriangulationError};
pub use largest_empty_circle::LargestEmptyCircle;
pub use voronoi::Voronoi;
