//! # AvoidKit Core
//!
//! Plain value types shared by the AvoidKit crates. Nothing in here knows
//! about routers or scene items; the router facade and the canvas both
//! translate their own representations into these types at their boundary.
//!
//! - [`Point`], [`Rectangle`] and [`Polygon`] describe geometry in a single
//!   coordinate space.
//! - [`Matrix`] maps points between item space and canvas space.
//! - [`RoutingType`], [`RoutingPenalty`] and [`ConnectorLayout`] name the
//!   router configuration knobs.

pub mod error;
pub mod geometry;
pub mod routing;
pub mod transform;

pub use error::{GeometryError, Result};
pub use geometry::{
    first_polygon_crossing, polygon_bounds, polygon_center, segment_intersection, Point, Polygon,
    Rectangle, EPSILON,
};
pub use routing::{ConnectorLayout, RoutingPenalty, RoutingType};
pub use transform::Matrix;
