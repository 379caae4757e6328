//! # AvoidKit Router
//!
//! The router facade owns one routing engine and the tables of obstacles
//! and connectors registered with it. Callers mutate those tables and then
//! call [`Router::solve`] once per batch; routes that changed are announced
//! on a [`RouteReceiver`] rather than through stored callbacks, so nothing
//! re-enters the caller while `solve` is running.
//!
//! ```text
//! scene change ──► create/move obstacle, set endpoints/checkpoints
//!                         │
//!                      solve()  ──► RoutingEngine::route per connector
//!                         │
//!                  RouteUpdate on channel ──► caller drains after solve
//! ```

pub mod engine;
pub mod error;
pub mod parameters;
pub mod router;
pub mod types;

pub use engine::{RouteRequest, RoutingEngine, WaypointEngine};
pub use error::{Result, RouterError};
pub use parameters::{Penalties, RoutingParameters};
pub use router::Router;
pub use types::{ConnRef, Endpoint, ObstacleRef, RouteReceiver, RouteUpdate};
