//! # AvoidKit
//!
//! Keeps an automatic connector router in sync with an interactive
//! box-and-line diagram.
//!
//! ## Architecture
//!
//! AvoidKit is organized as a workspace with multiple crates:
//!
//! 1. **avoidkit-core** - Points, rectangles, polygons, matrices, routing enums
//! 2. **avoidkit-router** - Router facade: obstacles, connectors, solve, route updates
//! 3. **avoidkit-settings** - Router settings loaded from TOML or JSON
//! 4. **avoidkit-canvas** - Scene items, router adapters, connections, undo log
//! 5. **avoidkit** - This crate: re-exports, logging setup and the demo binary

pub mod demo;

pub use avoidkit_canvas::{
    adapter, item, Canvas, CanvasCommand, CanvasError, Connection, ConnectionTable, ConstraintId,
    DisconnectCallback, Element, EventLog, Handle, HandleId, Item, ItemId, ItemKind, Line,
    LineEnd, RouterAdapter, RouterSync, UpdateStats,
};
pub use avoidkit_core::{
    ConnectorLayout, GeometryError, Matrix, Point, Polygon, Rectangle, RoutingPenalty,
    RoutingType,
};
pub use avoidkit_router::{
    ConnRef, Endpoint, ObstacleRef, RouteReceiver, RouteRequest, RouteUpdate, Router,
    RouterError, RoutingEngine, RoutingParameters, WaypointEngine,
};
pub use avoidkit_settings::{PenaltySettings, RouterSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting, or JSON lines when
///   `AVOIDKIT_LOG_FORMAT=json`
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("AVOIDKIT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
