//! # AvoidKit Canvas
//!
//! A scene of boxes and lines kept in sync with an [`avoidkit_router::Router`].
//!
//! Each item owns a [`RouterAdapter`]: elements mirror their outline as an
//! obstacle, lines mirror their endpoints and checkpoints as one or more
//! connectors. [`Canvas::update_now`] pushes dirty items into the router,
//! solves once and reconciles the new routes into the lines' handles.
//! Connections between line ends and elements are reversible
//! [`CanvasCommand`]s that an [`EventLog`] can record and play back.

pub mod adapter;
pub mod canvas;
pub mod commands;
pub mod connections;
pub mod error;
pub mod history;
pub mod item;

pub use adapter::{ConnectorAdapter, RouterAdapter, RouterSync, ShapeAdapter};
pub use canvas::{Canvas, UpdateStats};
pub use commands::CanvasCommand;
pub use connections::{Connection, ConnectionTable, ConstraintId, DisconnectCallback};
pub use error::{CanvasError, Result};
pub use history::EventLog;
pub use item::{Element, Handle, HandleId, Item, ItemId, ItemKind, Line, LineEnd};
