//! Canvas type definitions: UpdateStats.

/// What one [`Canvas::update_now`](super::Canvas::update_now) pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Items whose geometry was pushed into the router.
    pub synced: usize,
    /// Connectors whose route changed in the solve pass.
    pub routes_changed: usize,
    /// Lines whose handles were rewritten from a new route.
    pub lines_updated: usize,
    /// Route deliveries that failed and were logged.
    pub failed: usize,
}
