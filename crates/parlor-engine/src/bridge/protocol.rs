//! Buffer layout shared with the host.
//! Must stay in sync with the TypeScript `protocol.ts`.
//!
//! Each section is exposed through its own pointer/length pair; the host
//! sizes its views from the capacities below.
//!
//! ```text
//! instances:  max_instances       × 9 floats
//! vectors:    max_vector_vertices × 6 floats
//! sounds:     max_sounds          × 1 u32
//! events:     max_events          × 4 floats
//! ```

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::RenderInstance;

/// Floats per render instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Section capacities derived from the game's config.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_vector_vertices: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub vector_data_floats: usize,
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_vector_vertices: usize, max_sounds: usize, max_events: usize) -> Self {
        Self {
            max_instances,
            max_vector_vertices,
            max_sounds,
            max_events,
            instance_data_floats: max_instances * INSTANCE_FLOATS,
            vector_data_floats: max_vector_vertices * VECTOR_VERTEX_FLOATS,
            event_data_floats: max_events * EVENT_FLOATS,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_vector_vertices,
            config.max_sounds,
            config.max_events,
        )
    }

    /// Clamp a section length to its capacity, warning when output is dropped.
    pub fn clamp(section: &str, len: usize, capacity: usize) -> usize {
        if len > capacity {
            log::warn!("{section}: {len} entries exceed capacity {capacity}, truncating");
            capacity
        } else {
            len
        }
    }
}
