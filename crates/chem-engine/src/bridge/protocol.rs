/// Flat frame buffer layout shared with the host page.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Discs: max_discs × 10 floats]
/// [Rings: max_rings × 8 floats]
/// [Lines: max_lines × 16 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header so the host can compute offsets
/// without hardcoding them.

use crate::api::config::SimConfig;
use crate::api::types::SimEvent;
use crate::renderer::instance::{DiscInstance, FrameBuffer, LineInstance, RingInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_WORLD_WIDTH: usize = 2;
pub const HEADER_WORLD_HEIGHT: usize = 3;
pub const HEADER_MAX_DISCS: usize = 4;
pub const HEADER_DISC_COUNT: usize = 5;
pub const HEADER_MAX_RINGS: usize = 6;
pub const HEADER_RING_COUNT: usize = 7;
pub const HEADER_MAX_LINES: usize = 8;
pub const HEADER_LINE_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Offsets and sizes of each section, derived from the capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_discs: usize,
    pub max_rings: usize,
    pub max_lines: usize,
    pub max_events: usize,

    /// Offset (in floats) where disc data begins.
    pub disc_data_offset: usize,
    /// Offset (in floats) where ring data begins.
    pub ring_data_offset: usize,
    /// Offset (in floats) where line data begins.
    pub line_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_discs: usize, max_rings: usize, max_lines: usize, max_events: usize) -> Self {
        let disc_data_offset = HEADER_FLOATS;
        let ring_data_offset = disc_data_offset + max_discs * DiscInstance::FLOATS;
        let line_data_offset = ring_data_offset + max_rings * RingInstance::FLOATS;
        let event_data_offset = line_data_offset + max_lines * LineInstance::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * SimEvent::FLOATS;

        Self {
            max_discs,
            max_rings,
            max_lines,
            max_events,
            disc_data_offset,
            ring_data_offset,
            line_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.max_discs,
            config.max_rings,
            config.max_lines,
            config.max_events,
        )
    }

    /// Pack one frame into `out`, resizing it to the full layout.
    /// Sections beyond their capacity are truncated.
    pub fn pack(
        &self,
        frame_counter: u32,
        world: (f32, f32),
        frame: &FrameBuffer,
        events: &[SimEvent],
        out: &mut Vec<f32>,
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let discs = &frame.discs[..frame.discs.len().min(self.max_discs)];
        let rings = &frame.rings[..frame.rings.len().min(self.max_rings)];
        let lines = &frame.lines[..frame.lines.len().min(self.max_lines)];
        let events = &events[..events.len().min(self.max_events)];

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_WORLD_WIDTH] = world.0;
        header[HEADER_WORLD_HEIGHT] = world.1;
        header[HEADER_MAX_DISCS] = self.max_discs as f32;
        header[HEADER_DISC_COUNT] = discs.len() as f32;
        header[HEADER_MAX_RINGS] = self.max_rings as f32;
        header[HEADER_RING_COUNT] = rings.len() as f32;
        header[HEADER_MAX_LINES] = self.max_lines as f32;
        header[HEADER_LINE_COUNT] = lines.len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;

        copy_section(out, self.disc_data_offset, bytemuck::cast_slice(discs));
        copy_section(out, self.ring_data_offset, bytemuck::cast_slice(rings));
        copy_section(out, self.line_data_offset, bytemuck::cast_slice(lines));
        copy_section(out, self.event_data_offset, bytemuck::cast_slice(events));
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

fn copy_section(out: &mut [f32], offset: usize, data: &[f32]) {
    out[offset..offset + data.len()].copy_from_slice(data);
}
