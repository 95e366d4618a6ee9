#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value stored after the last interleave channel
pub const INTERLEAVE_END: u32 = 9_999_999;

/// One timed step of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Frame id, assembled from two 16 bit halves
    pub primary: i32,

    /// Frame id of the secondary skeleton, -1 when absent
    pub secondary: i32,

    /// Length of the frame in client ticks
    pub duration: i32,
}

impl Frame {
    /// The frame a sequence without frame data plays
    pub const EMPTY: Frame = Frame {
        primary: -1,
        secondary: -1,
        duration: -1,
    };
}

/// A decoded animation sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationDefinition {
    /// Always holds at least one frame
    pub frames: Vec<Frame>,
    pub loop_offset: i32,

    /// Body part channels the sequence blends across, followed by
    /// [`INTERLEAVE_END`]
    pub interleave_order: Option<Vec<u32>>,
    pub stretches: bool,
    pub priority: u8,
    pub animating_precedence: u8,
    pub walking_precedence: u8,
    pub replay_mode: u8,
    pub maximum_loops: u8,
    pub player_mainhand_slot: Option<u16>,
    pub player_offhand_slot: Option<u16>,
}

impl AnimationDefinition {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The interleave channels without the trailing end marker
    pub fn interleave_channels(&self) -> Option<&[u32]> {
        self.interleave_order
            .as_deref()
            .map(|order| order.strip_suffix(&[INTERLEAVE_END]).unwrap_or(order))
    }

    pub fn primary_frames(&self) -> impl Iterator<Item = i32> + '_ {
        self.frames.iter().map(|f| f.primary)
    }

    pub fn durations(&self) -> impl Iterator<Item = i32> + '_ {
        self.frames.iter().map(|f| f.duration)
    }
}

/// Precedence given to a sequence that does not declare one
#[inline]
pub fn default_precedence(has_interleave_order: bool) -> u8 {
    if has_interleave_order {
        2
    } else {
        0
    }
}

/// Field values collected while walking an opcode stream. Fields the stream
/// never sets stay unset until [`SequenceFields::finish`] resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SequenceFields {
    pub frames: Vec<Frame>,
    pub loop_offset: i32,
    pub interleave_order: Option<Vec<u32>>,
    pub stretches: bool,
    pub priority: u8,
    pub animating_precedence: Option<u8>,
    pub walking_precedence: Option<u8>,
    pub replay_mode: u8,
    pub maximum_loops: u8,
    pub player_mainhand_slot: Option<u16>,
    pub player_offhand_slot: Option<u16>,
}

impl Default for SequenceFields {
    fn default() -> Self {
        SequenceFields {
            frames: Vec::new(),
            loop_offset: 0,
            interleave_order: None,
            stretches: false,
            priority: 5,
            animating_precedence: None,
            walking_precedence: None,
            replay_mode: 2,
            maximum_loops: 99,
            player_mainhand_slot: None,
            player_offhand_slot: None,
        }
    }
}

impl SequenceFields {
    pub fn finish(self) -> AnimationDefinition {
        let frames = if self.frames.is_empty() {
            vec![Frame::EMPTY]
        } else {
            self.frames
        };

        let fallback = default_precedence(self.interleave_order.is_some());
        AnimationDefinition {
            frames,
            loop_offset: self.loop_offset,
            interleave_order: self.interleave_order,
            stretches: self.stretches,
            priority: self.priority,
            animating_precedence: self.animating_precedence.unwrap_or(fallback),
            walking_precedence: self.walking_precedence.unwrap_or(fallback),
            replay_mode: self.replay_mode,
            maximum_loops: self.maximum_loops,
            player_mainhand_slot: self.player_mainhand_slot,
            player_offhand_slot: self.player_offhand_slot,
        }
    }
}
