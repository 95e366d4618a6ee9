use super::definition::{Frame, SequenceFields, INTERLEAVE_END};
use crate::{ByteCursor, Error};

/// A field tag in a sequence payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// End of the definition
    End,

    /// Frame count followed by durations, low id halves and high id halves
    Frames,
    LoopOffset,
    InterleaveOrder,
    Stretches,
    Priority,
    OffhandSlot,
    MainhandSlot,
    MaximumLoops,
    AnimatingPrecedence,
    WalkingPrecedence,
    ReplayMode,

    /// Per frame chat ids (not retained)
    ChatFrames,

    /// Per frame sound effects (not retained)
    FrameSounds,

    /// Skeletal animation id (not retained)
    SkeletalId,

    /// Skeletal sound timeline (not retained)
    SkeletalSounds,

    /// Skeletal frame range (not retained)
    SkeletalRange,

    /// Skeletal bone mask (not retained)
    SkeletalMask,

    /// An opcode without a known meaning
    Unknown(u8),
}

impl Opcode {
    pub fn new(value: u8) -> Opcode {
        match value {
            0 => Opcode::End,
            1 => Opcode::Frames,
            2 => Opcode::LoopOffset,
            3 => Opcode::InterleaveOrder,
            4 => Opcode::Stretches,
            5 => Opcode::Priority,
            6 => Opcode::OffhandSlot,
            7 => Opcode::MainhandSlot,
            8 => Opcode::MaximumLoops,
            9 => Opcode::AnimatingPrecedence,
            10 => Opcode::WalkingPrecedence,
            11 => Opcode::ReplayMode,
            12 => Opcode::ChatFrames,
            13 => Opcode::FrameSounds,
            14 => Opcode::SkeletalId,
            15 => Opcode::SkeletalSounds,
            16 => Opcode::SkeletalRange,
            17 => Opcode::SkeletalMask,
            x => Opcode::Unknown(x),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            Opcode::End => 0,
            Opcode::Frames => 1,
            Opcode::LoopOffset => 2,
            Opcode::InterleaveOrder => 3,
            Opcode::Stretches => 4,
            Opcode::Priority => 5,
            Opcode::OffhandSlot => 6,
            Opcode::MainhandSlot => 7,
            Opcode::MaximumLoops => 8,
            Opcode::AnimatingPrecedence => 9,
            Opcode::WalkingPrecedence => 10,
            Opcode::ReplayMode => 11,
            Opcode::ChatFrames => 12,
            Opcode::FrameSounds => 13,
            Opcode::SkeletalId => 14,
            Opcode::SkeletalSounds => 15,
            Opcode::SkeletalRange => 16,
            Opcode::SkeletalMask => 17,
            Opcode::Unknown(x) => *x,
        }
    }

    /// Reads the opcode's payload from the cursor into the fields. `End` and
    /// unknown opcodes carry no payload.
    pub(crate) fn apply(
        self,
        cursor: &mut ByteCursor,
        fields: &mut SequenceFields,
    ) -> Result<(), Error> {
        match self {
            Opcode::End | Opcode::Unknown(_) => {}
            Opcode::Frames => fields.frames = read_frames(cursor)?,
            Opcode::LoopOffset => fields.loop_offset = i32::from(cursor.read_u16()?),
            Opcode::InterleaveOrder => {
                let count = usize::from(cursor.read_u8()?);
                let mut order = Vec::with_capacity(count + 1);
                for _ in 0..count {
                    order.push(u32::from(cursor.read_u8()?));
                }
                order.push(INTERLEAVE_END);
                fields.interleave_order = Some(order);
            }
            Opcode::Stretches => fields.stretches = true,
            Opcode::Priority => fields.priority = cursor.read_u8()?,
            Opcode::OffhandSlot => fields.player_offhand_slot = Some(cursor.read_u16()?),
            Opcode::MainhandSlot => fields.player_mainhand_slot = Some(cursor.read_u16()?),
            Opcode::MaximumLoops => fields.maximum_loops = cursor.read_u8()?,
            Opcode::AnimatingPrecedence => fields.animating_precedence = Some(cursor.read_u8()?),
            Opcode::WalkingPrecedence => fields.walking_precedence = Some(cursor.read_u8()?),
            Opcode::ReplayMode => fields.replay_mode = cursor.read_u8()?,
            Opcode::ChatFrames => {
                let len = usize::from(cursor.read_u8()?);
                cursor.skip(len * 2 * 2)?;
            }
            Opcode::FrameSounds => {
                let len = usize::from(cursor.read_u8()?);
                cursor.skip(len * 5)?;
            }
            Opcode::SkeletalId | Opcode::SkeletalRange => cursor.skip(4)?,
            Opcode::SkeletalSounds => {
                let count = usize::from(cursor.read_u16()?);
                cursor.skip(count * 7)?;
            }
            Opcode::SkeletalMask => {
                let len = usize::from(cursor.read_u8()?);
                cursor.skip(len)?;
            }
        }

        Ok(())
    }
}

/// Frame ids are stored as a pass of low halves followed by a pass of high
/// halves, after the durations
fn read_frames(cursor: &mut ByteCursor) -> Result<Vec<Frame>, Error> {
    let count = usize::from(cursor.read_u16()?);
    let mut frames = Vec::with_capacity(count.min(cursor.remaining() / 6));
    for _ in 0..count {
        frames.push(Frame {
            primary: 0,
            secondary: -1,
            duration: i32::from(cursor.read_u16()?),
        });
    }

    for frame in frames.iter_mut() {
        frame.primary = i32::from(cursor.read_u16()?);
    }

    for frame in frames.iter_mut() {
        let high = u32::from(cursor.read_u16()?) << 16;
        frame.primary = (frame.primary as u32 | high) as i32;
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values_round_trip() {
        for value in 0..=u8::MAX {
            assert_eq!(Opcode::new(value).value(), value);
        }
        assert_eq!(Opcode::new(18), Opcode::Unknown(18));
    }

    #[test]
    fn test_read_frames_combines_halves() {
        let data = [
            0x00, 0x02, // count
            0x00, 0x05, 0x00, 0x06, // durations
            0x00, 0x03, 0xff, 0xff, // low halves
            0x00, 0x01, 0x80, 0x00, // high halves
        ];
        let mut cursor = ByteCursor::new(&data);
        let frames = read_frames(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(
            frames,
            vec![
                Frame {
                    primary: 65539,
                    secondary: -1,
                    duration: 5
                },
                Frame {
                    primary: 0x8000_ffffu32 as i32,
                    secondary: -1,
                    duration: 6
                },
            ]
        );
    }

    #[test]
    fn test_reserved_opcodes_consume_payload() {
        let cases: &[(Opcode, &[u8])] = &[
            (Opcode::ChatFrames, &[1, 0, 1, 0, 2]),
            (Opcode::FrameSounds, &[1, 9, 9, 9, 9, 9]),
            (Opcode::SkeletalId, &[1, 2, 3, 4]),
            (Opcode::SkeletalSounds, &[0, 1, 1, 2, 3, 4, 5, 6, 7]),
            (Opcode::SkeletalRange, &[0, 1, 0, 9]),
            (Opcode::SkeletalMask, &[3, 1, 1, 1]),
        ];

        for (opcode, payload) in cases {
            let mut cursor = ByteCursor::new(payload);
            let mut fields = SequenceFields::default();
            opcode.apply(&mut cursor, &mut fields).unwrap();
            assert_eq!(cursor.remaining(), 0, "{:?}", opcode);
            assert_eq!(fields, SequenceFields::default());
        }
    }
}
