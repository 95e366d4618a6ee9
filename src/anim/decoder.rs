use super::definition::{AnimationDefinition, SequenceFields};
use super::opcode::Opcode;
use crate::{ByteCursor, Error, ErrorKind};
use log::warn;

/// Customize how the decoder reacts to an opcode it does not recognize
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnknownOpcodeStrategy {
    /// Log the opcode and treat the next byte as the following opcode. The
    /// stream may desynchronize if the unknown opcode carried a payload.
    Ignore,

    /// Stop decoding and return an error
    Error,
}

impl Default for UnknownOpcodeStrategy {
    fn default() -> Self {
        UnknownOpcodeStrategy::Ignore
    }
}

/// Decodes sequence payloads into [`AnimationDefinition`]s
///
/// ```
/// use rscodec::anim::SequenceDecoder;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = [
///     0x01, 0x00, 0x01, // one frame
///     0x00, 0x05, // duration
///     0x00, 0x03, // low half of the frame id
///     0x00, 0x01, // high half of the frame id
///     0x05, 0x0a, // priority
///     0x00,
/// ];
///
/// let definition = SequenceDecoder::new().decode(&data)?;
/// assert_eq!(definition.frames[0].primary, 65539);
/// assert_eq!(definition.frames[0].duration, 5);
/// assert_eq!(definition.priority, 10);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceDecoder {
    on_unknown: UnknownOpcodeStrategy,
}

/// Build a customized sequence decoder
#[derive(Debug, Clone, Default)]
pub struct SequenceDecoderBuilder {
    on_unknown: UnknownOpcodeStrategy,
}

impl SequenceDecoderBuilder {
    pub fn new() -> Self {
        SequenceDecoderBuilder::default()
    }

    /// Set the behavior when an unrecognized opcode is encountered
    pub fn on_unknown_opcode(&mut self, strategy: UnknownOpcodeStrategy) -> &mut Self {
        self.on_unknown = strategy;
        self
    }

    pub fn build(&self) -> SequenceDecoder {
        SequenceDecoder {
            on_unknown: self.on_unknown,
        }
    }
}

impl SequenceDecoder {
    /// A decoder that logs and skips unknown opcodes
    pub fn new() -> Self {
        SequenceDecoder::default()
    }

    pub fn builder() -> SequenceDecoderBuilder {
        SequenceDecoderBuilder::new()
    }

    /// Decodes a single definition from the start of the data
    pub fn decode(&self, data: &[u8]) -> Result<AnimationDefinition, Error> {
        self.decode_from(&mut ByteCursor::new(data))
    }

    /// Decodes one definition starting at the cursor's position, leaving the
    /// cursor after its end opcode
    pub fn decode_from(&self, cursor: &mut ByteCursor) -> Result<AnimationDefinition, Error> {
        let mut fields = SequenceFields::default();
        loop {
            let offset = cursor.position();
            let opcode = Opcode::new(cursor.read_u8()?);
            match opcode {
                Opcode::End => break,
                Opcode::Unknown(value) => match self.on_unknown {
                    UnknownOpcodeStrategy::Ignore => {
                        warn!("unrecognized sequence opcode {} at offset {}", value, offset)
                    }
                    UnknownOpcodeStrategy::Error => {
                        return Err(Error::new(ErrorKind::UnknownOpcode {
                            opcode: value,
                            offset,
                        }))
                    }
                },
                _ => opcode.apply(cursor, &mut fields)?,
            }
        }

        Ok(fields.finish())
    }
}

impl AnimationDefinition {
    /// Decodes a definition with the default decoder
    pub fn decode(data: &[u8]) -> Result<AnimationDefinition, Error> {
        SequenceDecoder::new().decode(data)
    }
}
