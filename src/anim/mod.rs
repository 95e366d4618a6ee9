//! Animation sequence payloads
//!
//! A sequence payload is a stream of one byte opcodes, each followed by its
//! fields, ending with opcode 0. Fields that the stream never sets are
//! filled in once the stream ends: a sequence without frames gets a single
//! empty frame, and unset precedences depend on whether the sequence declares
//! an interleave order.
//!
//! ```
//! use rscodec::anim::AnimationDefinition;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let definition = AnimationDefinition::decode(&[0x03, 0x02, 0x00, 0x01, 0x00])?;
//! assert_eq!(definition.interleave_channels(), Some(&[0, 1][..]));
//! assert_eq!(definition.animating_precedence, 2);
//! assert_eq!(definition.walking_precedence, 2);
//! # Ok(())
//! # }
//! ```

mod archive;
mod decoder;
mod definition;
mod opcode;

pub use self::archive::{AnimationArchive, LookupFallback};
pub use self::decoder::{SequenceDecoder, SequenceDecoderBuilder, UnknownOpcodeStrategy};
pub use self::definition::{default_precedence, AnimationDefinition, Frame, INTERLEAVE_END};
pub use self::opcode::Opcode;
