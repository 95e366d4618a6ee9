/*!

Bit exact codecs for two binary asset formats of a legacy game client:

- **Terrain regions**: the heightmap, overlays, underlays and tile flags of a
  64x64 area over four levels. Decoding detects which of the two historical
  layouts a payload uses. Encoding always writes the modern one.
- **Animation sequences**: a tagged opcode stream describing frame timing and
  playback metadata.

Both formats leave a number of fields implicit on the wire (derived heights,
synthesized frames, default precedences) and the decoders reproduce the
client's derivation rules exactly.

## Terrain

```rust
use rscodec::terrain::{RegionPosition, TerrainCodec, TileFormat};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
// every tile: underlay 3 (tag 84) followed by an explicit height of 10
let payload = [0x00u8, 0x54, 0x00, 0x01, 0x0a].repeat(4 * 64 * 64);

// ground tiles without an explicit height sample this function
let codec = TerrainCodec::new(|_x: i32, _y: i32| 30);
let region = codec.decode(&payload, RegionPosition::new(3200, 3200))?;

assert_eq!(region.format, TileFormat::Modern);
assert_eq!(region.block.tile(0, 12, 40).underlay, 3);
assert_eq!(region.block.height(0, 12, 40), -80);
assert_eq!(region.block.height(1, 12, 40), -160);

// re-encoding a modern payload reproduces it
assert_eq!(region.block.encode()?, payload);
# Ok(())
# }
```

## Animation

```rust
use rscodec::anim::{AnimationDefinition, Frame};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let definition = AnimationDefinition::decode(&[0x04, 0x00])?;
assert!(definition.stretches);
assert_eq!(definition.frames, vec![Frame::EMPTY]);
# Ok(())
# }
```

Opcodes the decoder does not recognize are logged through the [`log`] facade
and skipped. Use [`anim::SequenceDecoder::builder`] to turn them into errors
instead.

## Caveats

Caller is responsible for:

- Decompressing payloads (map files are commonly gzipped)
- Supplying the region coordinates used to derive default ground heights
- Supplying the height function itself (see [`terrain::ClassicNoise`] for the
  client's own)

*/

pub mod anim;
mod cursor;
mod errors;
pub mod terrain;

pub use self::cursor::{ByteCursor, ByteWriter, REGION_BUFFER_SIZE};
pub use self::errors::*;
