//! Region terrain payloads
//!
//! A region payload describes a 64x64 tile area over four levels as a stream
//! of tagged fields per tile, in level, x, y order. Every tile's stream ends
//! with either an explicit height or a terminator that asks the reader to
//! derive the height: from a deterministic noise function on the ground level
//! and from the tile below on upper levels.
//!
//! Two layouts of the stream exist. The modern one uses 16 bit tags and
//! signed 16 bit overlay ids, the legacy one 8 bit tags and 8 bit overlay ids.
//! Nothing in the payload says which one is in use, so [`TerrainCodec::decode`]
//! tries the modern layout and falls back to the legacy one when the data runs
//! out. Encoding always produces the modern layout.

mod block;
mod codec;
mod height;

pub use self::block::{Overlay, TerrainBlock, Tile, LEVELS, REGION_SIZE};
pub use self::codec::{DecodedRegion, RegionPosition, TerrainCodec, TerrainCodecBuilder, TileFormat};
pub use self::height::{ClassicNoise, HeightSource};
