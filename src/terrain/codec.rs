use super::{ClassicNoise, HeightSource, Overlay, TerrainBlock, Tile, LEVELS, REGION_SIZE};
use crate::{ByteCursor, ByteWriter, Error, ErrorKind};
use log::debug;

/// Tag that ends a tile with a derived height
const TAG_END: u16 = 0;

/// Tag that ends a tile with an explicit height byte
const TAG_HEIGHT: u16 = 1;

/// Last tag that carries an overlay id
const TAG_OVERLAY_MAX: u16 = 49;

/// Last tag that encodes a tile flag
const TAG_FLAG_MAX: u16 = 81;

/// Height drop between stacked levels when no explicit height is given
const LEVEL_GAP: i32 = 240;

/// Seeds added to the absolute tile coordinate before sampling the height
/// source
const NOISE_OFFSET_X: i32 = 0xe3b7b;
const NOISE_OFFSET_Y: i32 = 0x87cce;

/// The two wire layouts of a region's tag stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFormat {
    /// 16 bit tags and signed 16 bit overlay ids
    Modern,

    /// 8 bit tags and unsigned 8 bit overlay ids
    Legacy,
}

impl TileFormat {
    #[inline]
    fn read_tag(self, cursor: &mut ByteCursor) -> Result<u16, Error> {
        match self {
            TileFormat::Modern => cursor.read_u16(),
            TileFormat::Legacy => cursor.read_u8().map(u16::from),
        }
    }

    #[inline]
    fn read_overlay(self, cursor: &mut ByteCursor) -> Result<u16, Error> {
        match self {
            TileFormat::Modern => cursor.read_i16().map(|x| x as u16),
            TileFormat::Legacy => cursor.read_u8().map(u16::from),
        }
    }

    #[inline]
    fn overlay_width(self) -> usize {
        match self {
            TileFormat::Modern => 2,
            TileFormat::Legacy => 1,
        }
    }
}

/// Where a region payload lands and how it is sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionPosition {
    /// Destination of the payload's first tile within the block
    pub offset_x: i32,
    pub offset_y: i32,

    /// Absolute coordinates of the region, used to sample default heights
    pub region_x: i32,
    pub region_y: i32,

    /// Quarter turns added to every overlay orientation
    pub rotation: u8,
}

impl RegionPosition {
    pub fn new(region_x: i32, region_y: i32) -> Self {
        RegionPosition {
            region_x,
            region_y,
            ..RegionPosition::default()
        }
    }

    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A fully decoded region and the wire layout it was read with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRegion {
    pub block: TerrainBlock,
    pub format: TileFormat,
}

/// One tile's contribution to the block, assembled once its tag stream ends
#[derive(Debug, Clone, Copy)]
struct TileRecord {
    tile: Tile,
    height: i32,
}

/// Decodes region payloads into [`TerrainBlock`]s.
///
/// ```
/// use rscodec::terrain::{RegionPosition, TerrainCodec, TileFormat};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // every tile of every level: explicit height tag with a height of 2
/// let payload = [0x00u8, 0x01, 0x02].repeat(4 * 64 * 64);
///
/// let codec = TerrainCodec::new(|_x: i32, _y: i32| 0);
/// let region = codec.decode(&payload, RegionPosition::default())?;
/// assert_eq!(region.format, TileFormat::Modern);
/// assert_eq!(region.block.height(0, 0, 0), -16);
/// assert_eq!(region.block.height(3, 0, 0), -64);
/// assert_eq!(region.block.encode()?, payload);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TerrainCodec<H> {
    width: usize,
    length: usize,
    heights: H,
}

/// Customizes the dimensions of decoded blocks
#[derive(Debug, Clone)]
pub struct TerrainCodecBuilder {
    width: usize,
    length: usize,
}

impl TerrainCodecBuilder {
    pub fn new() -> Self {
        TerrainCodecBuilder {
            width: REGION_SIZE,
            length: REGION_SIZE,
        }
    }

    /// Size of the tile grid a payload is decoded into. Tiles that land
    /// outside of it are consumed and dropped.
    pub fn dimensions(&mut self, width: usize, length: usize) -> &mut Self {
        self.width = width;
        self.length = length;
        self
    }

    pub fn build<H: HeightSource>(&self, heights: H) -> TerrainCodec<H> {
        TerrainCodec {
            width: self.width,
            length: self.length,
            heights,
        }
    }
}

impl Default for TerrainCodecBuilder {
    fn default() -> Self {
        TerrainCodecBuilder::new()
    }
}

impl Default for TerrainCodec<ClassicNoise> {
    fn default() -> Self {
        TerrainCodec::new(ClassicNoise)
    }
}

impl TerrainCodec<ClassicNoise> {
    pub fn builder() -> TerrainCodecBuilder {
        TerrainCodecBuilder::new()
    }
}

impl<H> TerrainCodec<H>
where
    H: HeightSource,
{
    /// Creates a codec for 64x64 blocks that samples default ground heights
    /// from the given source
    pub fn new(heights: H) -> Self {
        TerrainCodecBuilder::new().build(heights)
    }

    pub fn height_source(&self) -> &H {
        &self.heights
    }

    /// Decodes a region, detecting its wire layout.
    ///
    /// The modern layout is tried first. If it runs out of data the cursor is
    /// rewound, the partially decoded block is discarded, and the whole region
    /// is decoded again with the legacy layout. An error from the legacy
    /// attempt is returned to the caller.
    pub fn decode(&self, data: &[u8], position: RegionPosition) -> Result<DecodedRegion, Error> {
        let mut cursor = ByteCursor::new(data);
        let start = cursor.position();

        match self.decode_region(&mut cursor, position, TileFormat::Modern) {
            Ok(block) => Ok(DecodedRegion {
                block,
                format: TileFormat::Modern,
            }),
            Err(e) if e.is_eof() => {
                debug!(
                    "region ({}, {}) is not in the modern layout ({}), retrying as legacy",
                    position.region_x, position.region_y, e
                );

                cursor.set_position(start);
                let block = self.decode_region(&mut cursor, position, TileFormat::Legacy)?;
                Ok(DecodedRegion {
                    block,
                    format: TileFormat::Legacy,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Decodes a region with a single, known, wire layout
    pub fn decode_format(
        &self,
        data: &[u8],
        position: RegionPosition,
        format: TileFormat,
    ) -> Result<TerrainBlock, Error> {
        self.decode_region(&mut ByteCursor::new(data), position, format)
    }

    fn decode_region(
        &self,
        cursor: &mut ByteCursor,
        position: RegionPosition,
        format: TileFormat,
    ) -> Result<TerrainBlock, Error> {
        let mut block = TerrainBlock::new(self.width, self.length);
        for level in 0..LEVELS {
            for local_x in 0..REGION_SIZE as i32 {
                for local_y in 0..REGION_SIZE as i32 {
                    let x = local_x.wrapping_add(position.offset_x);
                    let y = local_y.wrapping_add(position.offset_y);
                    if !block.contains(x, y) {
                        skip_tile(cursor, format)?;
                        continue;
                    }

                    let (x, y) = (x as usize, y as usize);
                    let record = self.decode_tile(cursor, format, &block, level, x, y, position)?;
                    *block.tile_mut(level, x, y) = record.tile;
                    block.set_height(level, x, y, record.height);
                }
            }
        }

        block.pad_edges();
        Ok(block)
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_tile(
        &self,
        cursor: &mut ByteCursor,
        format: TileFormat,
        block: &TerrainBlock,
        level: usize,
        x: usize,
        y: usize,
        position: RegionPosition,
    ) -> Result<TileRecord, Error> {
        let mut tile = Tile::default();
        loop {
            match format.read_tag(cursor)? {
                TAG_END => {
                    let height = if level == 0 {
                        let world_x = (x as i32).wrapping_add(position.region_x);
                        let world_y = (y as i32).wrapping_add(position.region_y);
                        let steps = self.heights.height(
                            NOISE_OFFSET_X.wrapping_add(world_x),
                            NOISE_OFFSET_Y.wrapping_add(world_y),
                        );
                        steps.wrapping_mul(-8)
                    } else {
                        block.height(level - 1, x, y).wrapping_sub(LEVEL_GAP)
                    };

                    return Ok(TileRecord { tile, height });
                }
                TAG_HEIGHT => {
                    tile.manual_height = true;
                    let steps = match cursor.read_u8()? {
                        1 => 0,
                        h => i32::from(h),
                    };

                    let height = if level == 0 {
                        -steps * 8
                    } else {
                        block.height(level - 1, x, y).wrapping_sub(steps * 8)
                    };

                    return Ok(TileRecord { tile, height });
                }
                tag @ 2..=TAG_OVERLAY_MAX => {
                    let id = format.read_overlay(cursor)?;
                    let kind = tag - 2;
                    tile.overlay = if id != 0 {
                        Some(Overlay {
                            id,
                            shape: (kind / 4) as u8,
                            orientation: ((kind + u16::from(position.rotation)) & 3) as u8,
                        })
                    } else {
                        None
                    };
                }
                tag @ 50..=TAG_FLAG_MAX => tile.flag = (tag - TAG_OVERLAY_MAX) as u8,
                tag => tile.underlay = tag - TAG_FLAG_MAX,
            }
        }
    }
}

/// Consumes the tag stream of a tile that lands outside the block
fn skip_tile(cursor: &mut ByteCursor, format: TileFormat) -> Result<(), Error> {
    loop {
        match format.read_tag(cursor)? {
            TAG_END => return Ok(()),
            TAG_HEIGHT => return cursor.skip(1),
            2..=TAG_OVERLAY_MAX => cursor.skip(format.overlay_width())?,
            _ => {}
        }
    }
}

impl TerrainBlock {
    /// Encodes the 64x64 region at the origin of the block in the modern
    /// layout
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        self.encode_at(0, 0)
    }

    /// Encodes the 64x64 region whose first tile is at `(offset_x,
    /// offset_y)`. The output is always in the modern layout, regardless of
    /// the layout the block was decoded from.
    pub fn encode_at(&self, offset_x: usize, offset_y: usize) -> Result<Vec<u8>, Error> {
        let fits = |offset: usize, extent: usize| {
            offset
                .checked_add(REGION_SIZE)
                .map_or(false, |end| end <= extent)
        };

        if !fits(offset_x, self.width()) || !fits(offset_y, self.length()) {
            return Err(Error::new(ErrorKind::RegionOutOfBounds {
                offset_x,
                offset_y,
                width: self.width(),
                length: self.length(),
            }));
        }

        let mut writer = ByteWriter::new();
        for level in 0..LEVELS {
            for x in offset_x..offset_x + REGION_SIZE {
                for y in offset_y..offset_y + REGION_SIZE {
                    self.encode_tile(&mut writer, level, x, y);
                }
            }
        }

        Ok(writer.into_inner())
    }

    fn encode_tile(&self, writer: &mut ByteWriter, level: usize, x: usize, y: usize) {
        let tile = self.tile(level, x, y);
        if let Some(overlay) = tile.overlay.filter(|o| o.id != 0) {
            let tag = u16::from(overlay.shape) * 4 + u16::from(overlay.orientation & 3) + 2;
            writer.write_u16(tag);
            writer.write_u16(overlay.id);
        }

        if tile.flag != 0 {
            writer.write_u16(u16::from(tile.flag) + TAG_OVERLAY_MAX);
        }

        if tile.underlay != 0 {
            writer.write_u16(tile.underlay.wrapping_add(TAG_FLAG_MAX));
        }

        if tile.manual_height || level == 0 {
            writer.write_u16(TAG_HEIGHT);
            let steps = self.relative_height(level, x, y).wrapping_neg() / 8;
            writer.write_u8(steps as u8);
        } else {
            writer.write_u16(TAG_END);
        }
    }
}
