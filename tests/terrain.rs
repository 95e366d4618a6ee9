use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rscodec::terrain::{
    ClassicNoise, Overlay, RegionPosition, TerrainCodec, TileFormat, LEVELS, REGION_SIZE,
};

const TILES_PER_LEVEL: usize = REGION_SIZE * REGION_SIZE;

fn flat_codec() -> TerrainCodec<fn(i32, i32) -> i32> {
    fn flat(_x: i32, _y: i32) -> i32 {
        25
    }
    TerrainCodec::new(flat as fn(i32, i32) -> i32)
}

/// A region payload in the modern layout whose fields are all in the form the
/// encoder writes them back in
#[derive(Debug, Clone)]
struct ModernRegion(Vec<u8>);

impl Arbitrary for ModernRegion {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = Vec::new();
        for level in 0..LEVELS {
            for _ in 0..TILES_PER_LEVEL {
                if bool::arbitrary(g) {
                    let tag = 2 + u16::arbitrary(g) % 48;
                    let id = u16::arbitrary(g).max(1);
                    out.extend_from_slice(&tag.to_be_bytes());
                    out.extend_from_slice(&id.to_be_bytes());
                }

                if bool::arbitrary(g) {
                    let tag = 50 + u16::arbitrary(g) % 32;
                    out.extend_from_slice(&tag.to_be_bytes());
                }

                if bool::arbitrary(g) {
                    let tag = 82 + u16::arbitrary(g) % (u16::MAX - 81);
                    out.extend_from_slice(&tag.to_be_bytes());
                }

                if level == 0 || bool::arbitrary(g) {
                    let height = match u8::arbitrary(g) {
                        1 => 2,
                        h => h,
                    };
                    out.extend_from_slice(&[0, 1, height]);
                } else {
                    out.extend_from_slice(&[0, 0]);
                }
            }
        }

        ModernRegion(out)
    }
}

#[quickcheck]
fn modern_payloads_round_trip(region: ModernRegion) -> bool {
    let decoded = flat_codec()
        .decode(&region.0, RegionPosition::default())
        .unwrap();
    decoded.format == TileFormat::Modern && decoded.block.encode().unwrap() == region.0
}

#[test]
fn test_edges_are_padded() {
    let payload = [0u8, 0].repeat(LEVELS * TILES_PER_LEVEL);
    let codec = TerrainCodec::new(ClassicNoise);
    let region = codec
        .decode(&payload, RegionPosition::new(3200, 3200))
        .unwrap();

    let block = &region.block;
    let (w, l) = (block.width(), block.length());
    for level in 0..LEVELS {
        for y in 0..=l {
            assert_eq!(block.height(level, w, y), block.height(level, w - 1, y));
        }
        for x in 0..=w {
            assert_eq!(block.height(level, x, l), block.height(level, x, l - 1));
        }
    }

    // noise heights are clamped to 10..=60 steps
    for x in 0..w {
        for y in 0..l {
            let height = block.height(0, x, y);
            assert!((-480..=-80).contains(&height), "{}", height);
            assert_eq!(block.height(3, x, y), height - 720);
        }
    }
}

#[test]
fn test_legacy_payload_falls_back() {
    // overlay 7 with tag 2, flag 1, underlay 2, explicit height 10
    let payload = [2u8, 7, 50, 83, 1, 10].repeat(LEVELS * TILES_PER_LEVEL);

    let codec = flat_codec();
    let modern = codec.decode_format(&payload, RegionPosition::default(), TileFormat::Modern);
    assert!(modern.unwrap_err().is_eof());

    let region = codec.decode(&payload, RegionPosition::default()).unwrap();
    assert_eq!(region.format, TileFormat::Legacy);

    let direct = codec
        .decode_format(&payload, RegionPosition::default(), TileFormat::Legacy)
        .unwrap();
    assert_eq!(region.block, direct);

    let tile = region.block.tile(2, 17, 33);
    assert_eq!(
        tile.overlay,
        Some(Overlay {
            id: 7,
            shape: 0,
            orientation: 0
        })
    );
    assert_eq!(tile.flag, 1);
    assert_eq!(tile.underlay, 2);
    assert!(tile.manual_height);
    assert_eq!(region.block.height(2, 17, 33), -240);
}

#[test]
fn test_legacy_payload_is_upgraded_on_encode() {
    let payload = [1u8, 10].repeat(LEVELS * TILES_PER_LEVEL);
    let region = flat_codec()
        .decode(&payload, RegionPosition::default())
        .unwrap();
    assert_eq!(region.format, TileFormat::Legacy);

    let encoded = region.block.encode().unwrap();
    assert_eq!(encoded, [0u8, 1, 10].repeat(LEVELS * TILES_PER_LEVEL));

    let again = flat_codec()
        .decode(&encoded, RegionPosition::default())
        .unwrap();
    assert_eq!(again.format, TileFormat::Modern);
    assert_eq!(again.block, region.block);
}

#[test]
fn test_height_chain() {
    let mut payload = vec![0u8, 1, 10];
    payload.extend([0u8, 1, 0].repeat(TILES_PER_LEVEL - 1));
    payload.extend([0u8, 0].repeat((LEVELS - 1) * TILES_PER_LEVEL));

    let region = flat_codec()
        .decode(&payload, RegionPosition::default())
        .unwrap();
    assert_eq!(region.format, TileFormat::Modern);

    let block = &region.block;
    assert_eq!(block.height(0, 0, 0), -80);
    assert_eq!(block.height(1, 0, 0), -80 - 240);
    assert_eq!(block.height(2, 0, 0), -80 - 480);
    assert_eq!(block.height(3, 0, 0), -80 - 720);
    assert!(block.tile(0, 0, 0).manual_height);
    assert!(!block.tile(1, 0, 0).manual_height);

    assert_eq!(block.height(3, 1, 0), -720);
    assert_eq!(block.encode().unwrap(), payload);
}

#[test]
fn test_fails_in_both_layouts() {
    let payload = [0xffu8, 0xff, 0xff];
    let err = flat_codec()
        .decode(&payload, RegionPosition::default())
        .unwrap_err();
    assert!(err.is_eof());
}
