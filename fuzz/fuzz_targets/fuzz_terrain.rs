#![no_main]
use libfuzzer_sys::fuzz_target;
use rscodec::terrain::{RegionPosition, TerrainCodec, TileFormat};

fuzz_target!(|data: &[u8]| {
    let codec = TerrainCodec::new(|x: i32, y: i32| x ^ y);
    let position = RegionPosition::new(3200, 3200).with_offset(-8, 16);
    let Ok(region) = codec.decode(data, position) else {
        return;
    };

    // blocks decoded from the modern layout at the origin must re-encode to
    // something that decodes to the same block
    if region.format == TileFormat::Modern {
        let origin = codec.decode(data, RegionPosition::new(3200, 3200)).unwrap();
        let encoded = origin.block.encode().unwrap();
        let again = codec
            .decode_format(&encoded, RegionPosition::new(3200, 3200), TileFormat::Modern)
            .unwrap();
        assert_eq!(again.tile(0, 0, 0).overlay, origin.block.tile(0, 0, 0).overlay);
    }
});
