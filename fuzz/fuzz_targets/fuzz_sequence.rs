#![no_main]
use libfuzzer_sys::fuzz_target;
use rscodec::anim::{AnimationArchive, AnimationDefinition};

fuzz_target!(|data: &[u8]| {
    if let Ok(definition) = AnimationDefinition::decode(data) {
        assert!(definition.frame_count() >= 1);
    }

    let mut archive = AnimationArchive::new();
    let _ = archive.load_packed(data);
    let _ = archive.get(-1);
});
