use rscodec::anim::{
    AnimationArchive, AnimationDefinition, Frame, LookupFallback, SequenceDecoder,
    UnknownOpcodeStrategy, INTERLEAVE_END,
};
use rscodec::ErrorKind;

fn assert_default_filled(def: &AnimationDefinition) {
    assert_eq!(def.frame_count(), 1);
    assert_eq!(def.primary_frames().collect::<Vec<_>>(), vec![-1]);
    assert_eq!(def.frames[0].secondary, -1);
    assert_eq!(def.durations().collect::<Vec<_>>(), vec![-1]);
    assert_eq!(def.animating_precedence, 0);
    assert_eq!(def.walking_precedence, 0);
}

#[test]
fn test_terminator_only() {
    let def = AnimationDefinition::decode(&[0x00]).unwrap();
    assert_default_filled(&def);
    assert_eq!(def.frames, vec![Frame::EMPTY]);
}

#[test]
fn test_interleave_order_sets_precedence() {
    let def = AnimationDefinition::decode(&[0x03, 0x02, 0x00, 0x01, 0x00]).unwrap();
    assert_eq!(def.interleave_order, Some(vec![0, 1, INTERLEAVE_END]));
    assert_eq!(def.animating_precedence, 2);
    assert_eq!(def.walking_precedence, 2);
}

#[test]
fn test_explicit_precedence_wins() {
    let def =
        AnimationDefinition::decode(&[0x03, 0x01, 0x04, 0x09, 0x01, 0x0a, 0x00, 0x00]).unwrap();
    assert_eq!(def.animating_precedence, 1);
    assert_eq!(def.walking_precedence, 0);
}

#[test]
fn test_frame_id_reconstruction() {
    let data = [0x01, 0x00, 0x01, 0x00, 0x05, 0x00, 0x03, 0x00, 0x01, 0x00];
    let def = AnimationDefinition::decode(&data).unwrap();
    assert_eq!(
        def.frames,
        vec![Frame {
            primary: 3 + (1 << 16),
            secondary: -1,
            duration: 5,
        }]
    );
    assert_eq!(def.frames[0].primary, 65539);
}

#[test]
fn test_unrecognized_opcode_is_not_fatal() {
    let def = AnimationDefinition::decode(&[0xff, 0x00]).unwrap();
    assert_default_filled(&def);
    assert_eq!(def, AnimationDefinition::decode(&[0x00]).unwrap());
}

#[test]
fn test_strict_decoder_rejects_unrecognized_opcode() {
    let decoder = SequenceDecoder::builder()
        .on_unknown_opcode(UnknownOpcodeStrategy::Error)
        .build();
    let err = decoder.decode(&[0xff, 0x00]).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnknownOpcode {
            opcode: 0xff,
            offset: 0
        }
    ));
}

#[test]
fn test_reserved_opcodes_are_skipped() {
    let data = [
        12, 1, 0, 1, 0, 2, // chat frames
        13, 1, 1, 2, 3, 4, 5, // frame sounds
        14, 0, 0, 0, 1, // skeletal id
        15, 0, 1, 1, 2, 3, 4, 5, 6, 7, // skeletal sounds
        16, 0, 0, 0, 9, // skeletal range
        17, 2, 1, 1, // skeletal mask
        5, 9, // priority
        0,
    ];
    let def = AnimationDefinition::decode(&data).unwrap();
    assert_eq!(def.priority, 9);
    assert_eq!(def.frames, vec![Frame::EMPTY]);
}

#[test]
fn test_archive_lookup_fallback() {
    let archive = AnimationArchive::from_entries(vec![
        (0u32, vec![0x05u8, 0x01, 0x00]),
        (2u32, vec![0x05u8, 0x03, 0x00]),
    ])
    .unwrap();

    assert_eq!(archive.len(), 3);
    assert_eq!(archive.get(2).unwrap().priority, 3);
    assert!(archive.get(1).is_none());
    assert_eq!(archive.get(-5).unwrap().priority, 1);
    assert_eq!(archive.get(3).unwrap().priority, 1);

    let archive = archive.with_fallback(LookupFallback::None);
    assert!(archive.get(3).is_none());
    assert_eq!(archive.get(0).unwrap().priority, 1);
}

#[test]
fn test_packed_archive() {
    let mut data = vec![0x00u8, 0x02];
    data.extend_from_slice(&[0x04, 0x00]);
    data.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x07, 0x00, 0x00, 0x00]);

    let mut archive = AnimationArchive::new();
    archive.load_packed(&data).unwrap();
    assert_eq!(archive.count(), 2);
    assert!(archive.get(0).unwrap().stretches);
    assert_eq!(archive.get(1).unwrap().frames[0].primary, 7);
}
