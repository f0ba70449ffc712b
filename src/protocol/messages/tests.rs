use super::*;
use crate::protocol::transport::can_frame::CanFrame;

fn request(node: u8, payload: &[u8]) -> CanFrame {
    let id = CanId::builder(REQUEST_ID).with_node(node).build().unwrap();
    CanFrame::extended(id, payload)
}

#[test]
/// SET_SYMBOL decodes glyph code and color whatever node it is addressed to.
fn test_decode_set_symbol_ignores_node_bits() {
    for node in [0u8, 3, 15] {
        let frame = request(node, &[CMD_SET_SYMBOL, 5, 2, 0, 0, 0, 0, 0]);
        assert_eq!(
            Command::decode(&frame),
            Ok(Command::SetSymbol {
                code: 5,
                color: ColorSelect::Both
            })
        );
    }
}

#[test]
/// Dynamic symbol fields are little-endian, velocity and origin are signed.
fn test_decode_dynamic_fields_little_endian() {
    let set1 = request(0, &[CMD_DYN_SYMBOL_SET1, 7, 0x34, 0x12, 0x03, 0x00]);
    assert_eq!(
        Command::decode(&set1),
        Ok(Command::DynSymbolSet1 {
            glyph: 7,
            period: 0x1234,
            steps: 3
        })
    );

    let set2 = request(0, &[CMD_DYN_SYMBOL_SET2, 0, 0xFF, 0xFF, 0x02, 0x00]);
    assert_eq!(
        Command::decode(&set2),
        Ok(Command::DynSymbolSet2 { dx: -1, dy: 2 })
    );
}

#[test]
/// Pattern commands carry four rows in bytes 4..=7 and select their half by code.
fn test_decode_pattern_halves() {
    let upper = request(0, &[CMD_SET_SYMBOL_PATTERN_1, 9, 0, 0, 1, 2, 3, 4]);
    let lower = request(0, &[CMD_SET_SYMBOL_PATTERN_2, 9, 0, 0, 5, 6, 7, 8]);
    assert_eq!(
        Command::decode(&upper),
        Ok(Command::SetSymbolPattern {
            glyph: 9,
            half: PatternHalf::Upper,
            rows: [1, 2, 3, 4]
        })
    );
    match Command::decode(&lower) {
        Ok(Command::SetSymbolPattern { half, rows, .. }) => {
            assert_eq!(half.first_row(), 4);
            assert_eq!(rows, [5, 6, 7, 8]);
        }
        other => panic!("unexpected decode result: {other:?}"),
    }
}

#[test]
/// Short payloads, unknown codes and invalid colors are rejected.
fn test_decode_rejects_malformed_requests() {
    assert_eq!(
        Command::decode(&request(0, &[CMD_SET_SYMBOL, 5])),
        Err(CommandError::InvalidLength { len: 2 })
    );
    assert_eq!(
        Command::decode(&request(0, &[0x42, 0, 0])),
        Err(CommandError::UnknownCommand { code: 0x42 })
    );
    assert_eq!(
        Command::decode(&request(0, &[CMD_DYN_SYMBOL_SET4, 3])),
        Err(CommandError::InvalidColor { code: 3 })
    );
}

#[test]
/// Raw screen identifiers carry a full bitmap; other identifiers are unknown.
fn test_decode_screen_and_unknown_identifiers() {
    let rows = [0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81];
    let red = CanFrame::extended(
        CanId::builder(SET_RED_SCREEN_ID).with_node(2).build().unwrap(),
        &rows,
    );
    assert_eq!(Command::decode(&red), Ok(Command::SetRedScreen(rows)));

    let short = CanFrame::extended(CanId(SET_GREEN_SCREEN_ID), &rows[..4]);
    assert_eq!(
        Command::decode(&short),
        Err(CommandError::InvalidLength { len: 4 })
    );

    let presence = presence_frame(1).unwrap();
    assert_eq!(presence.len, 0);
    assert_eq!(
        Command::decode(&presence),
        Err(CommandError::UnknownIdentifier {
            id: ONBUS_ID | (1 << 20)
        })
    );
}

#[test]
/// `to_frame` qualifies the identifier with the target node and encodes the payload.
fn test_to_frame_addresses_node() {
    let command = Command::DynSymbolSet3 {
        start_x: -2,
        start_y: 4,
    };
    let frame = command.to_frame(3).unwrap();
    assert_eq!(frame.id.node_address(), 3);
    assert_eq!(frame.id.base(), REQUEST_ID);
    assert_eq!(&frame.data[..6], &[CMD_DYN_SYMBOL_SET3, 0, 0xFE, 0xFF, 4, 0]);
    assert_eq!(Command::decode(&frame), Ok(command));

    assert!(matches!(
        command.to_frame(16),
        Err(CanIdBuildError::InvalidNodeAddress { address: 16 })
    ));
}
