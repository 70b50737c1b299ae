//! Salvaging damaged packets

use chrono::NaiveDate;
use fidopkt::{
    Address, CodecConfig, Message, PacketHeader, PktError, decode_packet_partial, encode_packet,
};

fn sample() -> (PacketHeader, Vec<Message>) {
    let created = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    let orig = Address::new(1, 100, 1);
    let dest = Address::new(1, 100, 2);
    let header = PacketHeader::new(&orig, &dest, created);
    let messages = (1..=3)
        .map(|n| Message {
            from_name: "Bob".to_string(),
            from_addr: orig.clone(),
            to_name: "Alice".to_string(),
            to_addr: dest.clone(),
            subject: format!("Part {n}"),
            text: format!("message number {n}\n"),
            date_time: created,
            attributes: 0,
            cost: 0,
        })
        .collect();
    (header, messages)
}

#[test]
fn test_complete_packet() {
    let (header, messages) = sample();
    let bytes = encode_packet(&header, &messages, &CodecConfig::default()).unwrap();

    let decoded = decode_packet_partial(&bytes);
    assert!(decoded.is_complete());
    assert_eq!(decoded.header.as_ref(), Some(&header));
    assert_eq!(decoded.messages, messages);

    let packet = decoded.into_result().unwrap();
    assert_eq!(packet.messages.len(), 3);
}

#[test]
fn test_truncated_inside_last_message() {
    let (header, messages) = sample();
    let bytes = encode_packet(&header, &messages, &CodecConfig::default()).unwrap();

    // Drop the end marker, the text terminator and a few text bytes
    let cut = &bytes[..bytes.len() - 6];
    let decoded = decode_packet_partial(cut);

    assert!(!decoded.is_complete());
    assert_eq!(decoded.header.as_ref(), Some(&header));
    assert_eq!(decoded.messages, messages[..2]);
    assert!(matches!(
        decoded.error,
        Some(PktError::TruncatedRecord { context: "text", .. })
    ));
    assert!(decoded.into_result().is_err());
}

#[test]
fn test_corrupt_date_keeps_earlier_messages() {
    let (header, messages) = sample();
    let mut bytes = encode_packet(&header, &messages, &CodecConfig::default()).unwrap();

    // Find the second sentinel and damage that record's date field
    let first_len = 2 + 32 + "Alice\0Bob\0Part 1\0message number 1\r\0".len();
    let second = 58 + first_len;
    assert_eq!(&bytes[second..second + 2], &[0x02u8, 0x00]);
    bytes[second + 2 + 12] = b'?';

    let decoded = decode_packet_partial(&bytes);
    assert_eq!(decoded.messages.len(), 1);
    assert_eq!(decoded.messages[0].subject, "Part 1");
    assert!(matches!(decoded.error, Some(PktError::DateFormat(_))));
}

#[test]
fn test_truncated_header_has_no_messages() {
    let decoded = decode_packet_partial(&[0u8; 57]);
    assert!(decoded.header.is_none());
    assert!(decoded.messages.is_empty());
    assert!(matches!(
        decoded.error,
        Some(PktError::TruncatedHeader { .. })
    ));
}
