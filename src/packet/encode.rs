use std::io::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use super::types::*;
use crate::charset::encode_cp866;
use crate::config::CodecConfig;
use crate::{PktError, Result};

/// Encode a packet to bytes
///
/// Writes the header, each message behind a sentinel, and the end marker.
///
/// # Errors
///
/// - [`PktError::InvalidHeader`] if the header month is not 0-11
/// - [`PktError::DateFormat`] if a message date is outside 1969-2068 or has
///   a fractional second
/// - [`PktError::UnsupportedCharacter`] if a field cannot be CP866 encoded
/// - [`PktError::FieldTooLarge`] if a field is oversized and truncation is off
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fidopkt::{decode_packet, encode_packet, Address, CodecConfig, Message, PacketHeader};
///
/// let created = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(13, 45, 10).unwrap();
/// let orig: Address = "2:5020/1042".parse().unwrap();
/// let dest: Address = "2:5020/1".parse().unwrap();
/// let header = PacketHeader::new(&orig, &dest, created).with_password("secret").unwrap();
///
/// let message = Message {
///     from_name: "Sysop".to_string(),
///     from_addr: orig.clone(),
///     to_name: "All".to_string(),
///     to_addr: dest.clone(),
///     subject: "Hello".to_string(),
///     text: "AREA:R50.SYSOP\nHello world\n".to_string(),
///     date_time: created,
///     attributes: 0,
///     cost: 0,
/// };
///
/// let bytes = encode_packet(&header, &[message.clone()], &CodecConfig::default()).unwrap();
/// let packet = decode_packet(&bytes).unwrap();
/// assert_eq!(packet.header, header);
/// assert_eq!(packet.messages, vec![message]);
/// ```
pub fn encode_packet(
    header: &PacketHeader,
    messages: &[Message],
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_packet(&mut output, header, messages, config)?;
    Ok(output)
}

/// Encode a packet into a writer
pub fn write_packet<W: Write>(
    writer: &mut W,
    header: &PacketHeader,
    messages: &[Message],
    config: &CodecConfig,
) -> Result<()> {
    header.validate()?;
    writer.write_all(&encode_packet_header(header))?;

    for message in messages {
        writer.write_all(&encode_message(header, message, config)?)?;
    }

    writer.write_all(&PACKET_TERMINATOR)?;
    debug!(
        "Wrote packet from {} to {} with {} messages",
        header.origin(),
        header.destination(),
        messages.len()
    );
    Ok(())
}

/// Lay out the fixed 58-byte packet header
fn encode_packet_header(header: &PacketHeader) -> [u8; PACKET_HEADER_SIZE] {
    let mut b = [0u8; PACKET_HEADER_SIZE];
    let words = [
        header.orig_node,
        header.dest_node,
        header.year,
        header.month,
        header.day,
        header.hour,
        header.minute,
        header.second,
        header.baud,
        header.packet_type,
        header.orig_net,
        header.dest_net,
    ];
    for (i, word) in words.iter().enumerate() {
        b[i * 2..i * 2 + 2].copy_from_slice(&word.to_le_bytes());
    }
    b[24] = header.product_code;
    b[25] = header.serial_no;
    b[26..34].copy_from_slice(&header.password);
    b[34..36].copy_from_slice(&header.orig_zone.to_le_bytes());
    b[36..38].copy_from_slice(&header.dest_zone.to_le_bytes());
    b[38..58].copy_from_slice(&header.filled);
    b
}

/// Sentinel, record header and the four variable fields of one message
fn encode_message(
    header: &PacketHeader,
    message: &Message,
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    if message.from_addr.zone != header.orig_zone || message.to_addr.zone != header.dest_zone {
        warn!(
            "Message {} -> {} crosses zones of packet {} -> {}; zones come from the packet header",
            message.from_addr,
            message.to_addr,
            header.origin(),
            header.destination()
        );
    }

    let mut output = Vec::with_capacity(
        MESSAGE_SENTINEL.len() + MESSAGE_HEADER_SIZE + message.text.len() + 64,
    );
    output.extend_from_slice(&MESSAGE_SENTINEL);
    for word in [
        message.from_addr.node,
        message.to_addr.node,
        message.from_addr.network,
        message.to_addr.network,
        message.attributes,
        message.cost,
    ] {
        output.extend_from_slice(&word.to_le_bytes());
    }
    output.extend_from_slice(&format_date_time(&message.date_time)?);

    for (value, max, field) in [
        (&message.to_name, USER_NAME_SIZE, "to-name"),
        (&message.from_name, USER_NAME_SIZE, "from-name"),
        (&message.subject, SUBJECT_SIZE, "subject"),
        (&message.text, TEXT_SIZE, "text"),
    ] {
        output.extend_from_slice(&encode_field(value, max, field, config)?);
        output.push(0x00);
    }

    Ok(output)
}

/// CP866 bytes of one variable field, without terminator
///
/// Line endings become CR. Oversized fields are truncated or rejected.
fn encode_field(
    value: &str,
    max: usize,
    field: &'static str,
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    if let Some(position) = value.chars().position(|c| c == '\0') {
        return Err(PktError::UnsupportedCharacter { ch: '\0', position });
    }

    let value = value.replace("\r\n", "\r").replace('\n', "\r");
    let mut bytes = encode_cp866(&value)?;

    if bytes.len() > max {
        if !config.truncate_oversized_fields {
            return Err(PktError::FieldTooLarge {
                field,
                len: bytes.len(),
                max,
            });
        }
        warn!("Truncating {} from {} to {} bytes", field, bytes.len(), max);
        bytes.truncate(max);
    }

    Ok(bytes)
}

/// Format the message date into its fixed 20-byte buffer
///
/// The field holds whole seconds and a two-digit year, so only dates from
/// 1969 to 2068 without a fractional second can be written.
pub(crate) fn format_date_time(date_time: &NaiveDateTime) -> Result<[u8; DATE_TIME_SIZE]> {
    if !(DATE_TIME_FIRST_YEAR..=DATE_TIME_LAST_YEAR).contains(&date_time.year()) {
        return Err(PktError::DateFormat(format!(
            "{} is outside {}-{}",
            date_time, DATE_TIME_FIRST_YEAR, DATE_TIME_LAST_YEAR
        )));
    }
    if date_time.nanosecond() != 0 {
        return Err(PktError::DateFormat(format!(
            "{} has a fractional second",
            date_time
        )));
    }

    let text = date_time.format(DATE_TIME_LAYOUT).to_string();
    let mut field = [0u8; DATE_TIME_SIZE];
    let len = text.len().min(DATE_TIME_TEXT_LEN);
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
    Ok(field)
}
