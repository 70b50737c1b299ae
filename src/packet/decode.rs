use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, trace, warn};

use super::types::*;
use crate::address::Address;
use crate::charset::decode_cp866;
use crate::{PktError, Result};

/// Decode a complete packet
///
/// # Example
///
/// ```
/// use fidopkt::{decode_packet, PktError};
///
/// // 58-byte header (all zero) followed by the end marker
/// let mut data = vec![0u8; 58];
/// data.extend_from_slice(&[0x00, 0x00]);
///
/// let packet = decode_packet(&data).unwrap();
/// assert!(packet.messages.is_empty());
///
/// assert!(matches!(
///     decode_packet(&data[..10]),
///     Err(PktError::TruncatedHeader { .. })
/// ));
/// ```
pub fn decode_packet(data: &[u8]) -> Result<Packet> {
    decode_packet_partial(data).into_result()
}

/// Decode a packet, keeping the messages read before any error
pub fn decode_packet_partial(data: &[u8]) -> Decoded {
    let mut reader = Reader::new(data);
    let mut decoded = Decoded {
        header: None,
        messages: Vec::new(),
        consumed: 0,
        error: None,
    };

    let header = match parse_packet_header(&mut reader) {
        Ok(header) => header,
        Err(e) => {
            decoded.error = Some(e);
            return decoded;
        }
    };
    debug!(
        "Packet from {} to {}, type {}",
        header.origin(),
        header.destination(),
        header.packet_type
    );

    loop {
        match parse_next_message(&mut reader, &header) {
            Ok(Some(message)) => {
                trace!(
                    "Message {} from {} ({}) to {} ({})",
                    decoded.messages.len() + 1,
                    message.from_name,
                    message.from_addr,
                    message.to_name,
                    message.to_addr
                );
                decoded.messages.push(message);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    "Packet decode stopped after {} messages: {}",
                    decoded.messages.len(),
                    e
                );
                decoded.error = Some(e);
                break;
            }
        }
    }

    decoded.header = Some(header);
    decoded.consumed = reader.offset;
    decoded
}

/// Bounded reader over the packet bytes
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8]> {
        let bytes = self
            .data
            .get(self.offset..self.offset + len)
            .ok_or(PktError::TruncatedRecord {
                offset: self.offset,
                context,
            })?;
        self.offset += len;
        Ok(bytes)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Read a zero-terminated field of at most `max` bytes
    ///
    /// CR becomes LF. A field that fills `max` bytes ends there; a zero
    /// directly after it is its terminator.
    fn read_field(&mut self, max: usize, context: &'static str) -> Result<Vec<u8>> {
        let mut field = Vec::new();

        while field.len() < max {
            let byte = self.peek().ok_or(PktError::TruncatedRecord {
                offset: self.offset,
                context,
            })?;
            self.offset += 1;
            match byte {
                0x00 => return Ok(field),
                b'\r' => field.push(b'\n'),
                other => field.push(other),
            }
        }

        if self.peek() == Some(0x00) {
            self.offset += 1;
        } else {
            warn!("{} reached {} bytes without terminator", context, max);
        }
        Ok(field)
    }
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Parse the fixed packet header
fn parse_packet_header(reader: &mut Reader<'_>) -> Result<PacketHeader> {
    if reader.remaining() < PACKET_HEADER_SIZE {
        return Err(PktError::TruncatedHeader {
            needed: PACKET_HEADER_SIZE,
            available: reader.remaining(),
        });
    }
    let b = reader.take(PACKET_HEADER_SIZE, "packet header")?;

    let mut password = [0u8; PASSWORD_SIZE];
    password.copy_from_slice(&b[26..34]);
    let mut filled = [0u8; FILLED_SIZE];
    filled.copy_from_slice(&b[38..58]);

    Ok(PacketHeader {
        orig_node: u16_at(b, 0),
        dest_node: u16_at(b, 2),
        year: u16_at(b, 4),
        month: u16_at(b, 6),
        day: u16_at(b, 8),
        hour: u16_at(b, 10),
        minute: u16_at(b, 12),
        second: u16_at(b, 14),
        baud: u16_at(b, 16),
        packet_type: u16_at(b, 18),
        orig_net: u16_at(b, 20),
        dest_net: u16_at(b, 22),
        product_code: b[24],
        serial_no: b[25],
        password,
        orig_zone: u16_at(b, 34),
        dest_zone: u16_at(b, 36),
        filled,
    })
}

/// Parse the next message, or `None` at the end marker
fn parse_next_message(reader: &mut Reader<'_>, header: &PacketHeader) -> Result<Option<Message>> {
    let marker = reader.take(2, "message sentinel")?;
    if marker != MESSAGE_SENTINEL.as_slice() {
        return Ok(None);
    }

    let b = reader.take(MESSAGE_HEADER_SIZE, "message header")?;
    let orig_node = u16_at(b, 0);
    let dest_node = u16_at(b, 2);
    let orig_net = u16_at(b, 4);
    let dest_net = u16_at(b, 6);
    let attributes = u16_at(b, 8);
    let cost = u16_at(b, 10);
    let date_field = &b[12..12 + DATE_TIME_SIZE];

    let to_name = reader.read_field(USER_NAME_SIZE, "to-name")?;
    let from_name = reader.read_field(USER_NAME_SIZE, "from-name")?;
    let subject = reader.read_field(SUBJECT_SIZE, "subject")?;
    let text = reader.read_field(TEXT_SIZE, "text")?;

    let date_time = parse_date_time(date_field)?;

    Ok(Some(Message {
        from_name: decode_cp866(&from_name),
        from_addr: Address::new(header.orig_zone, orig_net, orig_node),
        to_name: decode_cp866(&to_name),
        to_addr: Address::new(header.dest_zone, dest_net, dest_node),
        subject: decode_cp866(&subject),
        text: decode_cp866(&text),
        date_time,
        attributes,
        cost,
    }))
}

/// Parse the fixed-layout message date, e.g. `05 Mar 24  13:45:10`
///
/// Two-digit years `69`-`99` are 19xx, `00`-`68` are 20xx.
pub(crate) fn parse_date_time(field: &[u8]) -> Result<NaiveDateTime> {
    let text = &field[..DATE_TIME_TEXT_LEN.min(field.len())];
    let text = std::str::from_utf8(text).map_err(|_| {
        PktError::DateFormat(format!("non-ASCII date field {:02x?}", text))
    })?;
    let date_time = NaiveDateTime::parse_from_str(text, DATE_TIME_LAYOUT)
        .map_err(|e| PktError::DateFormat(format!("{:?}: {}", text, e)))?;

    // chrono puts 69 in 2069
    if date_time.year() > DATE_TIME_LAST_YEAR {
        return date_time
            .with_year(date_time.year() - 100)
            .ok_or_else(|| PktError::DateFormat(format!("{:?}: year out of range", text)));
    }
    Ok(date_time)
}
