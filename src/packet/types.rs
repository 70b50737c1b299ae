use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::address::Address;
use crate::charset::{decode_cp866, encode_cp866};
use crate::kludge::{KludgeMap, extract_kludges, strip_kludges};
use crate::{PktError, Result};

/// Size of the fixed packet header in bytes
pub const PACKET_HEADER_SIZE: usize = 58;
/// Size of the fixed message record header (after the sentinel) in bytes
pub const MESSAGE_HEADER_SIZE: usize = 32;
/// Marker preceding every message record
pub const MESSAGE_SENTINEL: [u8; 2] = [0x02, 0x00];
/// Marker written after the last message
pub const PACKET_TERMINATOR: [u8; 2] = [0x00, 0x00];
/// Packet type tag written by this crate
pub const PACKET_TYPE_2: u16 = 2;

/// Session password length
pub const PASSWORD_SIZE: usize = 8;
/// Length of the reserved area closing the packet header
pub const FILLED_SIZE: usize = 20;
/// Length of the message date buffer
pub const DATE_TIME_SIZE: usize = 20;

/// Maximum size of the to/from user name fields
pub const USER_NAME_SIZE: usize = 36;
/// Maximum size of the subject field
pub const SUBJECT_SIZE: usize = 72;
/// Maximum size of the message text field
pub const TEXT_SIZE: usize = 65535;

/// chrono layout of the message date, e.g. `05 Mar 24  13:45:10`
pub const DATE_TIME_LAYOUT: &str = "%d %b %y  %H:%M:%S";
/// Significant bytes of the date buffer; the rest is a terminator
pub const DATE_TIME_TEXT_LEN: usize = 19;
/// First year of the two-digit window: `69`-`99` are 19xx, `00`-`68` are 20xx
pub const DATE_TIME_FIRST_YEAR: i32 = 1969;
/// Last year the two-digit message date can hold
pub const DATE_TIME_LAST_YEAR: i32 = 2068;

/// Message attribute bits
pub mod attr {
    /// Private message
    pub const PRIVATE: u16 = 0x0001;
    /// Crash (send immediately)
    pub const CRASH: u16 = 0x0002;
    /// Read by addressee
    pub const RECEIVED: u16 = 0x0004;
    /// Sent OK
    pub const SENT: u16 = 0x0008;
    /// File attached, subject holds the file name
    pub const FILE_ATTACHED: u16 = 0x0010;
    /// In transit
    pub const IN_TRANSIT: u16 = 0x0020;
    /// Unknown destination
    pub const ORPHAN: u16 = 0x0040;
    /// Delete after sending
    pub const KILL_SENT: u16 = 0x0080;
    /// Written on this system
    pub const LOCAL: u16 = 0x0100;
    /// Hold for pickup
    pub const HOLD: u16 = 0x0200;
    /// File request, subject holds the file name
    pub const FILE_REQUEST: u16 = 0x0800;
    /// Return receipt requested
    pub const RETURN_RECEIPT_REQUEST: u16 = 0x1000;
    /// This message is a return receipt
    pub const IS_RETURN_RECEIPT: u16 = 0x2000;
    /// Audit trail requested
    pub const AUDIT_REQUEST: u16 = 0x4000;
    /// File update request
    pub const FILE_UPDATE_REQUEST: u16 = 0x8000;
}

/// Fixed header at the start of every `.pkt` file
///
/// Node, net and zone describe the packet's sender and receiver, not the
/// messages inside it. The creation month is stored 0-based (0 = January).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketHeader {
    /// Originating node
    pub orig_node: u16,
    /// Destination node
    pub dest_node: u16,
    /// Creation year, e.g. 2024
    pub year: u16,
    /// Creation month, 0-11
    pub month: u16,
    /// Creation day, 1-31
    pub day: u16,
    /// Creation hour, 0-23
    pub hour: u16,
    /// Creation minute, 0-59
    pub minute: u16,
    /// Creation second, 0-59
    pub second: u16,
    /// Baud rate, 0 when unused
    pub baud: u16,
    /// Packet type, 2 for FTS-0001 packets
    pub packet_type: u16,
    /// Originating network
    pub orig_net: u16,
    /// Destination network
    pub dest_net: u16,
    /// Product code of the creating software
    pub product_code: u8,
    /// Serial number of the creating software
    pub serial_no: u8,
    /// Session password, zero padded
    pub password: [u8; PASSWORD_SIZE],
    /// Originating zone
    pub orig_zone: u16,
    /// Destination zone
    pub dest_zone: u16,
    /// Reserved trailing area
    pub filled: [u8; FILLED_SIZE],
}

impl PacketHeader {
    /// Create a type-2 header between two systems, stamped with `created`
    ///
    /// The year field is 16 bits unsigned: years before 0 are stored as 0
    /// and years after 65535 as 65535. Check [`PacketHeader::created`] if the
    /// timestamp may fall outside that range.
    pub fn new(orig: &Address, dest: &Address, created: NaiveDateTime) -> Self {
        Self {
            orig_node: orig.node,
            dest_node: dest.node,
            year: created.year().clamp(0, u16::MAX as i32) as u16,
            month: created.month0() as u16,
            day: created.day() as u16,
            hour: created.hour() as u16,
            minute: created.minute() as u16,
            second: created.second() as u16,
            baud: 0,
            packet_type: PACKET_TYPE_2,
            orig_net: orig.network,
            dest_net: dest.network,
            product_code: 0,
            serial_no: 0,
            password: [0; PASSWORD_SIZE],
            orig_zone: orig.zone,
            dest_zone: dest.zone,
            filled: [0; FILLED_SIZE],
        }
    }

    /// Set the session password
    ///
    /// The password is CP866 encoded, then zero padded or cut to exactly
    /// eight bytes.
    pub fn with_password(mut self, password: &str) -> Result<Self> {
        let bytes = encode_cp866(password)?;
        let len = bytes.len().min(PASSWORD_SIZE);
        self.password = [0; PASSWORD_SIZE];
        self.password[..len].copy_from_slice(&bytes[..len]);
        Ok(self)
    }

    /// Session password as text
    ///
    /// All eight bytes are decoded; zero padding shows up as `'\0'`.
    pub fn password(&self) -> String {
        decode_cp866(&self.password)
    }

    /// Creation timestamp, or `None` if the stored fields are not a valid date
    pub fn created(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month) + 1,
            u32::from(self.day),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }

    /// Address of the packet's sender (no point, no domain)
    pub fn origin(&self) -> Address {
        Address::new(self.orig_zone, self.orig_net, self.orig_node)
    }

    /// Address of the packet's receiver (no point, no domain)
    pub fn destination(&self) -> Address {
        Address::new(self.dest_zone, self.dest_net, self.dest_node)
    }

    /// Check the header can be written
    ///
    /// Only the 0-based month is checked; other timestamp fields are written
    /// as stored, so any decoded header can be encoded again.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.month > 11 {
            return Err(PktError::InvalidHeader(format!(
                "month {} out of range 0-11",
                self.month
            )));
        }
        Ok(())
    }
}

/// A single netmail or echomail message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Sender's name
    pub from_name: String,
    /// Sender's address (point is always 0 in packets)
    pub from_addr: Address,
    /// Recipient's name
    pub to_name: String,
    /// Recipient's address (point is always 0 in packets)
    pub to_addr: Address,
    /// Subject line
    pub subject: String,
    /// Message text including kludge lines, `\n` line endings
    pub text: String,
    /// When the message was written
    pub date_time: NaiveDateTime,
    /// Attribute bits, see [`attr`]
    pub attributes: u16,
    /// Cost in the originator's lowest currency unit
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u16,
}

impl Message {
    /// Check whether an attribute bit is set
    pub fn has_attribute(&self, flag: u16) -> bool {
        self.attributes & flag == flag
    }

    /// Kludge metadata embedded in the text
    pub fn kludges(&self) -> KludgeMap {
        extract_kludges(&self.text)
    }

    /// Text without kludge lines
    pub fn body(&self) -> String {
        strip_kludges(&self.text)
    }

    /// Echo area tag, `None` for netmail
    pub fn area(&self) -> Option<String> {
        self.kludges().remove("AREA")
    }
}

/// A decoded packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet header
    pub header: PacketHeader,
    /// Messages in packet order
    pub messages: Vec<Message>,
    /// Bytes used by the packet, including the end marker
    ///
    /// Anything after this offset was not read.
    pub consumed: usize,
}

/// Result of a decode that may have failed part way through
///
/// Messages decoded before a fatal error are kept so a damaged packet can be
/// salvaged.
#[derive(Debug)]
pub struct Decoded {
    /// Packet header, `None` if the header itself could not be read
    pub header: Option<PacketHeader>,
    /// Messages decoded before the end marker or the error
    pub messages: Vec<Message>,
    /// Bytes consumed so far
    pub consumed: usize,
    /// The error that stopped decoding, if any
    pub error: Option<PktError>,
}

impl Decoded {
    /// Whether the packet decoded without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a [`Packet`], discarding partial messages on error
    pub fn into_result(self) -> Result<Packet> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let header = self.header.ok_or(PktError::TruncatedHeader {
            needed: PACKET_HEADER_SIZE,
            available: self.consumed,
        })?;
        Ok(Packet {
            header,
            messages: self.messages,
            consumed: self.consumed,
        })
    }
}
