//! FidoNet packet error types

use thiserror::Error;

/// Packet codec, address and transcoding errors
#[derive(Error, Debug)]
pub enum PktError {
    /// IO error while reading or writing a packet stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Address text does not match `zone:net/node[.point][@domain]`
    #[error("Invalid FidoNet address: {0}")]
    AddressFormat(String),

    /// Stream ended inside the fixed packet header
    #[error("Packet header truncated: need {needed} bytes, got {available}")]
    TruncatedHeader {
        /// Size of the fixed header
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Stream ended inside a message record or where a sentinel was expected
    #[error("Message record truncated at offset {offset}: {context}")]
    TruncatedRecord {
        /// Byte offset into the packet where data ran out
        offset: usize,
        /// Which part of the record was being read
        context: &'static str,
    },

    /// Message date field does not match the fixed layout
    #[error("Invalid message date: {0}")]
    DateFormat(String),

    /// Character has no CP866 representation
    #[error("Character {ch:?} at position {position} cannot be encoded in CP866")]
    UnsupportedCharacter {
        /// The offending character
        ch: char,
        /// Character index within the input text
        position: usize,
    },

    /// Variable field exceeds its declared maximum and truncation is disabled
    #[error("Field {field} is {len} bytes, maximum is {max}")]
    FieldTooLarge {
        /// Field name (to-name, from-name, subject, text)
        field: &'static str,
        /// Encoded length
        len: usize,
        /// Declared maximum
        max: usize,
    },

    /// Packet header fields cannot be written as given
    #[error("Invalid packet header: {0}")]
    InvalidHeader(String),
}

/// Result type alias using PktError
pub type Result<T> = std::result::Result<T, PktError>;
