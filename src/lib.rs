#![doc = include_str!("../README.md")]

/// FidoNet address parsing and composition
pub mod address;
/// CP866 transcoding for message fields
pub mod charset;
mod config;
mod error;
/// Kludge line extraction from message text
pub mod kludge;
/// Packet header and message record codec
pub mod packet;

pub use address::{Address, compose_address, parse_address};
pub use charset::{decode_cp866, encode_cp866};
pub use config::CodecConfig;
pub use error::{PktError, Result};
pub use kludge::{KludgeMap, extract_kludges, seen_by_lines, strip_kludges};
pub use packet::{
    Decoded, Message, Packet, PacketHeader, attr, decode_packet, decode_packet_partial,
    encode_packet, read_packet_async, read_packet_file, read_packet_file_async,
    write_packet, write_packet_async, write_packet_file,
};
