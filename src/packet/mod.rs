//! FidoNet `.pkt` packet codec
//!
//! A packet is a fixed 58-byte header followed by message records. Each
//! record starts with the sentinel `02 00`, a fixed 32-byte header and four
//! zero-terminated CP866 fields (to-name, from-name, subject, text). Any other
//! two bytes in place of the sentinel end the packet.
//!
//! Reference: FTS-0001, "A Basic FidoNet Technical Standard"

pub mod decode;
pub mod encode;
pub mod io;
pub mod types;

pub use decode::{decode_packet, decode_packet_partial};
pub use encode::{encode_packet, write_packet};
pub use io::{
    read_packet_async, read_packet_file, read_packet_file_async, write_packet_async,
    write_packet_file,
};
pub use types::{Decoded, Message, Packet, PacketHeader, attr};
