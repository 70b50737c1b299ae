//! Reading and writing packets on files and async streams
//!
//! Packets are small, so every helper reads or writes the whole packet as one
//! buffer. File handles live only for the duration of the call.

use std::fs;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::decode::decode_packet;
use super::encode::encode_packet;
use super::types::{Message, Packet, PacketHeader};
use crate::Result;
use crate::config::CodecConfig;

/// Read and decode a `.pkt` file
///
/// # Example
/// ```no_run
/// use fidopkt::read_packet_file;
///
/// let packet = read_packet_file("/var/spool/fido/inbound/0a1b2c3d.pkt").unwrap();
/// for message in &packet.messages {
///     println!("{} -> {}: {}", message.from_name, message.to_name, message.subject);
/// }
/// ```
pub fn read_packet_file<P: AsRef<Path>>(path: P) -> Result<Packet> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    decode_packet(&data)
}

/// Encode and write a `.pkt` file
///
/// Nothing is written if encoding fails.
pub fn write_packet_file<P: AsRef<Path>>(
    path: P,
    header: &PacketHeader,
    messages: &[Message],
    config: &CodecConfig,
) -> Result<()> {
    let path = path.as_ref();
    let data = encode_packet(header, messages, config)?;
    fs::write(path, &data)?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Read a packet from an async stream until EOF and decode it
pub async fn read_packet_async<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Packet> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    decode_packet(&data)
}

/// Encode a packet and write it to an async stream
pub async fn write_packet_async<W: AsyncWrite + Unpin>(
    writer: &mut W,
    header: &PacketHeader,
    messages: &[Message],
    config: &CodecConfig,
) -> Result<()> {
    let data = encode_packet(header, messages, config)?;
    writer.write_all(&data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read and decode a `.pkt` file without blocking the runtime
pub async fn read_packet_file_async<P: AsRef<Path>>(path: P) -> Result<Packet> {
    let data = tokio::fs::read(path.as_ref()).await?;
    decode_packet(&data)
}
