//! CP866 transcoding for message text
//!
//! FidoNet message fields travel as single-byte CP866 (IBM866) text. Decoding
//! is total: every byte maps to a character. Encoding fails on characters
//! the code page cannot represent.
//!
//! One deliberate substitution applies on encode: CYRILLIC CAPITAL LETTER EN
//! (`Н`, byte 0x8D) is written as Latin `H`. Byte 0x8D doubles as the
//! FidoNet soft-CR, so it never appears in encoded text.

use encoding_rs::{EncoderResult, IBM866};

use crate::{PktError, Result};

/// Code point written as Latin `H` on encode
const CYRILLIC_CAPITAL_EN: char = '\u{041D}';

/// Decode CP866 bytes into a `String`
///
/// # Example
///
/// ```
/// use fidopkt::decode_cp866;
///
/// assert_eq!(decode_cp866(&[0x8F, 0xE0, 0xA8, 0xA2, 0xA5, 0xE2]), "Привет");
/// ```
pub fn decode_cp866(bytes: &[u8]) -> String {
    let (text, _had_errors) = IBM866.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Encode text as CP866 bytes
///
/// # Errors
///
/// Returns [`PktError::UnsupportedCharacter`] for the first character with no
/// CP866 representation.
pub fn encode_cp866(text: &str) -> Result<Vec<u8>> {
    let text: String = text
        .chars()
        .map(|ch| if ch == CYRILLIC_CAPITAL_EN { 'H' } else { ch })
        .collect();

    let mut encoder = IBM866.new_encoder();
    let mut output = Vec::with_capacity(text.len());
    // Single-byte output never needs more room than the UTF-8 input
    let mut buffer = vec![0u8; text.len().max(1)];
    let mut consumed = 0;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(&text[consumed..], &mut buffer, true);
        output.extend_from_slice(&buffer[..written]);
        consumed += read;

        match result {
            EncoderResult::InputEmpty => return Ok(output),
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(ch) => {
                // `read` includes the unmappable character itself
                let position = text[..consumed].chars().count() - 1;
                return Err(PktError::UnsupportedCharacter { ch, position });
            }
        }
    }
}
