//! Legacy binary (.doc/.ppt) content adapters.
//!
//! Both formats live in OLE compound files. The Word adapter decodes the
//! `WordDocument` stream (piece table when the FIB points at one, simple
//! character range otherwise); the PowerPoint adapter walks the record tree
//! of the `PowerPoint Document` stream collecting text atoms. Output is
//! carriage-return-delimited fragments that the normalizer trims, filters
//! and joins.

use docsift_core::{ExtractError, FormatAdapter, RawContent};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a named stream out of the OLE container at `path`.
fn read_ole_stream(path: &Path, name: &str) -> Result<Vec<u8>, ExtractError> {
    let file = File::open(path)?;
    let mut ole =
        cfb::CompoundFile::open(file).map_err(|e| ExtractError::Container(e.to_string()))?;
    let mut stream = ole
        .open_stream(name)
        .map_err(|_| ExtractError::MissingEntry(name.to_string()))?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    Ok(data)
}

fn latin1_to_string(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

fn utf16le_to_string(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Split decoded legacy text on carriage returns, dropping NULs.
fn carriage_return_fragments(text: &str) -> Vec<String> {
    text.split('\r')
        .map(|line| line.replace('\0', ""))
        .collect()
}

// ============================================================================
// Word binary (.doc)
// ============================================================================

/// The handful of File Information Block fields the decoder needs.
#[derive(Debug, Clone, Copy)]
struct Fib {
    use_table1: bool,
    fc_min: u32,
    fc_mac: u32,
    fc_clx: u32,
    lcb_clx: u32,
}

/// Parse the FIB at the head of the `WordDocument` stream.
///
/// Returns `None` when the magic number is absent or the stream is too
/// short to hold the fixed header.
fn parse_fib(word_stream: &[u8]) -> Option<Fib> {
    if word_stream.len() < 256 {
        return None;
    }
    if read_u16_le(word_stream, 0)? != 0xA5EC {
        return None;
    }
    let flags = read_u16_le(word_stream, 0x0A)?;
    let use_table1 = (flags & 0x0200) != 0;
    let fc_min = read_u32_le(word_stream, 0x18)?;
    let fc_mac = read_u32_le(word_stream, 0x1C)?;

    // Skip the variable-length fibRgW and fibRgLw blocks to reach the
    // fc/lcb pair array; entry 33 is the piece-table CLX.
    let mut pos = 32usize;
    let csw = read_u16_le(word_stream, pos)? as usize;
    pos += 2 + csw * 2;
    let cslw = read_u16_le(word_stream, pos)? as usize;
    pos += 2 + cslw * 4;
    let cb_rg_fc_lcb = read_u16_le(word_stream, pos)? as usize;
    pos += 2;

    let mut fc_clx = 0;
    let mut lcb_clx = 0;
    const CLX_INDEX: usize = 33;
    if cb_rg_fc_lcb > CLX_INDEX && word_stream.len() >= pos + cb_rg_fc_lcb * 8 {
        let offset = pos + CLX_INDEX * 8;
        fc_clx = read_u32_le(word_stream, offset)?;
        lcb_clx = read_u32_le(word_stream, offset + 4)?;
    }
    Some(Fib {
        use_table1,
        fc_min,
        fc_mac,
        fc_clx,
        lcb_clx,
    })
}

/// One entry of the piece table: a character-position range and where its
/// bytes live in the `WordDocument` stream.
#[derive(Debug, Clone, Copy)]
struct TextPiece {
    cp_start: u32,
    cp_end: u32,
    file_offset: u32,
    unicode: bool,
}

/// Walk the CLX in the table stream and collect text pieces.
fn parse_piece_table(table_stream: &[u8], fc_clx: u32, lcb_clx: u32) -> Vec<TextPiece> {
    let start = fc_clx as usize;
    let end = start.saturating_add(lcb_clx as usize);
    if lcb_clx == 0 || end > table_stream.len() {
        return Vec::new();
    }
    let clx = &table_stream[start..end];
    let mut pos = 0usize;
    let mut pieces = Vec::new();
    while pos < clx.len() {
        let clxt = clx[pos];
        pos += 1;
        match clxt {
            // Pcdt: the piece descriptor table itself
            0x01 => {
                let Some(lcb) = read_u32_le(clx, pos).map(|v| v as usize) else {
                    break;
                };
                pos += 4;
                if lcb < 4 || pos + lcb > clx.len() {
                    break;
                }
                let plc = &clx[pos..pos + lcb];
                let piece_count = (lcb - 4) / 12;
                if piece_count == 0 {
                    break;
                }
                let mut cps = Vec::with_capacity(piece_count + 1);
                for i in 0..=piece_count {
                    cps.push(read_u32_le(plc, i * 4).unwrap_or(0));
                }
                let pcd = &plc[(piece_count + 1) * 4..];
                for i in 0..piece_count {
                    let fc = read_u32_le(pcd, i * 8 + 2).unwrap_or(0);
                    let unicode = (fc & 0x4000_0000) == 0;
                    let file_offset = if unicode { fc } else { (fc & 0x3FFF_FFFF) / 2 };
                    pieces.push(TextPiece {
                        cp_start: cps[i],
                        cp_end: cps[i + 1],
                        file_offset,
                        unicode,
                    });
                }
                break;
            }
            // Prc: skip property modifiers
            0x02 => {
                let Some(cb) = read_u16_le(clx, pos).map(|v| v as usize) else {
                    break;
                };
                pos += 2 + cb;
            }
            _ => break,
        }
    }
    pieces
}

fn decode_pieces(word_stream: &[u8], pieces: &[TextPiece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        if piece.cp_end <= piece.cp_start {
            continue;
        }
        let char_count = (piece.cp_end - piece.cp_start) as usize;
        let byte_count = if piece.unicode {
            char_count * 2
        } else {
            char_count
        };
        let start = piece.file_offset as usize;
        let Some(slice) = word_stream.get(start..start + byte_count) else {
            continue;
        };
        if piece.unicode {
            out.push_str(&utf16le_to_string(slice));
        } else {
            out.push_str(&latin1_to_string(slice));
        }
    }
    out
}

/// Fallback for documents without a usable piece table: decode the
/// `fcMin..fcMac` character range as UTF-16LE.
fn decode_simple_range(word_stream: &[u8], fc_min: u32, fc_mac: u32) -> String {
    let start = fc_min as usize;
    if fc_mac <= fc_min || start >= word_stream.len() {
        return String::new();
    }
    let limit = (fc_mac as usize).min(word_stream.len());
    let mut span = limit - start;
    if span < 4 {
        return String::new();
    }
    if span % 2 != 0 {
        span -= 1;
    }
    utf16le_to_string(&word_stream[start..start + span])
}

/// Adapter for legacy Word binary documents.
pub struct DocAdapter;

impl DocAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for DocAdapter {
    fn extensions(&self) -> &[&str] {
        &[".doc"]
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting doc: {}", path.display());
        let word_stream = read_ole_stream(path, "WordDocument")?;
        let fib = parse_fib(&word_stream)
            .ok_or_else(|| ExtractError::Parse("not a Word binary document".to_string()))?;

        let mut text = String::new();
        if fib.fc_clx != 0 && fib.lcb_clx != 0 {
            let table_name = if fib.use_table1 { "1Table" } else { "0Table" };
            if let Ok(table_stream) = read_ole_stream(path, table_name) {
                let pieces = parse_piece_table(&table_stream, fib.fc_clx, fib.lcb_clx);
                text = decode_pieces(&word_stream, &pieces);
            }
        }
        if text.is_empty() {
            text = decode_simple_range(&word_stream, fib.fc_min, fib.fc_mac);
        }
        Ok(RawContent::LegacyFragments(carriage_return_fragments(&text)))
    }
}

// ============================================================================
// PowerPoint binary (.ppt)
// ============================================================================

const TEXT_CHARS_ATOM: u16 = 0x0FA0;
const TEXT_BYTES_ATOM: u16 = 0x0FA8;
const CSTRING_ATOM: u16 = 0x0FBA;

fn is_text_atom(record_type: u16) -> bool {
    matches!(record_type, TEXT_CHARS_ATOM | TEXT_BYTES_ATOM | CSTRING_ATOM)
}

fn decode_text_atom(record_type: u16, payload: &[u8]) -> Option<String> {
    if payload.is_empty() {
        return None;
    }
    let decoded = match record_type {
        TEXT_CHARS_ATOM | CSTRING_ATOM => utf16le_to_string(payload),
        TEXT_BYTES_ATOM => latin1_to_string(payload),
        _ => return None,
    };
    if decoded.trim().is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Walk PowerPoint records, recursing into containers (recVer 0xF) and
/// collecting text atom payloads in stream order.
fn collect_text_atoms(data: &[u8], offset: usize, length: usize, out: &mut Vec<String>) {
    let end = offset.saturating_add(length).min(data.len());
    let mut pos = offset;
    while pos + 8 <= end {
        let ver_inst = read_u16_le(data, pos).unwrap_or(0);
        let record_type = read_u16_le(data, pos + 2).unwrap_or(0);
        let size = read_u32_le(data, pos + 4).unwrap_or(0) as usize;
        let body_start = pos + 8;
        let body_end = body_start.saturating_add(size);
        if body_end > end {
            break;
        }
        if ver_inst & 0x000F == 0x000F {
            collect_text_atoms(data, body_start, size, out);
        } else if is_text_atom(record_type) {
            if let Some(text) = decode_text_atom(record_type, &data[body_start..body_end]) {
                out.push(text);
            }
        }
        pos = body_end;
    }
}

/// Adapter for legacy PowerPoint binary presentations.
pub struct PptAdapter;

impl PptAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for PptAdapter {
    fn extensions(&self) -> &[&str] {
        &[".ppt"]
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting ppt: {}", path.display());
        let data = read_ole_stream(path, "PowerPoint Document")?;
        let mut atoms = Vec::new();
        collect_text_atoms(&data, 0, data.len(), &mut atoms);

        // Atom text uses carriage returns as line separators; split so the
        // normalizer sees one fragment per line.
        let fragments = atoms
            .iter()
            .flat_map(|atom| carriage_return_fragments(atom))
            .collect();
        Ok(RawContent::LegacyFragments(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
        buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
        buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// A minimal WordDocument stream: FIB magic, empty variable blocks,
    /// UTF-16 text in the simple range.
    fn word_stream_with(text: &str) -> Vec<u8> {
        let encoded: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let mut buf = vec![0u8; 512 + encoded.len()];
        put_u16(&mut buf, 0, 0xA5EC);
        put_u32(&mut buf, 0x18, 512); // fcMin
        put_u32(&mut buf, 0x1C, 512 + encoded.len() as u32); // fcMac
        buf[512..].copy_from_slice(&encoded);
        buf
    }

    #[test]
    fn test_parse_fib_rejects_wrong_magic() {
        let buf = vec![0u8; 512];
        assert!(parse_fib(&buf).is_none());
    }

    #[test]
    fn test_parse_fib_rejects_short_stream() {
        let mut buf = vec![0u8; 64];
        put_u16(&mut buf, 0, 0xA5EC);
        assert!(parse_fib(&buf).is_none());
    }

    #[test]
    fn test_simple_range_roundtrip() {
        let stream = word_stream_with("Hello\rlegacy world");
        let fib = parse_fib(&stream).unwrap();
        assert!(!fib.use_table1);
        assert_eq!(fib.fc_clx, 0);
        let text = decode_simple_range(&stream, fib.fc_min, fib.fc_mac);
        assert_eq!(text, "Hello\rlegacy world");
    }

    #[test]
    fn test_decode_pieces_mixed_encodings() {
        // "Hi" as UTF-16 at 0, "yo" as latin1 at 100
        let mut stream = vec![0u8; 128];
        stream[0..4].copy_from_slice(&[b'H', 0, b'i', 0]);
        stream[100] = b'y';
        stream[101] = b'o';
        let pieces = [
            TextPiece {
                cp_start: 0,
                cp_end: 2,
                file_offset: 0,
                unicode: true,
            },
            TextPiece {
                cp_start: 2,
                cp_end: 4,
                file_offset: 100,
                unicode: false,
            },
        ];
        assert_eq!(decode_pieces(&stream, &pieces), "Hiyo");
    }

    #[test]
    fn test_decode_pieces_skips_out_of_bounds() {
        let stream = vec![0u8; 8];
        let pieces = [TextPiece {
            cp_start: 0,
            cp_end: 100,
            file_offset: 0,
            unicode: true,
        }];
        assert_eq!(decode_pieces(&stream, &pieces), "");
    }

    #[test]
    fn test_carriage_return_fragments_drop_nuls() {
        let fragments = carriage_return_fragments("a\0b\rc");
        assert_eq!(fragments, vec!["ab".to_string(), "c".to_string()]);
    }

    fn ppt_record(ver_inst: u16, record_type: u16, body: &[u8]) -> Vec<u8> {
        let mut rec = Vec::with_capacity(8 + body.len());
        rec.extend_from_slice(&ver_inst.to_le_bytes());
        rec.extend_from_slice(&record_type.to_le_bytes());
        rec.extend_from_slice(&(body.len() as u32).to_le_bytes());
        rec.extend_from_slice(body);
        rec
    }

    #[test]
    fn test_collect_text_atoms_walks_containers() {
        let bytes_atom = ppt_record(0x0000, TEXT_BYTES_ATOM, b"Title\rBody");
        let utf16_payload: Vec<u8> = "Notes".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let chars_atom = ppt_record(0x0000, TEXT_CHARS_ATOM, &utf16_payload);
        let mut inner = bytes_atom;
        inner.extend_from_slice(&chars_atom);
        let container = ppt_record(0x000F, 0x03EE, &inner);

        let mut atoms = Vec::new();
        collect_text_atoms(&container, 0, container.len(), &mut atoms);
        assert_eq!(atoms, vec!["Title\rBody".to_string(), "Notes".to_string()]);
    }

    #[test]
    fn test_collect_text_atoms_ignores_other_records() {
        let noise = ppt_record(0x0000, 0x0400, &[1, 2, 3, 4]);
        let mut atoms = Vec::new();
        collect_text_atoms(&noise, 0, noise.len(), &mut atoms);
        assert!(atoms.is_empty());
    }

    #[test]
    fn test_collect_text_atoms_truncated_record() {
        // declared size larger than the buffer
        let mut rec = ppt_record(0x0000, TEXT_BYTES_ATOM, b"abc");
        rec[4] = 0xFF;
        let mut atoms = Vec::new();
        collect_text_atoms(&rec, 0, rec.len(), &mut atoms);
        assert!(atoms.is_empty());
    }

    #[test]
    fn test_doc_adapter_rejects_non_ole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.doc");
        std::fs::write(&path, b"not an ole container").unwrap();

        let err = DocAdapter::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Container(_)));
    }

    #[test]
    fn test_ppt_adapter_rejects_non_ole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.ppt");
        std::fs::write(&path, b"not an ole container").unwrap();

        let err = PptAdapter::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Container(_)));
    }
}
