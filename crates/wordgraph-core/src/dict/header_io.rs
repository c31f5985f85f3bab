//! Binary header layout.
//!
//! All multi-byte integers are big-endian.
//!
//! ```text
//! legacy block (48 bytes)
//!   0  ident[22]   "_COMPILED_DICTIONARY_\0"
//!  22  version     u8
//!  23  reserved    u8
//!  24  root, nwords, edges_used, nodes_used, nodes_saved, edges_saved (u32 each)
//! v1 block (312 bytes)
//!   0  compress_date u64
//!   8  user_host[32] + u32 used length
//!  44  algorithm u8, reserved u8
//!  46  name[30] + u32 used length
//!  80  letters[80] (UTF-8) + u32 used length + u32 letter count
//! 168  points[64], frequency[64]
//! 296  vowels u64, consonants u64 (bit code-1)
//! v2 block
//!   0  u16 length + UTF-8 "<char>|<DISPLAY>|<INPUT>... <char>|..."
//! ```

use std::io::{self, Read, Write};

use crate::alphabet::{Alphabet, LetterDef, MAX_LETTERS};

use super::header::{DictType, Header};
use super::DictError;

pub const MAGIC: &[u8; 22] = b"_COMPILED_DICTIONARY_\0";
pub const FORMAT_VERSION: u8 = 2;

pub(crate) const LEGACY_SIZE: usize = 48;
pub(crate) const V1_SIZE: usize = 312;

const MAX_USER_HOST: usize = 32;
const MAX_NAME: usize = 30;
const MAX_LETTERS_SIZE: usize = 80;

/// Bounds-checked big-endian reads over a byte slice.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DictError> {
        let end = self.pos.checked_add(n).ok_or(DictError::InvalidHeader)?;
        let bytes = self.data.get(self.pos..end).ok_or(DictError::InvalidHeader)?;
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DictError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DictError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DictError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, DictError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, DictError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    /// Fixed-size UTF-8 buffer followed by its used length.
    fn fixed_str(&mut self, size: usize, field: &'static str) -> Result<String, DictError> {
        let buf = self.take(size)?;
        let len = self.u32()? as usize;
        let bytes = buf
            .get(..len)
            .ok_or_else(|| DictError::Inconsistent(format!("{field} length {len} exceeds {size}")))?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| DictError::InvalidUtf8 { field })
    }
}

fn put_fixed_str(
    buf: &mut Vec<u8>,
    value: &str,
    size: usize,
    field: &'static str,
) -> Result<(), DictError> {
    let bytes = value.as_bytes();
    if bytes.len() > size {
        return Err(DictError::FieldTooLong { field, max: size });
    }
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + size - bytes.len(), 0);
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    Ok(())
}

impl Header {
    /// Size of this header once written (always the latest format).
    pub fn encoded_len(&self) -> usize {
        LEGACY_SIZE + V1_SIZE + 2 + self.display_input_blob().len()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let blob = self.display_input_blob();
        let blob_len: u16 = blob.len().try_into().map_err(|_| DictError::FieldTooLong {
            field: "display and input data",
            max: u16::MAX as usize,
        })?;

        let mut buf = Vec::with_capacity(LEGACY_SIZE + V1_SIZE + 2 + blob.len());
        buf.extend_from_slice(MAGIC);
        buf.push(FORMAT_VERSION);
        buf.push(0); // reserved
        for field in [
            self.root,
            self.nwords,
            self.edges_used,
            self.nodes_used,
            self.nodes_saved,
            self.edges_saved,
        ] {
            buf.extend_from_slice(&field.to_be_bytes());
        }

        buf.extend_from_slice(&self.compress_date.to_be_bytes());
        put_fixed_str(&mut buf, &self.user_host, MAX_USER_HOST, "user and host information")?;
        buf.push(self.dict_type as u8);
        buf.push(0); // reserved
        put_fixed_str(&mut buf, &self.name, MAX_NAME, "dictionary name")?;
        let letters: String = self.alphabet.letters().iter().collect();
        put_fixed_str(&mut buf, &letters, MAX_LETTERS_SIZE, "dictionary letters")?;
        buf.extend_from_slice(&(self.alphabet.len() as u32).to_be_bytes());

        let mut points = [0u8; MAX_LETTERS + 1];
        let mut frequency = [0u8; MAX_LETTERS + 1];
        for code in self.alphabet.codes() {
            let i = code as usize - 1;
            points[i] = self.alphabet.points(code)?;
            frequency[i] = self.alphabet.frequency(code)?;
        }
        buf.extend_from_slice(&points);
        buf.extend_from_slice(&frequency);
        buf.extend_from_slice(&self.alphabet.vowel_mask().to_be_bytes());
        buf.extend_from_slice(&self.alphabet.consonant_mask().to_be_bytes());
        debug_assert_eq!(buf.len(), LEGACY_SIZE + V1_SIZE);

        buf.extend_from_slice(&blob_len.to_be_bytes());
        buf.extend_from_slice(blob.as_bytes());
        Ok(buf)
    }

    /// Decode a header, returning it with the number of bytes consumed.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), DictError> {
        let mut cur = Cursor::new(data);
        let ident: [u8; 22] = cur.array()?;
        if &ident != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        let version = cur.u8()?;
        if version == 0 {
            return Err(DictError::ObsoleteVersion);
        }
        if version > FORMAT_VERSION {
            return Err(DictError::UnsupportedVersion(version));
        }
        cur.u8()?; // reserved
        let root = cur.u32()?;
        let nwords = cur.u32()?;
        let edges_used = cur.u32()?;
        let nodes_used = cur.u32()?;
        let nodes_saved = cur.u32()?;
        let edges_saved = cur.u32()?;

        let compress_date = cur.u64()?;
        let user_host = cur.fixed_str(MAX_USER_HOST, "user and host information")?;
        let algorithm = cur.u8()?;
        let dict_type = DictType::from_tag(algorithm).ok_or(DictError::UnknownAlgorithm(algorithm))?;
        cur.u8()?; // reserved
        let name = cur.fixed_str(MAX_NAME, "dictionary name")?;
        let letters: Vec<char> = cur
            .fixed_str(MAX_LETTERS_SIZE, "dictionary letters")?
            .chars()
            .collect();
        let nb_letters = cur.u32()? as usize;
        if letters.len() != nb_letters {
            return Err(DictError::Inconsistent(format!(
                "{} letters declared, {} found",
                nb_letters,
                letters.len()
            )));
        }
        if nb_letters > MAX_LETTERS {
            return Err(DictError::Inconsistent(format!("{nb_letters} letters")));
        }
        let points: [u8; MAX_LETTERS + 1] = cur.array()?;
        let frequency: [u8; MAX_LETTERS + 1] = cur.array()?;
        let vowels = cur.u64()?;
        let consonants = cur.u64()?;

        let mut defs: Vec<LetterDef> = letters
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                LetterDef::new(
                    ch,
                    points[i],
                    frequency[i],
                    vowels & (1u64 << i) != 0,
                    consonants & (1u64 << i) != 0,
                )
            })
            .collect();

        if version >= 2 {
            let len = cur.u16()? as usize;
            let blob = std::str::from_utf8(cur.take(len)?).map_err(|_| DictError::InvalidUtf8 {
                field: "display and input data",
            })?;
            apply_display_input_blob(blob, &mut defs)?;
        }

        let header = Header {
            version,
            compress_date,
            user_host,
            root,
            nwords,
            edges_used,
            nodes_used,
            edges_saved,
            nodes_saved,
            dict_type,
            name,
            alphabet: Alphabet::new(defs)?,
        };
        Ok((header, cur.pos))
    }

    /// Read a header from a stream, leaving it positioned on the first edge.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, DictError> {
        let mut buf = vec![0u8; LEGACY_SIZE + V1_SIZE];
        read_block(reader, &mut buf)?;
        if buf[..MAGIC.len()] == MAGIC[..] && buf[MAGIC.len()] >= 2 {
            let mut len = [0u8; 2];
            read_block(reader, &mut len)?;
            let blob_len = u16::from_be_bytes(len) as usize;
            buf.extend_from_slice(&len);
            let start = buf.len();
            buf.resize(start + blob_len, 0);
            read_block(reader, &mut buf[start..])?;
        }
        Self::from_bytes(&buf).map(|(header, _)| header)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DictError> {
        writer.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    /// Serialized display/input overrides, one token per letter that has any.
    pub(crate) fn display_input_blob(&self) -> String {
        let defs = self.alphabet.defs();
        let tokens: Vec<String> = defs
            .iter()
            .filter(|def| !def.inputs.is_empty())
            .map(|def| {
                let mut token = String::new();
                token.push(def.ch);
                for form in &def.inputs {
                    token.push('|');
                    token.push_str(form);
                }
                token
            })
            .collect();
        tokens.join(" ")
    }
}

fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), DictError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DictError::InvalidHeader,
        _ => DictError::Io(e),
    })
}

fn apply_display_input_blob(blob: &str, defs: &mut [LetterDef]) -> Result<(), DictError> {
    for token in blob.split(' ').filter(|t| !t.is_empty()) {
        let mut fields = token.split('|');
        let mut letter = fields.next().unwrap_or_default().chars();
        let ch = match (letter.next(), letter.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(DictError::Inconsistent(format!(
                    "bad display/input token '{token}'"
                )))
            }
        };
        let forms: Vec<String> = fields.map(str::to_string).collect();
        if forms.is_empty() || forms.iter().any(String::is_empty) {
            return Err(DictError::Inconsistent(format!(
                "bad display/input token '{token}'"
            )));
        }
        let def = defs
            .iter_mut()
            .find(|d| d.ch == ch)
            .ok_or_else(|| DictError::Inconsistent(format!("display data for unknown letter '{ch}'")))?;
        def.inputs = forms;
    }
    Ok(())
}
