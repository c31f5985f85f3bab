use std::fmt;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::alphabet::Alphabet;

use super::header_io::FORMAT_VERSION;

/// Builder identity written into every header.
pub(crate) const BUILDER_ID: &str = concat!(env!("CARGO_PKG_NAME"), "@", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DictType {
    Dawg = 1,
    /// Recognised on read, never produced.
    Gaddag = 2,
}

impl DictType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Dawg),
            2 => Some(Self::Gaddag),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dawg => "DAWG",
            Self::Gaddag => "GADDAG",
        }
    }
}

/// Everything the builder knows about a dictionary.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub root: u32,
    pub nwords: u32,
    pub edges_used: u32,
    pub nodes_used: u32,
    pub edges_saved: u32,
    pub nodes_saved: u32,
    pub name: String,
    pub alphabet: Alphabet,
    pub dict_type: DictType,
}

/// Dictionary metadata. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub(crate) version: u8,
    pub(crate) compress_date: u64,
    pub(crate) user_host: String,
    pub(crate) root: u32,
    pub(crate) nwords: u32,
    pub(crate) edges_used: u32,
    pub(crate) nodes_used: u32,
    pub(crate) edges_saved: u32,
    pub(crate) nodes_saved: u32,
    pub(crate) dict_type: DictType,
    pub(crate) name: String,
    pub(crate) alphabet: Alphabet,
}

impl Header {
    /// Header in the latest format, stamped with the current time.
    pub fn new(info: HeaderInfo) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            version: FORMAT_VERSION,
            compress_date: now.max(0) as u64,
            user_host: BUILDER_ID.to_string(),
            root: info.root,
            nwords: info.nwords,
            edges_used: info.edges_used,
            nodes_used: info.nodes_used,
            edges_saved: info.edges_saved,
            nodes_saved: info.nodes_saved,
            dict_type: info.dict_type,
            name: info.name,
            alphabet: info.alphabet,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Build time, seconds since the Unix epoch.
    pub fn compress_date(&self) -> u64 {
        self.compress_date
    }

    pub fn user_host(&self) -> &str {
        &self.user_host
    }

    /// Index of the synthetic edge pointing at the first letters.
    pub fn root(&self) -> u32 {
        self.root
    }

    pub fn nwords(&self) -> u32 {
        self.nwords
    }

    pub fn edges_used(&self) -> u32 {
        self.edges_used
    }

    pub fn nodes_used(&self) -> u32 {
        self.nodes_used
    }

    pub fn edges_saved(&self) -> u32 {
        self.edges_saved
    }

    pub fn nodes_saved(&self) -> u32 {
        self.nodes_saved
    }

    pub fn dict_type(&self) -> DictType {
        self.dict_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Share of edges removed by suffix sharing, in percent.
    pub fn compression_ratio(&self) -> f64 {
        let total = self.edges_used as f64 + self.edges_saved as f64;
        if total == 0.0 {
            return 0.0;
        }
        100.0 * self.edges_saved as f64 / total
    }

    fn date_string(&self) -> String {
        let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
        i64::try_from(self.compress_date)
            .ok()
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
            .and_then(|dt| dt.format(fmt).ok())
            .unwrap_or_else(|| self.compress_date.to_string())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.alphabet.letters().iter().collect();
        writeln!(f, "dictionary name: {}", self.name)?;
        writeln!(f, "format version: {}", self.version)?;
        writeln!(f, "compressed on: {}", self.date_string())?;
        writeln!(f, "compressed using a binary compiled by: {}", self.user_host)?;
        writeln!(f, "dictionary type: {}", self.dict_type.name())?;
        writeln!(f, "letters: {letters}")?;
        writeln!(f, "number of letters: {}", self.alphabet.len())?;
        writeln!(f, "number of words: {}", self.nwords)?;
        writeln!(f, "header size: {} bytes", self.encoded_len())?;
        writeln!(f, "root: {} (edge)", self.root)?;
        writeln!(f, "nodes: {} used + {} saved", self.nodes_used, self.nodes_saved)?;
        writeln!(f, "edges: {} used + {} saved", self.edges_used, self.edges_saved)?;
        writeln!(f, "===============================================")?;
        writeln!(f, "letter | points | frequency | vowel | consonant | display")?;
        writeln!(f, "-------+--------+-----------+-------+-----------+--------")?;
        for code in self.alphabet.codes() {
            let ch = self.alphabet.char_of(code).map_err(|_| fmt::Error)?;
            let points = self.alphabet.points(code).map_err(|_| fmt::Error)?;
            let freq = self.alphabet.frequency(code).map_err(|_| fmt::Error)?;
            let forms = self.alphabet.inputs(code).map_err(|_| fmt::Error)?;
            writeln!(
                f,
                "  {ch:<4} |   {points:2}   |    {freq:2}     |   {}   |     {}     | {}",
                u8::from(self.alphabet.is_vowel(code)),
                u8::from(self.alphabet.is_consonant(code)),
                forms.join(" "),
            )?;
        }
        write!(f, "===============================================")
    }
}
