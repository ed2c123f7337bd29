//! DNA sequences as annealable values.

use crate::error::{ParamError, ParamResult};
use std::fmt;
use std::str::FromStr;

/// A nucleotide. `N` is an ambiguous base; it is never produced by
/// randomization but may appear in sequences read from input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
    N = 4,
}

impl Base {
    /// The four concrete bases, indexed by their numeric code.
    pub const ACGT: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Base::A),
            1 => Some(Base::C),
            2 => Some(Base::G),
            3 => Some(Base::T),
            4 => Some(Base::N),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::N => 'N',
        }
    }
}

impl TryFrom<char> for Base {
    type Error = ParamError;

    fn try_from(c: char) -> ParamResult<Self> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            'N' => Ok(Base::N),
            _ => Err(ParamError::InvalidBase(c)),
        }
    }
}

/// An ordered run of bases. Length may differ between instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    bases: Vec<Base>,
}

impl Sequence {
    pub fn new(bases: Vec<Base>) -> Self {
        Self { bases }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn bases_mut(&mut self) -> &mut [Base] {
        &mut self.bases
    }

    /// Checkpoint footprint: a 4-byte length prefix plus one byte per base.
    pub fn byte_size(&self) -> usize {
        4 + self.bases.len()
    }

    /// Write the checkpoint form into `buf`, returning the bytes used.
    pub fn encode_into(&self, buf: &mut [u8]) -> ParamResult<usize> {
        let needed = self.byte_size();
        if buf.len() < needed {
            return Err(ParamError::BufferTooShort {
                needed,
                available: buf.len(),
            });
        }
        buf[..4].copy_from_slice(&(self.bases.len() as u32).to_le_bytes());
        for (slot, base) in buf[4..needed].iter_mut().zip(&self.bases) {
            *slot = *base as u8;
        }
        Ok(needed)
    }

    /// Read a checkpoint written by [`Sequence::encode_into`].
    pub fn decode_from(buf: &[u8]) -> ParamResult<(Self, usize)> {
        if buf.len() < 4 {
            return Err(ParamError::BufferTooShort {
                needed: 4,
                available: buf.len(),
            });
        }
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&buf[..4]);
        let len = u32::from_le_bytes(prefix) as usize;
        let needed = 4 + len;
        if buf.len() < needed {
            return Err(ParamError::BufferTooShort {
                needed,
                available: buf.len(),
            });
        }
        let bases = buf[4..needed]
            .iter()
            .map(|&b| Base::from_index(b).ok_or(ParamError::InvalidBase(char::from(b))))
            .collect::<ParamResult<Vec<_>>>()?;
        Ok((Self { bases }, needed))
    }
}

impl FromStr for Sequence {
    type Err = ParamError;

    fn from_str(s: &str) -> ParamResult<Self> {
        let bases = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Base::try_from)
            .collect::<ParamResult<Vec<_>>>()?;
        Ok(Self { bases })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            write!(f, "{}", base.symbol())?;
        }
        Ok(())
    }
}
