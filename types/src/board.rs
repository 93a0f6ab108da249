use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

use super::MAX_BOARD_SIZE;

/// Category of a board cell, determining its score rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellKind {
    /// Fixed low score.
    FixedLow = 0,
    /// Fixed high score.
    FixedHigh = 1,
    /// Pseudorandom score within configured (or fallback) bounds.
    Variable = 2,
}

impl Write for CellKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for CellKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::FixedLow),
            1 => Ok(Self::FixedHigh),
            2 => Ok(Self::Variable),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for CellKind {
    const SIZE: usize = 1;
}

/// Ordered, fixed-size sequence of cells; its length is the movement modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<CellKind>,
}

impl Board {
    /// Build a board from an explicit layout. The layout must not be empty.
    pub fn new(cells: Vec<CellKind>) -> Option<Self> {
        if cells.is_empty() || cells.len() > MAX_BOARD_SIZE {
            return None;
        }
        Some(Self { cells })
    }

    /// Number of cells (movement modulus).
    pub fn size(&self) -> u32 {
        self.cells.len() as u32
    }

    /// Cell at `position`. Callers must pass a valid index.
    pub fn cell(&self, position: u32) -> CellKind {
        self.cells[position as usize]
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }
}

impl Default for Board {
    /// The standard 18-cell layout.
    fn default() -> Self {
        use CellKind::{FixedHigh as H, FixedLow as L, Variable as V};
        Self {
            cells: vec![
                L, L, H, L, V, H, L, L, H, V, L, H, L, L, V, H, L, H,
            ],
        }
    }
}

impl Write for Board {
    fn write(&self, writer: &mut impl BufMut) {
        (self.cells.len() as u32).write(writer);
        for cell in &self.cells {
            cell.write(writer);
        }
    }
}

impl Read for Board {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let len = u32::read(reader)? as usize;
        if len == 0 || len > MAX_BOARD_SIZE {
            return Err(Error::Invalid("Board", "size out of range"));
        }
        let mut cells = Vec::with_capacity(len);
        for _ in 0..len {
            cells.push(CellKind::read(reader)?);
        }
        Ok(Self { cells })
    }
}

impl EncodeSize for Board {
    fn encode_size(&self) -> usize {
        u32::SIZE + self.cells.len() * CellKind::SIZE
    }
}
