//! Cell address type

use crate::error::{Error, Result};
use crate::MAX_COLS;
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "B5")
///
/// Columns are a single letter `A`-`Z`; rows are 1-based in display and
/// 0-based internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B5").unwrap();
    /// assert_eq!(addr.row, 4);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut chars = s.chars();

        let col = match chars.next() {
            Some(c) if c.is_ascii_uppercase() => Self::letter_to_column(c)?,
            Some(c) => {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}' in '{}'",
                    c, s
                )))
            }
            None => return Err(Error::InvalidAddress("empty address".into())),
        };

        let row_str = chars.as_str();
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in display, we use 0-based internally
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to its letter (0 = A, 25 = Z)
    pub fn column_to_letter(col: u16) -> Result<char> {
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok((b'A' + col as u8) as char)
    }

    /// Convert a column letter to its index (A = 0, Z = 25)
    pub fn letter_to_column(letter: char) -> Result<u16> {
        if !letter.is_ascii_uppercase() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                letter
            )));
        }
        Ok((letter as u8 - b'A') as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::column_to_letter(self.col) {
            Ok(letter) => write!(f, "{}{}", letter, self.row as u64 + 1),
            // No letter past Z; R1C1 form cannot be mistaken for a cell name
            Err(_) => write!(f, "R{}C{}", self.row as u64 + 1, self.col as u32 + 1),
        }
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_to_letter() {
        assert_eq!(CellAddress::column_to_letter(0).unwrap(), 'A');
        assert_eq!(CellAddress::column_to_letter(1).unwrap(), 'B');
        assert_eq!(CellAddress::column_to_letter(25).unwrap(), 'Z');
        assert!(CellAddress::column_to_letter(26).is_err());
    }

    #[test]
    fn test_letter_to_column() {
        assert_eq!(CellAddress::letter_to_column('A').unwrap(), 0);
        assert_eq!(CellAddress::letter_to_column('Z').unwrap(), 25);
        assert!(CellAddress::letter_to_column('a').is_err());
        assert!(CellAddress::letter_to_column('1').is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr, CellAddress::new(0, 0));

        let addr = CellAddress::parse("B5").unwrap();
        assert_eq!(addr, CellAddress::new(4, 1));

        let addr = CellAddress::parse("Z99").unwrap();
        assert_eq!(addr, CellAddress::new(98, 25));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err()); // Row 0 is invalid
        assert!(CellAddress::parse("a1").is_err()); // Lowercase column
        assert!(CellAddress::parse("AA1").is_err()); // Single letter columns only
        assert!(CellAddress::parse("A1+B1").is_err());
        assert!(CellAddress::parse("A-1").is_err());
        assert!(CellAddress::parse("A99999999999").is_err()); // Row overflows
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(4, 1).to_string(), "B5");
        assert_eq!(CellAddress::new(99, 2).to_a1_string(), "C100");
    }

    #[test]
    fn test_display_past_last_column() {
        assert_eq!(CellAddress::new(0, 26).to_string(), "R1C27");
        assert_ne!(CellAddress::new(0, 26).to_string(), CellAddress::new(0, 0).to_string());
        assert!(CellAddress::parse(&CellAddress::new(4, 30).to_string()).is_err());
    }
}
