use std::fmt;

/// 1-based line and column of the first character of a construct.
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SrcLoc {
  pub line: u32,
  pub col: u32,
}

impl SrcLoc {
  pub const fn new(line: u32, col: u32) -> Self {
    SrcLoc { line, col }
  }

  pub const fn start() -> Self {
    SrcLoc { line: 1, col: 1 }
  }

  /// Location of the byte at `offset`, counted from the start of `src`.
  pub fn of_offset(src: &[u8], offset: usize) -> Self {
    let prefix = &src[..offset.min(src.len())];
    let line_start = prefix.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
    let line = prefix.iter().filter(|b| **b == b'\n').count() as u32 + 1;
    let col = String::from_utf8_lossy(&prefix[line_start..]).chars().count() as u32 + 1;
    SrcLoc { line, col }
  }
}

impl Default for SrcLoc {
  fn default() -> Self {
    Self::start()
  }
}

impl fmt::Display for SrcLoc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.col)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn offsets_to_line_and_col() {
    let src = "ab\ncd\n\u{e9}x".as_bytes();
    assert_eq!(SrcLoc::of_offset(src, 0), SrcLoc::new(1, 1));
    assert_eq!(SrcLoc::of_offset(src, 4), SrcLoc::new(2, 2));
    assert_eq!(SrcLoc::of_offset(src, 6), SrcLoc::new(3, 1));
    // the accented char is two bytes but one column
    assert_eq!(SrcLoc::of_offset(src, 8), SrcLoc::new(3, 2));
    assert_eq!(SrcLoc::new(3, 7).to_string(), "3:7");
  }
}
