/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Pack births and survivals. If bit `i` in `b` is on, `i` neighbors cause a birth. Any bit
    /// past the 8th is ignored.
    const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// The state of a cell in the next generation, given whether it is alive now and how many of
    /// its 8 neighbors are alive.
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        debug_assert!(neighbors <= 8, "a cell has at most 8 neighbors");

        let n = 1u16 << neighbors;
        let set = if alive {
            self.survivals()
        } else {
            self.births()
        };

        set & n == n
    }
}

#[cfg(test)]
mod tests {
    use super::B3S23;

    #[test]
    fn b3s23_masks() {
        assert_eq!(B3S23.births(), 0b0_0000_1000);
        assert_eq!(B3S23.survivals(), 0b0_0000_1100);
    }

    #[test]
    fn live_cells() {
        let want = [false, false, true, true, false, false, false, false, false];

        for (n, &alive) in want.iter().enumerate() {
            assert_eq!(B3S23.next(true, n as u8), alive, "live cell with {n} neighbors");
        }
    }

    #[test]
    fn dead_cells() {
        for n in 0..=8u8 {
            assert_eq!(B3S23.next(false, n), n == 3, "dead cell with {n} neighbors");
        }
    }
}
