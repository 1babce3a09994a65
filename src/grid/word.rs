use crate::{foundation::rng::Rng64, grid::cells::Bit};

/// Cadence of the hero logo's bit flicker.
pub const WORD_UPDATE_MS: u64 = 180;
/// Per-bit toggle chance on each flicker update.
pub const WORD_TOGGLE_PROBABILITY: f64 = 0.1;

/// Text spelled as 8-bit groups whose bits flicker over time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryWord {
    groups: Vec<[Bit; 8]>,
}

impl BinaryWord {
    /// Encode each byte of `text` as one group, most significant bit first.
    pub fn encode(text: &str) -> Self {
        let groups = text
            .bytes()
            .map(|b| {
                let mut g = [Bit::Zero; 8];
                for (i, bit) in g.iter_mut().enumerate() {
                    if (b >> (7 - i)) & 1 == 1 {
                        *bit = Bit::One;
                    }
                }
                g
            })
            .collect();
        Self { groups }
    }

    /// Invert each bit independently with probability `probability`. Returns how many flipped.
    pub fn toggle(&mut self, probability: f64, rng: &mut Rng64) -> usize {
        let mut flipped = 0;
        for bit in self.groups.iter_mut().flatten() {
            if rng.chance(probability) {
                *bit = bit.flipped();
                flipped += 1;
            }
        }
        flipped
    }

    /// Number of 8-bit groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True for an empty word.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl std::fmt::Display for BinaryWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for bit in group {
                write!(f, "{}", bit.as_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/word.rs"]
mod tests;
