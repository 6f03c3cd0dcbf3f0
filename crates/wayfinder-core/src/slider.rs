use crate::error::{Result, WizardError};

/// Wraparound cursor over a fixed deck of cards.
///
/// Unlike the journey controller, moving past either end wraps to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlider {
    current: usize,
    len: usize,
}

impl CardSlider {
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(WizardError::EmptyCatalog);
        }
        Ok(Self { current: 0, len })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    pub fn go_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(WizardError::OutOfRange {
                index,
                step_count: self.len,
            });
        }
        self.current = index;
        Ok(self.current)
    }
}
