//! Cursor ring: circular navigation over one category's active item set.
//!
//! The ring holds catalog indices (not items) so the catalog stays the single
//! owner of clothing data. The cursor is a position into the active set, or
//! `None` — the "nothing selected yet" sentinel rendered as a placeholder.

use rand::Rng;

/// Navigation direction for the prev/next arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// Circular cursor over a category's active set.
///
/// Invariant: whenever the cursor is `Some(p)`, `p < active.len()`.
/// Swapping in a new active set always drops the cursor back to the
/// sentinel so a stale position can never leak into the new set.
#[derive(Debug, Clone)]
pub struct CursorRing {
    active: Vec<usize>,
    cursor: Option<usize>,
}

impl CursorRing {
    pub fn new(active: Vec<usize>) -> Self {
        Self { active, cursor: None }
    }

    /// Catalog indices currently eligible for navigation.
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Cursor position into the active set, `None` at the sentinel.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    /// Catalog index under the cursor, `None` at the sentinel.
    pub fn current(&self) -> Option<usize> {
        self.cursor.map(|p| self.active[p])
    }

    /// Step one position around the ring and return the catalog index landed
    /// on. The first step off the sentinel always lands on position 0,
    /// whichever direction was pressed. Returns `None` when the active set
    /// is empty (the caller reports the condition; state is unchanged).
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        if self.active.is_empty() {
            return None;
        }

        let next = match self.cursor {
            None => 0,
            Some(p) => match direction {
                // End and start are connected.
                Direction::Forward => {
                    if p + 1 >= self.active.len() {
                        0
                    } else {
                        p + 1
                    }
                }
                Direction::Back => {
                    if p == 0 {
                        self.active.len() - 1
                    } else {
                        p - 1
                    }
                }
            },
        };

        self.cursor = Some(next);
        Some(self.active[next])
    }

    /// Jump straight to a uniformly random position, bypassing the sentinel
    /// rule. Returns the catalog index landed on, `None` if the set is empty.
    pub fn jump_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.active.is_empty() {
            return None;
        }
        let pos = rng.gen_range(0..self.active.len());
        self.cursor = Some(pos);
        Some(self.active[pos])
    }

    /// Move the cursor to the position of `catalog_index` within the active
    /// set, so ring navigation continues from a manually picked item.
    /// Returns the position, `None` if the item is not in the active set.
    pub fn select(&mut self, catalog_index: usize) -> Option<usize> {
        let pos = self.active.iter().position(|&i| i == catalog_index)?;
        self.cursor = Some(pos);
        Some(pos)
    }

    /// Drop back to the sentinel.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Replace the active set (filter applied or cleared). Resets the cursor.
    pub fn replace_active(&mut self, active: Vec<usize>) {
        self.active = active;
        self.cursor = None;
    }
}
