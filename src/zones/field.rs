//! The shared play area.
//!
//! A `Field` is a fixed number of slots, each empty or holding exactly one
//! `CardInstance`. Slot indices never change during a duel. The field is split
//! into two rows of equal width: the first row belongs to the first player,
//! the second row to the second. Slot `i` of one row faces slot `i` of the
//! other.

use im::Vector;
use thiserror::Error;

use crate::cards::CardInstance;
use crate::core::player::PlayerId;

/// One position on the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub index: usize,
    pub occupant: Option<CardInstance>,
}

impl FieldSlot {
    #[must_use]
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            occupant: None,
        }
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Why a card could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("slot {index} does not exist (field has {len} slots)")]
    OutOfRange { index: usize, len: usize },
    #[error("slot {0} is already occupied")]
    Occupied(usize),
}

/// Fixed-size ordered sequence of slots.
///
/// ```
/// use duel_console::zones::Field;
///
/// let field = Field::new(10);
/// assert_eq!(field.len(), 10);
/// assert_eq!(field.row_width(), 5);
/// assert_eq!(field.facing(1), Some(6));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    slots: Vector<FieldSlot>,
}

impl Field {
    /// Create a field of `size` empty slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(FieldSlot::empty).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Width of one player's row.
    #[must_use]
    pub fn row_width(&self) -> usize {
        self.slots.len() / 2
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&FieldSlot> {
        self.slots.get(index)
    }

    /// Card in `index`, if any.
    #[must_use]
    pub fn occupant(&self, index: usize) -> Option<&CardInstance> {
        self.slots.get(index).and_then(|s| s.occupant.as_ref())
    }

    pub fn occupant_mut(&mut self, index: usize) -> Option<&mut CardInstance> {
        self.slots.get_mut(index).and_then(|s| s.occupant.as_mut())
    }

    /// Put `card` into an empty slot.
    pub fn place(&mut self, index: usize, card: CardInstance) -> Result<(), PlacementError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(PlacementError::OutOfRange { index, len })?;
        if slot.is_occupied() {
            return Err(PlacementError::Occupied(index));
        }
        slot.occupant = Some(card);
        Ok(())
    }

    /// Remove and return the occupant of `index`.
    pub fn take(&mut self, index: usize) -> Option<CardInstance> {
        self.slots.get_mut(index).and_then(|s| s.occupant.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSlot> {
        self.slots.iter()
    }

    /// Occupied slots, in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.slots
            .iter()
            .filter_map(|s| s.occupant.as_ref().map(|c| (s.index, c)))
    }

    /// Player whose row contains `index`.
    ///
    /// Slots past an odd field's last full row belong to nobody.
    #[must_use]
    pub fn row_owner(&self, index: usize) -> Option<PlayerId> {
        let width = self.row_width();
        if width == 0 || index >= width * 2 {
            None
        } else {
            Some(PlayerId::new((index / width) as u8))
        }
    }

    /// Slot across from `index` in the other row.
    #[must_use]
    pub fn facing(&self, index: usize) -> Option<usize> {
        let width = self.row_width();
        match self.row_owner(index)?.index() {
            0 => Some(index + width),
            _ => Some(index - width),
        }
    }

    /// Slot indices of `player`'s row.
    #[must_use]
    pub fn row(&self, player: PlayerId) -> std::ops::Range<usize> {
        let width = self.row_width();
        let start = (player.index() * width).min(width * 2);
        start..(start + width).min(width * 2)
    }
}
