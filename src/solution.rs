use num_traits::{NumAssign, PrimInt, Signed};
use std::fmt::{Debug, Display};

/// Marker for signed primitive integers usable as arc costs.
///
/// Dual potentials are derived from costs by subtraction and can go
/// negative even when every input cost is nonnegative, so unsigned
/// scalars are ruled out.
pub trait IntCost: PrimInt + Signed + NumAssign + Display + Debug {}

impl IntCost for i16 {}
impl IntCost for i32 {}
impl IntCost for i64 {}
impl IntCost for isize {}

/// Slot value marking a row or column with no partner.
const NONE: usize = usize::MAX;

/// Mutual-inverse row/column assignment maps.
///
/// Both directions are stored as parallel index vectors with a sentinel for
/// "unassigned", so the invariant `row_to_col[i] == j ⇔ col_to_row[j] == i`
/// stays mechanically checkable instead of hiding behind object references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    row_to_col: Vec<usize>,
    col_to_row: Vec<usize>,
}

impl Assignment {
    pub fn new(size: usize) -> Assignment {
        Assignment {
            row_to_col: vec![NONE; size],
            col_to_row: vec![NONE; size],
        }
    }

    /// Column currently paired with `row`.
    #[inline]
    pub fn column_of(&self, row: usize) -> Option<usize> {
        match self.row_to_col[row] {
            NONE => None,
            col => Some(col),
        }
    }

    /// Row currently owning `col`.
    #[inline]
    pub fn row_of(&self, col: usize) -> Option<usize> {
        match self.col_to_row[col] {
            NONE => None,
            row => Some(row),
        }
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_to_col[row] == col
    }

    /// Pair `row` with `col`, overwriting both directional slots.
    ///
    /// A caller re-pointing a chain of pairings must relink every displaced
    /// partner before the maps are read again; until then the displaced
    /// row's forward slot still names `col`.
    #[inline]
    pub fn link(&mut self, row: usize, col: usize) {
        self.row_to_col[row] = col;
        self.col_to_row[col] = row;
    }

    /// Drop the pairing `row → col` iff it is the active one for `row`.
    ///
    /// Returns whether anything was unlinked.
    pub fn unlink(&mut self, row: usize, col: usize) -> bool {
        if self.row_to_col[row] == col {
            self.row_to_col[row] = NONE;
            self.col_to_row[col] = NONE;
            true
        } else {
            false
        }
    }
}
