//! Growing and shrinking matrices by their grey squares.
//!
//! While the cursor is inside a matrix, it carries an extra trailing row and column of empty cells
//! (the grey squares). Typing into them makes them real, and a fresh grey row or column appears
//! behind them.

use alloc::{vec, vec::Vec};

use super::{ConstructKind, NodeId, NodeKind, Tree};
use crate::nav::{Cursor, Side};

impl Tree {
    fn matrix_shape(&self, matrix: NodeId) -> Option<(usize, usize, bool)> {
        match self.construct_kind(matrix)? {
            ConstructKind::Matrix { rows, columns, grey } => Some((rows, columns, grey)),
            _ => None,
        }
    }

    fn set_matrix(&mut self, matrix: NodeId, rows: usize, columns: usize, grey: bool, slots: Vec<NodeId>) {
        for slot in &slots {
            self.set_parent(*slot, matrix);
        }
        self.set_kind(matrix, NodeKind::Construct(ConstructKind::Matrix { rows, columns, grey }, slots));
    }

    fn cells_empty(&self, matrix: NodeId, cells: impl Iterator<Item = usize>) -> bool {
        let slots = self.children(matrix);
        cells.into_iter().all(|i| self.is_placeholder(slots[i]))
    }

    fn row_is_empty(&self, matrix: NodeId, row: usize, columns: usize) -> bool {
        self.cells_empty(matrix, (0..columns).map(|c| row * columns + c))
    }

    fn column_is_empty(&self, matrix: NodeId, column: usize, rows: usize, columns: usize) -> bool {
        self.cells_empty(matrix, (0..rows).map(|r| r * columns + column))
    }

    fn append_matrix_row(&mut self, matrix: NodeId) {
        let Some((rows, columns, grey)) = self.matrix_shape(matrix) else { return };
        let mut slots = self.children(matrix).to_vec();
        for _ in 0..columns {
            slots.push(self.alloc(NodeKind::Placeholder));
        }
        self.set_matrix(matrix, rows + 1, columns, grey, slots);
    }

    fn append_matrix_column(&mut self, matrix: NodeId) {
        let Some((rows, columns, grey)) = self.matrix_shape(matrix) else { return };
        let old = self.children(matrix).to_vec();
        let mut slots = vec![];
        for row in old.chunks(columns) {
            slots.extend_from_slice(row);
            slots.push(self.alloc(NodeKind::Placeholder));
        }
        debug_assert_eq!(old.len(), rows * columns);
        self.set_matrix(matrix, rows, columns + 1, grey, slots);
    }

    /// Adds grey squares to a matrix, or grows it if its grey squares have been filled in. At most
    /// `budget` new nodes are created. If growth would need more, the matrix keeps its shape and
    /// its grey squares become ordinary cells. Returns true if the matrix changed.
    pub fn add_grey_squares(&mut self, matrix: NodeId, budget: usize) -> bool {
        let Some((rows, columns, grey)) = self.matrix_shape(matrix) else { return false };

        if !grey {
            if rows + columns + 1 > budget {
                return false;
            }
            self.append_matrix_column(matrix);
            self.append_matrix_row(matrix);
            if let Some((rows, columns, _)) = self.matrix_shape(matrix) {
                let slots = self.children(matrix).to_vec();
                self.set_matrix(matrix, rows, columns, true, slots);
            }
            return true;
        }

        let grow_row = !self.row_is_empty(matrix, rows - 1, columns);
        let grow_column = !self.column_is_empty(matrix, columns - 1, rows, columns);
        let mut needed = 0;
        if grow_row {
            needed += columns;
        }
        if grow_column {
            needed += rows + usize::from(grow_row);
        }
        if needed == 0 {
            return false;
        }

        // Filled grey squares which cannot be replaced become ordinary cells, so nothing typed
        // into them is hidden
        if needed > budget {
            let slots = self.children(matrix).to_vec();
            self.set_matrix(matrix, rows, columns, false, slots);
            return true;
        }

        if grow_row {
            self.append_matrix_row(matrix);
        }
        if grow_column {
            self.append_matrix_column(matrix);
        }
        true
    }

    /// Removes the grey squares from a matrix. If they are not all empty they are kept as ordinary
    /// cells. A cursor in a removed square moves to the nearest remaining cell. Returns true if the
    /// matrix changed.
    pub fn remove_grey_squares(&mut self, matrix: NodeId, cursor: &mut Cursor) -> bool {
        let Some((rows, columns, grey)) = self.matrix_shape(matrix) else { return false };
        if !grey {
            return false;
        }

        let slots = self.children(matrix).to_vec();
        if rows > 1 && columns > 1
            && self.row_is_empty(matrix, rows - 1, columns)
            && self.column_is_empty(matrix, columns - 1, rows, columns)
        {
            let mut kept = vec![];
            let mut cursor_cell = None;
            for (i, slot) in slots.into_iter().enumerate() {
                let (row, column) = (i / columns, i % columns);
                if row == rows - 1 || column == columns - 1 {
                    if cursor.node == slot {
                        cursor_cell = Some((row.min(rows - 2), column.min(columns - 2)));
                    }
                    self.free(slot);
                } else {
                    kept.push(slot);
                }
            }
            self.set_matrix(matrix, rows - 1, columns - 1, false, kept);

            if let Some((row, column)) = cursor_cell {
                let cell = self.children(matrix)[row * (columns - 1) + column];
                *cursor = self.cursor_at_edge(cell, Side::Right);
            }
        } else {
            self.set_matrix(matrix, rows, columns, false, slots);
        }
        true
    }
}
