//! Fill-handle drag for `Grid`.

use std::ops::ControlFlow;

use super::Grid;
use crate::range::{FillRange, Range};
use crate::types::Coordinate;

impl Grid {
    /// Update the fill strip for a drag of the fill handle to `current`.
    ///
    /// The reference is the primary selection and the axis restriction comes
    /// from the grid's fill mode. A drag that extends nothing clears the strip.
    pub fn start_filling(&self, current: Coordinate) {
        let limit = self.grid_store().state().fill_mode;
        let cells = self.cell_store().state();
        let range = FillRange::new(cells.primary_selection(), Some(current), limit);
        self.cell_store()
            .set_filling((!range.is_empty()).then_some(range));
    }

    pub fn cancel_filling(&self) {
        self.cell_store().set_filling(None);
    }

    /// Repeat the reference pattern across the fill strip, then select the
    /// reference and strip together and end the drag.
    pub fn apply_filling(&self) {
        let Some(range) = self.cell_store().state().filling else {
            return;
        };

        let mut writes = Vec::new();
        range.each_with_source(|target, source| {
            if let (Some(cell), Some(value)) = (self.resolve(target), self.raw_value_at(source)) {
                writes.push((cell, value));
            }
            ControlFlow::Continue(())
        });
        tracing::debug!(cells = writes.len(), "apply fill");
        for ((row_id, field), value) in writes {
            if self.get_raw_value(&row_id, &field).is_some() {
                self.row_store().set_cell_value(&row_id, &field, value, false);
            }
        }

        let covered = range.reference().union(&range);
        if let (Some(start), Some(end)) = (covered.start_coord(), covered.end_coord()) {
            self.select_cells(start, end);
        }
        self.cancel_filling();
    }

    fn raw_value_at(&self, coord: Coordinate) -> Option<serde_json::Value> {
        let (row_id, field) = self.resolve(coord)?;
        self.get_raw_value(&row_id, &field)
    }
}
