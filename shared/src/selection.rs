use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::employee::{Employee, EmployeeId};
use crate::error::ApiResult;

pub const DELETE_ERROR_MESSAGE: &str = "Server respond with error. Try later.";

/// Checked rows of the table plus the state of a running delete batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: BTreeSet<EmployeeId>,
    deleting: bool,
    delete_error: bool,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn selected(&self) -> Vec<EmployeeId> {
        self.selected.iter().copied().collect()
    }

    pub fn is_selected(&self, id: EmployeeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn has_delete_error(&self) -> bool {
        self.delete_error
    }

    /// The delete button only shows up with something selected.
    pub fn can_delete(&self) -> bool {
        !self.selected.is_empty() && !self.deleting
    }

    pub fn toggle(&mut self, id: EmployeeId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = EmployeeId>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn all_selected(&self, employees: &[Employee]) -> bool {
        !employees.is_empty() && employees.iter().all(|e| self.selected.contains(&e.id))
    }

    /// Selects every row, or clears the selection if every row already is.
    pub fn toggle_all(&mut self, employees: &[Employee]) {
        if self.all_selected(employees) {
            self.selected.clear();
        } else {
            self.replace(employees.iter().map(|e| e.id));
        }
    }

    pub fn dismiss_error(&mut self) {
        self.delete_error = false;
    }

    /// Starts a batch and returns the ids to delete, or `None` when there is
    /// nothing selected or a batch is already running.
    pub fn begin_delete(&mut self) -> Option<Vec<EmployeeId>> {
        if !self.can_delete() {
            debug!(
                selected = self.selected.len(),
                deleting = self.deleting,
                "delete not started"
            );
            return None;
        }
        self.deleting = true;
        Some(self.selected())
    }

    /// Settles a batch. Returns the ids to drop from the list when every
    /// deletion succeeded; on any failure nothing is dropped. The selection is
    /// emptied in both cases.
    pub fn finish_delete(
        &mut self,
        ids: Vec<EmployeeId>,
        result: &ApiResult<()>,
    ) -> Option<Vec<EmployeeId>> {
        self.deleting = false;
        self.selected.clear();
        match result {
            Ok(()) => Some(ids),
            Err(err) => {
                warn!(error = %err, count = ids.len(), "deleting employees failed");
                self.delete_error = true;
                None
            }
        }
    }
}
