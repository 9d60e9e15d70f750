use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::employee::{next_id, Employee, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Everything that may change the employee list. The list itself only moves on
/// the `*Succeeded` actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    LoadSucceeded(Vec<Employee>),
    LoadFailed,
    CreateSucceeded(Employee),
    CreateFailed,
    DeleteSucceeded(Vec<EmployeeId>),
    DeleteFailed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeStore {
    employees: Option<Vec<Employee>>,
    is_loading: bool,
    is_error: bool,
}

impl EmployeeStore {
    pub fn new() -> Self {
        EmployeeStore::default()
    }

    pub fn employees(&self) -> Option<&[Employee]> {
        self.employees.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.employees.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// The loading indicator replaces the content while a load is running.
    pub fn show_loading(&self) -> bool {
        self.is_loading
    }

    /// The load error banner sits on top of whatever else is rendered.
    pub fn show_error_banner(&self) -> bool {
        self.is_error
    }

    pub fn phase(&self) -> LoadPhase {
        if self.is_loading {
            LoadPhase::Loading
        } else if self.is_error {
            LoadPhase::Failed
        } else if self.employees.is_some() {
            LoadPhase::Loaded
        } else {
            LoadPhase::Idle
        }
    }

    /// Id the next created record gets, or `None` while nothing is loaded.
    pub fn next_id(&self) -> Option<EmployeeId> {
        self.employees.as_deref().map(next_id)
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, "applying action");
        match action {
            Action::LoadStarted => {
                self.is_loading = true;
            }
            Action::LoadSucceeded(employees) => {
                self.employees = Some(employees);
                self.is_loading = false;
            }
            Action::LoadFailed => {
                warn!("employee list could not be loaded");
                self.is_error = true;
                self.is_loading = false;
            }
            Action::CreateSucceeded(employee) => match &mut self.employees {
                Some(employees) => employees.push(employee),
                None => warn!(id = employee.id, "created employee before the list was loaded"),
            },
            Action::DeleteSucceeded(ids) => {
                let ids: BTreeSet<EmployeeId> = ids.into_iter().collect();
                if let Some(employees) = &mut self.employees {
                    employees.retain(|employee| !ids.contains(&employee.id));
                }
            }
            Action::CreateFailed | Action::DeleteFailed => {}
        }
    }
}
