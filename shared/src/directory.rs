//! Application state: the employee list with the form and the table
//! selection that feed it. Each operation comes in two halves, a `begin`
//! half that decides what request to send and a `finish` half that applies
//! the settled result, so the UI can run the request in between on its own
//! executor. The `run_*` helpers do all three steps in one call.

use tracing::{info, warn};

use crate::api::RemoteClient;
use crate::employee::{Employee, EmployeeId};
use crate::employees;
use crate::error::ApiResult;
use crate::form::{EmployeeForm, SubmitOutcome};
use crate::http::Transport;
use crate::selection::Selection;
use crate::store::{Action, EmployeeStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    pub store: EmployeeStore,
    pub form: EmployeeForm,
    pub selection: Selection,
}

impl Directory {
    pub fn new() -> Self {
        Directory::default()
    }

    pub fn begin_load(&mut self) {
        self.store.apply(Action::LoadStarted);
    }

    pub fn finish_load(&mut self, result: ApiResult<Vec<Employee>>) {
        match result {
            Ok(employees) => self.store.apply(Action::LoadSucceeded(employees)),
            Err(err) => {
                warn!(error = %err, "loading employees failed");
                self.store.apply(Action::LoadFailed);
            }
        }
    }

    pub fn begin_submit(&mut self) -> SubmitOutcome {
        self.form.submit(self.store.employees())
    }

    pub fn finish_submit(&mut self, employee: Employee, result: ApiResult<()>) {
        self.form.finish_submit(&result);
        match result {
            Ok(()) => self.store.apply(Action::CreateSucceeded(employee)),
            Err(_) => self.store.apply(Action::CreateFailed),
        }
    }

    pub fn begin_delete(&mut self) -> Option<Vec<EmployeeId>> {
        self.selection.begin_delete()
    }

    pub fn finish_delete(&mut self, ids: Vec<EmployeeId>, result: ApiResult<()>) {
        match self.selection.finish_delete(ids, &result) {
            Some(removed) => {
                info!(count = removed.len(), "removing deleted employees");
                self.store.apply(Action::DeleteSucceeded(removed));
            }
            None => self.store.apply(Action::DeleteFailed),
        }
    }

    pub async fn run_load<T: Transport>(&mut self, client: &RemoteClient<T>) {
        self.begin_load();
        let result = employees::fetch_employees(client).await;
        self.finish_load(result);
    }

    pub async fn run_submit<T: Transport>(&mut self, client: &RemoteClient<T>) -> SubmitOutcome {
        let outcome = self.begin_submit();
        if let SubmitOutcome::Dispatch(employee) = &outcome {
            let result = employees::create_employee(client, employee).await;
            self.finish_submit(employee.clone(), result);
        }
        outcome
    }

    /// Returns `true` when a batch was sent, whatever its result.
    pub async fn run_delete<T: Transport>(&mut self, client: &RemoteClient<T>) -> bool {
        let ids = match self.begin_delete() {
            Some(ids) => ids,
            None => return false,
        };
        let result = employees::delete_employees(client, &ids).await;
        self.finish_delete(ids, result);
        true
    }
}
