pub mod api;
pub mod config;
pub mod directory;
pub mod employee;
pub mod employees;
pub mod error;
pub mod form;
pub mod http;
pub mod selection;
pub mod store;

pub use api::RemoteClient;
pub use config::ApiConfig;
pub use directory::Directory;
pub use employee::{Employee, EmployeeId, EmployeePatch};
pub use error::{ApiError, ApiResult};
pub use form::{EmployeeForm, Field, FormMessage, SubmitOutcome};
pub use http::{HttpRequest, HttpResponse, Method, Transport};
#[cfg(any(test, feature = "testing"))]
pub use http::MemoryTransport;
pub use selection::Selection;
pub use store::{Action, EmployeeStore, LoadPhase};
