use futures::future::try_join_all;
use serde::de::IgnoredAny;
use tracing::info;

use crate::api::RemoteClient;
use crate::employee::{Employee, EmployeeId, EmployeePatch};
use crate::error::ApiResult;
use crate::http::Transport;

pub const EMPLOYEES_PATH: &str = "/employees";

pub fn employee_path(id: EmployeeId) -> String {
    format!("{}/{}", EMPLOYEES_PATH, id)
}

pub async fn fetch_employees<T: Transport>(client: &RemoteClient<T>) -> ApiResult<Vec<Employee>> {
    let employees: Vec<Employee> = client.get(EMPLOYEES_PATH).await?;
    info!(count = employees.len(), "employees loaded");
    Ok(employees)
}

/// Whatever the server answers is discarded; callers keep the record they
/// built themselves.
pub async fn create_employee<T: Transport>(
    client: &RemoteClient<T>,
    employee: &Employee,
) -> ApiResult<()> {
    let _: IgnoredAny = client.post(EMPLOYEES_PATH, employee).await?;
    info!(id = employee.id, "employee created");
    Ok(())
}

pub async fn update_employee<T: Transport>(
    client: &RemoteClient<T>,
    id: EmployeeId,
    patch: &EmployeePatch,
) -> ApiResult<serde_json::Value> {
    let updated = client.patch(&employee_path(id), patch).await?;
    info!(id, "employee updated");
    Ok(updated)
}

pub async fn delete_employee<T: Transport>(
    client: &RemoteClient<T>,
    id: EmployeeId,
) -> ApiResult<()> {
    client.delete(&employee_path(id)).await
}

/// Deletes every id concurrently and fails as a whole as soon as any single
/// deletion fails. Which one failed is not reported.
pub async fn delete_employees<T: Transport>(
    client: &RemoteClient<T>,
    ids: &[EmployeeId],
) -> ApiResult<()> {
    try_join_all(ids.iter().map(|id| delete_employee(client, *id))).await?;
    info!(count = ids.len(), "employees deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::employee::employee;
    use crate::error::ApiError;
    use crate::http::{HttpResponse, MemoryTransport, Method};

    fn client(transport: MemoryTransport) -> RemoteClient<MemoryTransport> {
        RemoteClient::new(ApiConfig::new("http://api.test"), transport)
    }

    #[tokio::test]
    async fn fetch_parses_list() {
        let body = serde_json::to_string(&vec![employee(1), employee(2)]).unwrap();
        let transport = MemoryTransport::always(200, &body);

        let employees = fetch_employees(&client(transport.clone())).await.unwrap();

        assert_eq!(employees, vec![employee(1), employee(2)]);
        assert_eq!(transport.requests()[0].url, "http://api.test/employees");
    }

    #[tokio::test]
    async fn create_posts_the_record() {
        let transport = MemoryTransport::always(201, r#"{"id":99}"#);

        create_employee(&client(transport.clone()), &employee(5)).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        let sent: Employee = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, employee(5));
    }

    #[tokio::test]
    async fn update_patches_by_id() {
        let transport = MemoryTransport::always(200, r#"{"id":3,"age":50}"#);
        let patch = EmployeePatch {
            age: Some(50),
            ..Default::default()
        };

        let value = update_employee(&client(transport.clone()), 3, &patch).await.unwrap();

        assert_eq!(value["age"], 50);
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://api.test/employees/3");
        assert_eq!(request.body.as_deref(), Some(r#"{"age":50}"#));
    }

    #[tokio::test]
    async fn delete_batch_issues_one_request_per_id() {
        let transport = MemoryTransport::always(200, "{}");

        delete_employees(&client(transport.clone()), &[1, 3, 7]).await.unwrap();

        let mut urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "http://api.test/employees/1",
                "http://api.test/employees/3",
                "http://api.test/employees/7",
            ]
        );
    }

    #[tokio::test]
    async fn delete_batch_fails_if_any_fails() {
        let transport = MemoryTransport::new(|request| {
            if request.url.ends_with("/3") {
                Ok(HttpResponse::new(500, "boom"))
            } else {
                Ok(HttpResponse::new(200, "{}"))
            }
        });

        let err = delete_employees(&client(transport), &[1, 3, 7]).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let transport = MemoryTransport::offline();
        delete_employees(&client(transport.clone()), &[]).await.unwrap();
        assert!(transport.requests().is_empty());
    }
}
