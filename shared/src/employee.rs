use serde::{Deserialize, Serialize};

pub type EmployeeId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub surname: String,
    pub age: u32,
    pub salary: f64,
    pub position: String,
    pub email: String,
}

/// Partial update body for `PATCH /employees/{id}`. Absent fields are left out
/// of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self == &EmployeePatch::default()
    }
}

/// Id for a record appended to `employees`: the id of the *last* element plus
/// one, not the maximum id. An empty list starts at 1.
pub fn next_id(employees: &[Employee]) -> EmployeeId {
    match employees.last() {
        Some(last) => last.id + 1,
        None => 1,
    }
}

#[cfg(test)]
pub(crate) fn employee(id: EmployeeId) -> Employee {
    Employee {
        id,
        name: format!("Name{}", id),
        surname: format!("Surname{}", id),
        age: 30,
        salary: 1000.0,
        position: "Engineer".to_string(),
        email: format!("user{}@example.com", id),
    }
}
