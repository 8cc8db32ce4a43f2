//! Domain types shared by both directory services.
//!
//! Records serialize in camelCase (`departmentId`) so the wire format
//! matches what existing directory clients already consume.

use serde::{Deserialize, Serialize};

pub type EntityId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    /// View artifact: only populated by the with-employees aggregation,
    /// never stored populated. Omitted from responses when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    /// Foreign key into the department service. Not checked for
    /// referential integrity; a dangling id is legal.
    pub department_id: EntityId,
}

/// Create payload for a department. Carries no id: identity is assigned
/// by the owning store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
}

/// Create payload for an employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub department_id: EntityId,
}

impl From<NewDepartment> for Department {
    fn from(input: NewDepartment) -> Self {
        // id 0 is a placeholder the store overwrites on add
        Self { id: 0, name: input.name, employees: Vec::new() }
    }
}

impl From<NewEmployee> for Employee {
    fn from(input: NewEmployee) -> Self {
        Self { id: 0, name: input.name, department_id: input.department_id }
    }
}
