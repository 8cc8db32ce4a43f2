use std::sync::Arc;

use client::{ClientError, EmployeeApi};
use models::Department;
use service::EntityStore;
use tracing::debug;

use crate::observability::{REMOTE_LOOKUPS_TOTAL, REMOTE_LOOKUP_ERRORS_TOTAL};

/// Composes the local department list with one remote employee lookup
/// per department.
///
/// The N+1 call shape is the documented contract of this view, not an
/// accident: departments and employees share no database, so the only
/// way to join them is over the employee service's API. Output order is
/// the store's insertion order.
///
/// Failure policy is fail-fast: the first lookup error aborts the whole
/// aggregation and no partially populated list escapes. Attaching a
/// per-department error marker instead would be the extension point for
/// a degraded-success mode; it is intentionally not implemented.
#[derive(Clone)]
pub struct DepartmentAggregator {
    store: Arc<EntityStore<Department>>,
    employees: Arc<dyn EmployeeApi>,
}

impl DepartmentAggregator {
    pub fn new(store: Arc<EntityStore<Department>>, employees: Arc<dyn EmployeeApi>) -> Self {
        Self { store, employees }
    }

    pub async fn list_with_employees(&self) -> Result<Vec<Department>, ClientError> {
        let mut departments = self.store.list().await;
        for department in &mut departments {
            REMOTE_LOOKUPS_TOTAL.inc();
            let found = match self.employees.find_by_department(department.id).await {
                Ok(found) => found,
                Err(e) => {
                    REMOTE_LOOKUP_ERRORS_TOTAL.inc();
                    return Err(e);
                }
            };
            debug!(department_id = department.id, count = found.len(), "attached employees");
            department.employees = found;
        }
        Ok(departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use models::{Employee, EntityId, NewDepartment};
    use std::collections::HashMap;

    struct FakeEmployees {
        by_department: HashMap<EntityId, Vec<Employee>>,
    }

    #[async_trait]
    impl EmployeeApi for FakeEmployees {
        async fn find_by_department(
            &self,
            department_id: EntityId,
        ) -> Result<Vec<Employee>, ClientError> {
            Ok(self.by_department.get(&department_id).cloned().unwrap_or_default())
        }
    }

    struct DownEmployees;

    #[async_trait]
    impl EmployeeApi for DownEmployees {
        async fn find_by_department(
            &self,
            _department_id: EntityId,
        ) -> Result<Vec<Employee>, ClientError> {
            Err(ClientError::NoBackend { service: "employee-service".into() })
        }
    }

    fn employee(id: EntityId, department_id: EntityId) -> Employee {
        Employee { id, name: format!("e{id}"), department_id }
    }

    async fn seed_departments(names: &[&str]) -> Arc<EntityStore<Department>> {
        let store = EntityStore::<Department>::new();
        for name in names {
            store.add(Department::from(NewDepartment { name: (*name).into() })).await;
        }
        store
    }

    #[tokio::test]
    async fn attaches_each_departments_employees() {
        let store = seed_departments(&["Eng", "Sales"]).await;
        let mut by_department = HashMap::new();
        by_department.insert(1, vec![employee(10, 1), employee(11, 1)]);
        by_department.insert(2, vec![employee(12, 2)]);
        let aggregator =
            DepartmentAggregator::new(store, Arc::new(FakeEmployees { by_department }));

        let result = aggregator.list_with_employees().await.expect("aggregate");

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Eng");
        assert_eq!(result[0].employees.iter().map(|e| e.id).collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(result[1].name, "Sales");
        assert_eq!(result[1].employees.iter().map(|e| e.id).collect::<Vec<_>>(), vec![12]);
    }

    #[tokio::test]
    async fn output_order_is_store_insertion_order() {
        let store = seed_departments(&["D1", "D2", "D3"]).await;
        let aggregator = DepartmentAggregator::new(
            store,
            Arc::new(FakeEmployees { by_department: HashMap::new() }),
        );

        let result = aggregator.list_with_employees().await.expect("aggregate");
        assert_eq!(result.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec![
            "D1", "D2", "D3"
        ]);
    }

    #[tokio::test]
    async fn departments_with_no_employees_come_back_empty() {
        let store = seed_departments(&["Empty"]).await;
        let aggregator = DepartmentAggregator::new(
            store,
            Arc::new(FakeEmployees { by_department: HashMap::new() }),
        );

        let result = aggregator.list_with_employees().await.expect("aggregate");
        assert!(result[0].employees.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_fails_the_whole_aggregation() {
        let store = seed_departments(&["Eng", "Sales"]).await;
        let aggregator = DepartmentAggregator::new(store, Arc::new(DownEmployees));

        let err = aggregator.list_with_employees().await.expect_err("must fail");
        assert!(matches!(err, ClientError::NoBackend { .. }));
    }
}
