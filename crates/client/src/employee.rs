use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use models::{Employee, EntityId};
use tracing::debug;

use crate::error::ClientError;
use crate::resolver::ServiceResolver;

/// Logical name the resolver maps to live employee-service addresses.
pub const EMPLOYEE_SERVICE: &str = "employee-service";

/// The one contract the department side has with the employee service:
/// fetch the employees belonging to a department.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn find_by_department(
        &self,
        department_id: EntityId,
    ) -> Result<Vec<Employee>, ClientError>;
}

/// HTTP implementation of [`EmployeeApi`].
///
/// Resolves the logical service name on every call, so a backend-list
/// swap in the resolver takes effect without rebuilding the client.
pub struct HttpEmployeeClient {
    http: reqwest::Client,
    resolver: Arc<dyn ServiceResolver>,
}

impl HttpEmployeeClient {
    pub fn new(
        resolver: Arc<dyn ServiceResolver>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { http, resolver })
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeClient {
    async fn find_by_department(
        &self,
        department_id: EntityId,
    ) -> Result<Vec<Employee>, ClientError> {
        let addr = self.resolver.resolve(EMPLOYEE_SERVICE)?;
        let url = format!("http://{addr}/api/employee/department/{department_id}");
        debug!(%url, department_id, "fetching employees by department");

        let resp = self.http.get(&url).send().await.map_err(|e| ClientError::Unreachable {
            service: EMPLOYEE_SERVICE.to_string(),
            source: e,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Upstream { service: EMPLOYEE_SERVICE.to_string(), status });
        }

        resp.json::<Vec<Employee>>().await.map_err(|e| ClientError::Decode {
            service: EMPLOYEE_SERVICE.to_string(),
            source: e,
        })
    }
}
