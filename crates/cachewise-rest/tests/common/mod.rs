//! Shared fixtures for router tests.

#![allow(dead_code)]

use cachewise_config::{ResponseCacheConfig, ServerConfig};
use cachewise_core::{CachewiseResult, Employee, EmployeeId, NewEmployee, Salary};
use cachewise_repository::{EmployeeRepository, StaticBankRepository};
use cachewise_rest::{create_router, AppState};
use cachewise_service::{
    BankServiceComponent, EmployeeServiceComponent, InMemoryCache, DEFAULT_ENTITY_TTL,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Employee table held in memory.
#[derive(Default)]
pub struct MemoryEmployeeRepository {
    employees: Mutex<BTreeMap<EmployeeId, Employee>>,
    next_id: AtomicI64,
}

impl MemoryEmployeeRepository {
    pub fn seeded(employees: Vec<Employee>) -> Self {
        let repo = Self::default();
        let max = employees.iter().map(|e| e.id.into_inner()).max().unwrap_or(0);
        repo.next_id.store(max + 1, Ordering::SeqCst);
        let mut table = repo.employees.lock().unwrap();
        for employee in employees {
            table.insert(employee.id, employee);
        }
        drop(table);
        repo
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> CachewiseResult<Option<Employee>> {
        Ok(self.employees.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> CachewiseResult<Vec<Employee>> {
        Ok(self.employees.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, employee: &NewEmployee) -> CachewiseResult<Employee> {
        let id = employee.id.unwrap_or_else(|| {
            EmployeeId::new(self.next_id.fetch_add(1, Ordering::SeqCst).max(1))
        });
        let saved = employee.with_id(id);
        self.employees.lock().unwrap().insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, employee: &Employee) -> CachewiseResult<Employee> {
        self.employees.lock().unwrap().insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    async fn remove(&self, id: EmployeeId) -> CachewiseResult<bool> {
        Ok(self.employees.lock().unwrap().remove(&id).is_some())
    }
}

/// A router over in-memory repositories and cache.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<InMemoryCache>,
}

impl TestApp {
    pub fn new(employees: Vec<Employee>) -> Self {
        let cache = Arc::new(InMemoryCache::new());
        let employee_service = EmployeeServiceComponent::new(
            Arc::new(MemoryEmployeeRepository::seeded(employees)),
            cache.clone(),
            DEFAULT_ENTITY_TTL,
        );
        let bank_service = BankServiceComponent::new(Arc::new(StaticBankRepository::default()));
        let state = AppState::new(Arc::new(employee_service), Arc::new(bank_service));

        let router = create_router(
            state,
            &ServerConfig::default(),
            &ResponseCacheConfig::default(),
        );

        Self { router, cache }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, json: &str) -> (StatusCode, Vec<u8>) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }
}

pub fn asha() -> Employee {
    Employee::new(EmployeeId::new(1), "Asha", "Engineer", Salary::from(1200))
}
