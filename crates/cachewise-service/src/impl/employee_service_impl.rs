//! Employee service implementation.

use crate::cache::{cache_keys, CacheAside, CacheInterface, DEFAULT_ENTITY_TTL};
use crate::employee_service::EmployeeService;
use cachewise_core::{CacheEntity, CachewiseError, CachewiseResult, Employee, EmployeeId, NewEmployee};
use cachewise_repository::EmployeeRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Employee service wired through the DI container.
#[derive(Component)]
#[shaku(interface = EmployeeService)]
pub struct EmployeeServiceComponent {
    #[shaku(inject)]
    employee_repository: Arc<dyn EmployeeRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    /// Lifetime of every entry this service writes.
    #[shaku(default = DEFAULT_ENTITY_TTL)]
    entity_ttl: Duration,
}

impl EmployeeServiceComponent {
    /// Creates a new employee service.
    #[must_use]
    pub fn new(
        employee_repository: Arc<dyn EmployeeRepository>,
        cache: Arc<dyn CacheInterface>,
        entity_ttl: Duration,
    ) -> Self {
        Self {
            employee_repository,
            cache,
            entity_ttl,
        }
    }

    fn cache_aside(&self) -> CacheAside {
        CacheAside::new(Arc::clone(&self.cache), self.entity_ttl)
    }

    async fn find_existing(&self, id: EmployeeId) -> CachewiseResult<Employee> {
        self.employee_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CachewiseError::not_found("Employee", id))
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceComponent {
    async fn read_one(&self, id: EmployeeId) -> CachewiseResult<Employee> {
        debug!("Getting employee: {}", id);

        let cache_key = cache_keys::employee_by_id(id);
        self.cache_aside()
            .read_through(Employee::KIND, &cache_key, || self.find_existing(id))
            .await
    }

    async fn read_all(&self) -> CachewiseResult<Vec<Employee>> {
        debug!("Listing employees");

        let cache_key = cache_keys::employee_list();
        self.cache_aside()
            .read_through(Employee::KIND, &cache_key, || async {
                let employees = self.employee_repository.find_all().await?;
                if employees.is_empty() {
                    return Err(CachewiseError::not_found("Employee", "all"));
                }
                Ok(employees)
            })
            .await
    }

    async fn upsert(&self, employee: NewEmployee) -> CachewiseResult<Employee> {
        debug!("Upserting employee: {}", employee.name);

        let existing = match employee.id {
            Some(id) => self.employee_repository.find_by_id(id).await?,
            None => None,
        };

        let saved = match existing {
            Some(mut current) => {
                current.apply(&employee);
                let updated = self.employee_repository.update(&current).await?;
                info!("Employee updated: {}", updated.id);
                updated
            }
            None => {
                let inserted = self.employee_repository.insert(&employee).await?;
                info!("Employee created: {}", inserted.id);
                inserted
            }
        };

        self.cache_aside()
            .populate(&cache_keys::employee_by_id(saved.id), &saved)
            .await;

        Ok(saved)
    }

    async fn delete(&self, id: EmployeeId) -> CachewiseResult<()> {
        debug!("Deleting employee: {}", id);

        self.find_existing(id).await?;
        if !self.employee_repository.remove(id).await? {
            debug!("Employee {} was already removed by a concurrent request", id);
        }
        self.cache_aside().evict(&cache_keys::employee_by_id(id)).await;

        info!("Employee deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for EmployeeServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeServiceComponent")
            .field("entity_ttl", &self.entity_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{codec, InMemoryCache};
    use cachewise_core::Salary;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory employee repository that counts lookups and can be told to
    /// fail reads.
    struct MockEmployeeRepository {
        employees: Mutex<BTreeMap<EmployeeId, Employee>>,
        next_id: AtomicI64,
        lookups: AtomicUsize,
        fail_reads: AtomicBool,
        lose_race_on_remove: AtomicBool,
    }

    impl MockEmployeeRepository {
        fn new() -> Self {
            Self {
                employees: Mutex::new(BTreeMap::new()),
                next_id: AtomicI64::new(1),
                lookups: AtomicUsize::new(0),
                fail_reads: AtomicBool::new(false),
                lose_race_on_remove: AtomicBool::new(false),
            }
        }

        fn with_employee(employee: Employee) -> Self {
            let repo = Self::new();
            repo.next_id.store(employee.id.into_inner() + 1, Ordering::SeqCst);
            repo.employees.lock().unwrap().insert(employee.id, employee);
            repo
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        fn check_reads(&self) -> CachewiseResult<()> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(CachewiseError::Database("read path down".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn find_by_id(&self, id: EmployeeId) -> CachewiseResult<Option<Employee>> {
            self.check_reads()?;
            Ok(self.employees.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> CachewiseResult<Vec<Employee>> {
            self.check_reads()?;
            Ok(self.employees.lock().unwrap().values().cloned().collect())
        }

        async fn insert(&self, employee: &NewEmployee) -> CachewiseResult<Employee> {
            let id = employee
                .id
                .unwrap_or_else(|| EmployeeId::new(self.next_id.fetch_add(1, Ordering::SeqCst)));
            let saved = employee.with_id(id);
            self.employees.lock().unwrap().insert(id, saved.clone());
            Ok(saved)
        }

        async fn update(&self, employee: &Employee) -> CachewiseResult<Employee> {
            self.employees.lock().unwrap().insert(employee.id, employee.clone());
            Ok(employee.clone())
        }

        async fn remove(&self, id: EmployeeId) -> CachewiseResult<bool> {
            let removed = self.employees.lock().unwrap().remove(&id).is_some();
            Ok(removed && !self.lose_race_on_remove.load(Ordering::SeqCst))
        }
    }

    fn asha() -> Employee {
        Employee::new(EmployeeId::new(1), "Asha", "Engineer", Salary::from(1200))
    }

    fn draft(id: Option<i64>, name: &str, position: &str, salary: f64) -> NewEmployee {
        NewEmployee {
            id: id.map(EmployeeId::new),
            name: name.to_string(),
            position: position.to_string(),
            salary: Salary::try_from(salary).unwrap(),
        }
    }

    fn service(
        repo: Arc<MockEmployeeRepository>,
        cache: Arc<InMemoryCache>,
    ) -> EmployeeServiceComponent {
        EmployeeServiceComponent::new(repo, cache, DEFAULT_ENTITY_TTL)
    }

    #[tokio::test]
    async fn test_cold_read_populates_cache_once() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache.clone());

        let first = service.read_one(EmployeeId::new(1)).await.unwrap();
        let second = service.read_one(EmployeeId::new(1)).await.unwrap();

        assert_eq!(first, asha());
        assert_eq!(second, asha());
        assert_eq!(repo.lookups(), 1);

        let raw = cache.peek("cache:employee:id:1").expect("entry populated");
        assert_eq!(codec::decode::<Employee>(&raw).unwrap(), asha());
    }

    #[tokio::test]
    async fn test_read_one_missing_is_not_found_and_not_cached() {
        let repo = Arc::new(MockEmployeeRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache.clone());

        let result = service.read_one(EmployeeId::new(99)).await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_upsert_writes_through() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache.clone());

        let updated = service
            .upsert(draft(Some(1), "Asha K", "Lead", 2400.0))
            .await
            .unwrap();
        assert_eq!(updated.id, EmployeeId::new(1));

        repo.fail_reads.store(true, Ordering::SeqCst);
        let read = service.read_one(EmployeeId::new(1)).await.unwrap();

        assert_eq!(read.name, "Asha K");
        assert_eq!(read.position, "Lead");
        assert_eq!(read.salary, Salary::from(2400));
    }

    #[tokio::test]
    async fn test_upsert_without_id_inserts() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache.clone());

        let created = service
            .upsert(draft(None, "Ravi", "Clerk", 500.0))
            .await
            .unwrap();

        assert_eq!(created.id, EmployeeId::new(2));
        assert_eq!(repo.lookups(), 0);
        assert!(cache.peek("cache:employee:id:2").is_some());
    }

    #[tokio::test]
    async fn test_upsert_with_unknown_id_inserts_with_that_id() {
        let repo = Arc::new(MockEmployeeRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache);

        let created = service
            .upsert(draft(Some(40), "Meera", "Analyst", 900.0))
            .await
            .unwrap();

        assert_eq!(created.id, EmployeeId::new(40));
        assert_eq!(repo.lookups(), 1);
    }

    #[tokio::test]
    async fn test_upsert_leaves_collection_entry() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache.clone());

        let before = service.read_all().await.unwrap();
        service
            .upsert(draft(None, "Ravi", "Clerk", 500.0))
            .await
            .unwrap();
        let after = service.read_all().await.unwrap();

        assert_eq!(before, after);
        assert_eq!(after.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_survives_cache_outage() {
        let repo = Arc::new(MockEmployeeRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        cache.set_failing(true);
        let service = service(repo.clone(), cache);

        let created = service
            .upsert(draft(None, "Ravi", "Clerk", 500.0))
            .await
            .unwrap();

        assert_eq!(
            repo.employees.lock().unwrap().get(&created.id).cloned(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn test_delete_invalidates_entry() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache.clone());

        service.read_one(EmployeeId::new(1)).await.unwrap();
        assert!(cache.peek("cache:employee:id:1").is_some());

        service.delete(EmployeeId::new(1)).await.unwrap();

        assert!(cache.peek("cache:employee:id:1").is_none());
        let result = service.read_one(EmployeeId::new(1)).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_racing_removal_still_evicts() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache.clone());
        service.read_one(EmployeeId::new(1)).await.unwrap();
        repo.lose_race_on_remove.store(true, Ordering::SeqCst);

        service.delete(EmployeeId::new(1)).await.unwrap();

        assert!(cache.peek("cache:employee:id:1").is_none());
        assert!(service.read_one(EmployeeId::new(1)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = Arc::new(MockEmployeeRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache);

        let result = service.delete(EmployeeId::new(5)).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_survives_cache_outage() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache.clone());
        cache.set_failing(true);

        service.delete(EmployeeId::new(1)).await.unwrap();

        assert!(repo.employees.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_falls_back_and_heals() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        cache.insert_raw("cache:employee:id:1", "{\"id\":1,\"na", DEFAULT_ENTITY_TTL);
        let service = service(repo.clone(), cache.clone());

        let employee = service.read_one(EmployeeId::new(1)).await.unwrap();

        assert_eq!(employee, asha());
        assert_eq!(repo.lookups(), 1);
        let raw = cache.peek("cache:employee:id:1").unwrap();
        assert_eq!(codec::decode::<Employee>(&raw).unwrap(), asha());
    }

    #[tokio::test]
    async fn test_cache_outage_reads_from_repository() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        cache.set_failing(true);
        let service = service(repo.clone(), cache);

        assert_eq!(service.read_one(EmployeeId::new(1)).await.unwrap(), asha());
        assert_eq!(service.read_one(EmployeeId::new(1)).await.unwrap(), asha());
        assert_eq!(repo.lookups(), 2);
    }

    #[tokio::test]
    async fn test_cache_timeout_reads_from_repository() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = crate::cache::test_support::unresponsive_cache(Duration::from_millis(100)).await;
        let service = EmployeeServiceComponent::new(repo.clone(), Arc::new(cache), DEFAULT_ENTITY_TTL);

        assert_eq!(service.read_one(EmployeeId::new(1)).await.unwrap(), asha());
        let saved = service
            .upsert(draft(Some(1), "Asha K", "Lead", 2400.0))
            .await
            .unwrap();
        assert_eq!(saved.name, "Asha K");
        service.delete(EmployeeId::new(1)).await.unwrap();
        assert_eq!(repo.lookups(), 3);
    }

    #[tokio::test]
    async fn test_read_all_empty_is_not_found() {
        let repo = Arc::new(MockEmployeeRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache.clone());

        let result = service.read_all().await;

        assert!(result.unwrap_err().is_not_found());
        assert!(cache.peek("cache:employee:list").is_none());
    }

    #[tokio::test]
    async fn test_read_all_is_cached() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo.clone(), cache);

        assert_eq!(service.read_all().await.unwrap(), vec![asha()]);
        assert_eq!(service.read_all().await.unwrap(), vec![asha()]);
        assert_eq!(repo.lookups(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let repo = Arc::new(MockEmployeeRepository::with_employee(asha()));
        let cache = Arc::new(InMemoryCache::new());
        let service = EmployeeServiceComponent::new(repo.clone(), cache, Duration::from_secs(30));

        service.read_one(EmployeeId::new(1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(31)).await;
        service.read_one(EmployeeId::new(1)).await.unwrap();

        assert_eq!(repo.lookups(), 2);
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces() {
        let repo = Arc::new(MockEmployeeRepository::new());
        repo.fail_reads.store(true, Ordering::SeqCst);
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache);

        let result = service.read_one(EmployeeId::new(1)).await;

        assert!(matches!(result, Err(CachewiseError::Database(_))));
    }
}
