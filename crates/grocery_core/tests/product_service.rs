use grocery_core::db::open_db_in_memory;
use grocery_core::{
    Product, ProductId, ProductRepository, ProductService, ProductValidationError, RepoResult,
    ServiceError, SqliteProductRepository,
};
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};

/// In-memory repository that counts writes, used to prove which calls the
/// service makes.
#[derive(Default)]
struct RecordingRepository {
    rows: RefCell<Vec<Product>>,
    next_id: Cell<ProductId>,
    save_calls: Cell<usize>,
    delete_calls: Cell<usize>,
}

impl ProductRepository for &RecordingRepository {
    fn save(&self, product: &Product) -> RepoResult<Product> {
        self.save_calls.set(self.save_calls.get() + 1);
        let mut rows = self.rows.borrow_mut();
        let mut stored = product.clone();
        match stored.id {
            Some(id) => {
                if let Some(existing) = rows.iter_mut().find(|row| row.id == Some(id)) {
                    *existing = stored.clone();
                }
            }
            None => {
                self.next_id.set(self.next_id.get() + 1);
                stored.id = Some(self.next_id.get());
                rows.push(stored.clone());
            }
        }
        Ok(stored)
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        Ok(self.rows.borrow().iter().find(|row| row.id == Some(id)).cloned())
    }

    fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.rows.borrow().clone())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>> {
        Ok(self.rows.borrow().iter().find(|row| row.name == name).cloned())
    }

    fn find_by_category(&self, category: &str) -> RepoResult<Vec<Product>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.category == category)
            .cloned()
            .collect())
    }

    fn find_remaining_in_stock(&self) -> RepoResult<Vec<Product>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.is_in_stock())
            .cloned()
            .collect())
    }

    fn delete_by_id(&self, id: ProductId) -> RepoResult<()> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        self.rows.borrow_mut().retain(|row| row.id != Some(id));
        Ok(())
    }
}

fn milk12() -> Product {
    Product::new("Milk12", "MM")
        .with_stock(1000)
        .with_price(Decimal::ONE)
}

#[test]
fn create_assigns_id_visible_through_get_by_id() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);

    let created = service.create(&milk12()).unwrap();
    let id = created.id.unwrap();

    let fetched = service.get_by_id(id).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.id, Some(id));
}

#[test]
fn create_with_taken_name_fails_without_saving() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);
    service.create(&milk12()).unwrap();

    let err = service.create(&milk12()).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName(ref name) if name == "Milk12"));
    assert_eq!(err.to_string(), "Product found with name: Milk12");
    assert_eq!(repo.save_calls.get(), 1);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn create_ignores_caller_supplied_id() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);

    let mut product = milk12();
    product.id = Some(500);
    let created = service.create(&product).unwrap();
    assert_eq!(created.id, Some(1));
}

#[test]
fn create_rejects_blank_name_before_touching_storage() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);

    let err = service.create(&Product::new("", "MM")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ProductValidationError::EmptyName)
    ));
    assert_eq!(repo.save_calls.get(), 0);
}

#[test]
fn update_replaces_fields_and_preserves_id() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);
    let created = service.create(&milk12()).unwrap();

    let mut replacement = created.clone();
    replacement.category = "MM2".to_string();
    replacement.remaining_quantity = 500;
    let updated = service.update(&replacement).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(service.get_by_id(created.id.unwrap()).unwrap(), Some(replacement));
}

#[test]
fn update_does_not_recheck_uniqueness() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);
    service.create(&milk12()).unwrap();
    let mut other = service.create(&Product::new("Bread", "bakery")).unwrap();

    other.name = "Milk12".to_string();
    service.update(&other).unwrap();

    let names: Vec<_> = service.list().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Milk12", "Milk12"]);
}

#[test]
fn update_without_id_is_rejected() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);

    let err = service.update(&milk12()).unwrap_err();
    assert!(matches!(err, ServiceError::MissingId));
    assert_eq!(repo.save_calls.get(), 0);
}

#[test]
fn delete_always_delegates_even_for_unknown_id() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);
    let created = service.create(&milk12()).unwrap();
    let id = created.id.unwrap();

    service.delete_by_id(id).unwrap();
    service.delete_by_id(id).unwrap();
    service.delete_by_id(12_345).unwrap();

    assert_eq!(repo.delete_calls.get(), 3);
    assert!(service.get_by_id(id).unwrap().is_none());
    assert!(service.get_by_id(12_345).unwrap().is_none());
}

#[test]
fn list_is_empty_before_any_create() {
    let repo = RecordingRepository::default();
    let service = ProductService::new(&repo);

    assert!(service.list().unwrap().is_empty());
}

#[test]
fn sqlite_service_maps_rename_collision_to_duplicate_name() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::new(&conn));
    service.create(&milk12()).unwrap();
    let mut other = service.create(&Product::new("Bread", "bakery")).unwrap();

    other.name = "Milk12".to_string();
    let err = service.update(&other).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName(_)));
}

#[test]
fn sqlite_service_reports_vanished_row_on_update() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::new(&conn));
    let created = service.create(&milk12()).unwrap();
    service.delete_by_id(created.id.unwrap()).unwrap();

    let err = service.update(&created).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if Some(id) == created.id));
}

#[test]
fn sqlite_service_filters_by_category_and_stock() {
    let conn = open_db_in_memory().unwrap();
    let service = ProductService::new(SqliteProductRepository::new(&conn));
    let milk = service.create(&milk12()).unwrap();
    let bread = service
        .create(&Product::new("Bread", "bakery").with_stock(0))
        .unwrap();

    assert_eq!(service.list_by_category("MM").unwrap(), vec![milk.clone()]);
    assert_eq!(service.list_by_category("bakery").unwrap(), vec![bread]);
    assert_eq!(service.list_in_stock().unwrap(), vec![milk]);
}
