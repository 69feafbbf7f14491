//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD plus the two read-only filters over `products`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths perform no field validation; callers own business rules.
//! - "Not found" on reads is `Ok(None)`, never an error.
//! - Read paths reject undecodable persisted rows instead of masking them.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::product::{Product, ProductId};
use rusqlite::{ffi, params, Connection, Params, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    category,
    initial_quantity,
    remaining_quantity,
    price_per_unit
FROM products";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "category",
    "initial_quantity",
    "remaining_quantity",
    "price_per_unit",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The UNIQUE index on `products.name` rejected a write.
    DuplicateName(String),
    /// An update targeted an id with no stored row.
    NotFound(ProductId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "product name already exists: `{name}`"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for products.
pub trait ProductRepository {
    /// Inserts when `product.id` is `None`, otherwise replaces every column of
    /// the row with that id. Returns the stored record.
    fn save(&self, product: &Product) -> RepoResult<Product>;
    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn find_all(&self) -> RepoResult<Vec<Product>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>>;
    fn find_by_category(&self, category: &str) -> RepoResult<Vec<Product>>;
    fn find_remaining_in_stock(&self) -> RepoResult<Vec<Product>>;
    /// Removing an absent id is a no-op.
    fn delete_by_id(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Wraps a connection without checking its schema.
    ///
    /// Use with connections returned by `open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after verifying migrations were applied and the
    /// `products` table carries every column this repository reads.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'products'
            );",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable("products"));
        }

        let mut stmt = conn.prepare("PRAGMA table_info(products);")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;
        for &required in REQUIRED_COLUMNS {
            if !columns.iter().any(|column| column.as_str() == required) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "products",
                    column: required,
                });
            }
        }

        Ok(Self { conn })
    }

    fn insert(&self, product: &Product) -> RepoResult<Product> {
        self.conn
            .execute(
                "INSERT INTO products (
                    name,
                    description,
                    category,
                    initial_quantity,
                    remaining_quantity,
                    price_per_unit
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    product.name.as_str(),
                    product.description.as_deref(),
                    product.category.as_str(),
                    product.initial_quantity,
                    product.remaining_quantity,
                    product.price_per_unit.to_string(),
                ],
            )
            .map_err(|err| map_write_error(err, &product.name))?;

        let mut saved = product.clone();
        saved.id = Some(self.conn.last_insert_rowid());
        Ok(saved)
    }

    fn update(&self, id: ProductId, product: &Product) -> RepoResult<Product> {
        let changed = self
            .conn
            .execute(
                "UPDATE products
                 SET
                    name = ?1,
                    description = ?2,
                    category = ?3,
                    initial_quantity = ?4,
                    remaining_quantity = ?5,
                    price_per_unit = ?6
                 WHERE id = ?7;",
                params![
                    product.name.as_str(),
                    product.description.as_deref(),
                    product.category.as_str(),
                    product.initial_quantity,
                    product.remaining_quantity,
                    product.price_per_unit.to_string(),
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, &product.name))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(product.clone())
    }

    fn query_one<P: Params>(&self, filter: &str, params: P) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} {filter};"))?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }
        Ok(None)
    }

    fn query_many<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }
        Ok(products)
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn save(&self, product: &Product) -> RepoResult<Product> {
        match product.id {
            None => self.insert(product),
            Some(id) => self.update(id, product),
        }
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        self.query_one("WHERE id = ?1", params![id])
    }

    fn find_all(&self) -> RepoResult<Vec<Product>> {
        self.query_many("", [])
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>> {
        self.query_one("WHERE name = ?1", params![name])
    }

    fn find_by_category(&self, category: &str) -> RepoResult<Vec<Product>> {
        self.query_many("WHERE category = ?1", params![category])
    }

    fn find_remaining_in_stock(&self) -> RepoResult<Vec<Product>> {
        self.query_many("WHERE remaining_quantity > 0", [])
    }

    fn delete_by_id(&self, id: ProductId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM products WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id: ProductId = row.get("id")?;
    let price_text: String = row.get("price_per_unit")?;
    let price_per_unit = Decimal::from_str(&price_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid price `{price_text}` in products.price_per_unit for id {id}"
        ))
    })?;

    Ok(Product {
        id: Some(id),
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("category")?,
        initial_quantity: row.get("initial_quantity")?,
        remaining_quantity: row.get("remaining_quantity")?,
        price_per_unit,
    })
}

fn map_write_error(err: rusqlite::Error, name: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateName(name.to_string())
        }
        _ => err.into(),
    }
}
