//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the storage-agnostic persistence port for products.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` inserts when `id` is unset and fully overwrites otherwise.
//! - Generated ids are never reused (`AUTOINCREMENT`).
//! - Read paths reject undecodable persisted rows instead of masking them.
//! - Connections must come from `open_db`/`open_db_in_memory`, which register
//!   the Unicode case-folding function used by name search.

use crate::db::functions::CATALOG_LOWER_FN;
use crate::db::DbError;
use crate::model::product::{Product, ProductId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    price,
    image_url
FROM products";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// No unused id is left to assign to a new product.
    IdSpaceExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
            Self::IdSpaceExhausted => write!(f, "no product ids left to assign"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::IdSpaceExhausted => None,
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

/// Persistence port for the product entity.
///
/// Implementations provide per-call atomicity only; callers compose no
/// multi-step transactions on top.
pub trait ProductRepository {
    /// Returns every stored product. Order is adapter-defined.
    fn find_all(&self) -> RepoResult<Vec<Product>>;
    /// Returns `None` when no product has `id`.
    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Inserts when `product.id` is `None`, otherwise overwrites the row at `id`.
    ///
    /// Returns the persisted record, carrying the generated id on insert.
    fn save(&self, product: &Product) -> RepoResult<Product>;
    /// Returns whether a product with `id` is stored.
    fn exists_by_id(&self, id: ProductId) -> RepoResult<bool>;
    /// Removes the row at `id`. Deleting a missing id is a no-op.
    fn delete_by_id(&self, id: ProductId) -> RepoResult<()>;
    /// Case-insensitive substring match on `name`; empty input matches all.
    fn find_by_name_containing_ignore_case(&self, name_part: &str) -> RepoResult<Vec<Product>>;
}

impl<R: ProductRepository + ?Sized> ProductRepository for &R {
    fn find_all(&self) -> RepoResult<Vec<Product>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        (**self).find_by_id(id)
    }

    fn save(&self, product: &Product) -> RepoResult<Product> {
        (**self).save(product)
    }

    fn exists_by_id(&self, id: ProductId) -> RepoResult<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: ProductId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }

    fn find_by_name_containing_ignore_case(&self, name_part: &str) -> RepoResult<Vec<Product>> {
        (**self).find_by_name_containing_ignore_case(name_part)
    }
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_products(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Product>> {
        self.query_products(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"), params![])
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, product: &Product) -> RepoResult<Product> {
        let price = product.price.to_string();

        let id = match product.id {
            None => {
                self.conn.execute(
                    "INSERT INTO products (name, description, price, image_url)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        product.name.as_str(),
                        product.description.as_deref(),
                        price,
                        product.image_url.as_deref(),
                    ],
                )?;
                let id = self.conn.last_insert_rowid();
                debug!("event=product_insert module=repo status=ok product_id={id}");
                id
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO products (id, name, description, price, image_url)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        description = excluded.description,
                        price = excluded.price,
                        image_url = excluded.image_url;",
                    params![
                        id,
                        product.name.as_str(),
                        product.description.as_deref(),
                        price,
                        product.image_url.as_deref(),
                    ],
                )?;
                debug!("event=product_upsert module=repo status=ok product_id={id}");
                id
            }
        };

        Ok(Product {
            id: Some(id),
            ..product.clone()
        })
    }

    fn exists_by_id(&self, id: ProductId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM products WHERE id = ?1;", [id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn delete_by_id(&self, id: ProductId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;
        debug!("event=product_delete module=repo status=ok product_id={id} changed={changed}");
        Ok(())
    }

    fn find_by_name_containing_ignore_case(&self, name_part: &str) -> RepoResult<Vec<Product>> {
        // `instr` matches literally, so `%` and `_` need no escaping.
        self.query_products(
            &format!(
                "{PRODUCT_SELECT_SQL}
                 WHERE instr({CATALOG_LOWER_FN}(name), ?1) > 0
                 ORDER BY id ASC;"
            ),
            [name_part.to_lowercase()],
        )
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id: ProductId = row.get("id")?;

    let price_text: String = row.get("price")?;
    let price = Decimal::from_str(&price_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid price value `{price_text}` in products.price for id {id}"
        ))
    })?;

    Ok(Product {
        id: Some(id),
        name: row.get("name")?,
        description: row.get("description")?,
        price,
        image_url: row.get("image_url")?,
    })
}
