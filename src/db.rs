use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// A named grouping of products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub category_id: i64,
}

/// Fields collected by the add-product flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub category_id: i64,
}

/// Open the store file, creating it when missing.
///
/// The pool holds a single connection; every handler shares it.
pub async fn open_database(path: &str) -> Result<SqlitePool> {
    info!(database_path = %path, "Opening database");

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database at {path}"))
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &SqlitePool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create categories table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            photo_url TEXT,
            category_id INTEGER NOT NULL,
            FOREIGN KEY (category_id) REFERENCES categories (id)
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create products table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Create a new category and return its ID
pub async fn create_category(pool: &SqlitePool, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
        .bind(name)
        .execute(pool)
        .await
        .context("Failed to insert new category")?;

    let category_id = result.last_insert_rowid();
    info!(category_id, name, "Category created");

    Ok(category_id)
}

/// List all categories in creation order
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list categories")
}

/// Read a category by ID
pub async fn read_category(pool: &SqlitePool, category_id: i64) -> Result<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
        .bind(category_id)
        .fetch_optional(pool)
        .await
        .context("Failed to read category")
}

/// Delete a category together with every product that references it.
///
/// Both statements run in one transaction. Returns `None` when the category
/// does not exist, otherwise the number of products removed.
pub async fn delete_category_cascade(pool: &SqlitePool, category_id: i64) -> Result<Option<u64>> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE id = ?1")
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to look up category")?
        .is_some();

    if !exists {
        debug!(category_id, "No category to delete");
        return Ok(None);
    }

    // Products go first so the foreign key never dangles
    let products_removed = sqlx::query("DELETE FROM products WHERE category_id = ?1")
        .bind(category_id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete category products")?
        .rows_affected();

    sqlx::query("DELETE FROM categories WHERE id = ?1")
        .bind(category_id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete category")?;

    tx.commit().await.context("Failed to commit category deletion")?;

    info!(category_id, products_removed, "Category deleted with its products");
    Ok(Some(products_removed))
}

/// Create a new product and return its ID
pub async fn create_product(pool: &SqlitePool, product: &NewProduct) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO products (name, description, photo_url, category_id) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.photo_url)
    .bind(product.category_id)
    .execute(pool)
    .await
    .context("Failed to insert new product")?;

    let product_id = result.last_insert_rowid();
    info!(product_id, category_id = product.category_id, "Product created");

    Ok(product_id)
}

/// List the products of one category in creation order
pub async fn list_products_in_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, photo_url, category_id FROM products
         WHERE category_id = ?1 ORDER BY id",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
    .context("Failed to list products")
}

/// Count the products that reference a category
pub async fn count_products_in_category(pool: &SqlitePool, category_id: i64) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE category_id = ?1")
        .bind(category_id)
        .fetch_one(pool)
        .await
        .context("Failed to count products")
}

/// Read a product by ID
pub async fn read_product(pool: &SqlitePool, product_id: i64) -> Result<Option<Product>> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, photo_url, category_id FROM products WHERE id = ?1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await
    .context("Failed to read product")
}

/// Delete a product, returning whether a row was removed
pub async fn delete_product(pool: &SqlitePool, product_id: i64) -> Result<bool> {
    let rows_affected = sqlx::query("DELETE FROM products WHERE id = ?1")
        .bind(product_id)
        .execute(pool)
        .await
        .context("Failed to delete product")?
        .rows_affected();

    if rows_affected > 0 {
        info!(product_id, "Product deleted");
        Ok(true)
    } else {
        info!(product_id, "No product found to delete");
        Ok(false)
    }
}
