use super::Database;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        age INTEGER,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        category TEXT,
        in_stock INTEGER DEFAULT 1,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        product_id INTEGER,
        quantity INTEGER DEFAULT 1,
        total_price REAL,
        order_date DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY(user_id) REFERENCES users(id),
        FOREIGN KEY(product_id) REFERENCES products(id)
    )",
];

const USERS: [(&str, &str, i64); 4] = [
    ("Max Mustermann", "max@example.com", 30),
    ("Anna Schmidt", "anna@example.com", 25),
    ("Tom Weber", "tom@example.com", 35),
    ("Lisa Müller", "lisa@example.com", 28),
];

const PRODUCTS: [(&str, f64, &str); 5] = [
    ("Laptop", 999.99, "Electronics"),
    ("Smartphone", 599.99, "Electronics"),
    ("Book", 19.99, "Books"),
    ("Headphones", 149.99, "Electronics"),
    ("Desk", 299.99, "Furniture"),
];

// user_id, product_id, quantity, total_price
const ORDERS: [(i64, i64, i64, f64); 4] = [
    (1, 1, 1, 999.99),
    (2, 2, 1, 599.99),
    (3, 3, 2, 39.98),
    (1, 4, 1, 149.99),
];

/// Creates the sample tables and fills them in one transaction.
pub async fn sample_data(db: &Database) -> Result<(), sqlx::Error> {
    let mut tx = db.pool().begin().await?;
    for sql in SCHEMA {
        sqlx::query(sql).execute(&mut *tx).await?;
    }
    for (name, email, age) in USERS {
        sqlx::query("INSERT OR IGNORE INTO users (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&mut *tx)
            .await?;
    }
    for (name, price, category) in PRODUCTS {
        sqlx::query("INSERT OR IGNORE INTO products (name, price, category) VALUES (?, ?, ?)")
            .bind(name)
            .bind(price)
            .bind(category)
            .execute(&mut *tx)
            .await?;
    }
    for (user_id, product_id, quantity, total_price) in ORDERS {
        sqlx::query(
            "INSERT OR IGNORE INTO orders (user_id, product_id, quantity, total_price) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(total_price)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    tracing::info!(
        users = USERS.len(),
        products = PRODUCTS.len(),
        orders = ORDERS.len(),
        "sample data written"
    );
    Ok(())
}
