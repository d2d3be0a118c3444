//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    order::{LineItem, Order},
    product::{Product, ProductFacets},
};
use crate::domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
use crate::domain::value_object::{
    invoice_number::{InvoiceNumber, InvoicePeriod},
    order_status::OrderStatus,
    payment_status::PaymentStatus,
    product_category::ProductCategory,
    shipping_address::ShippingAddress,
};
use crate::error::{OrderError, OrderResult};

const ORDER_COLUMNS: &str = r#"
    order_id,
    user_id,
    total_amount,
    status,
    payment_status,
    ship_street,
    ship_city,
    ship_state,
    ship_postal_code,
    ship_country,
    invoice_number,
    created_at,
    updated_at
"#;

const PRODUCT_COLUMNS: &str = r#"
    product_id,
    name,
    description,
    price,
    stock,
    category,
    sizes,
    colors,
    image,
    style,
    fabric,
    occasion,
    kind,
    created_at,
    updated_at
"#;

// ============================================================================
// Orders
// ============================================================================

/// PostgreSQL-backed order ledger and invoice counter
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One-column status write. `column` is always a fixed name from this module.
    async fn update_column(
        &self,
        column: &str,
        order_id: &OrderId,
        code: &str,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        let sql = format!(
            "UPDATE orders SET {column} = $2, updated_at = $3 WHERE order_id = $1 RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id.as_uuid())
            .bind(code)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Attach line items to already-loaded order rows, keeping row order
    async fn hydrate(&self, rows: Vec<OrderRow>) -> OrderResult<Vec<Order>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.order_id).collect();
        let item_rows = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT order_id, product_id, quantity, unit_price
            FROM order_line_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
        for row in item_rows {
            let order_id = row.order_id;
            items.entry(order_id).or_default().push(row.into_line_item()?);
        }

        rows.into_iter()
            .map(|row| {
                let line_items = items.remove(&row.order_id).unwrap_or_default();
                row.into_order(line_items)
            })
            .collect()
    }
}

impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> OrderResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id,
                user_id,
                total_amount,
                status,
                payment_status,
                ship_street,
                ship_city,
                ship_state,
                ship_postal_code,
                ship_country,
                invoice_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.map(UserId::into_uuid))
        .bind(order.total_amount)
        .bind(order.status.code())
        .bind(order.payment_status.code())
        .bind(&order.shipping_address.street)
        .bind(&order.shipping_address.city)
        .bind(&order.shipping_address.state)
        .bind(&order.shipping_address.postal_code)
        .bind(&order.shipping_address.country)
        .bind(order.invoice_number.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| OrderError::Internal("Too many line items".to_string()))?;
            let quantity = i32::try_from(item.quantity)
                .map_err(|_| OrderError::Internal("Quantity out of range".to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO order_line_items (order_id, position, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.order_id.as_uuid())
            .bind(position)
            .bind(item.product_id.as_uuid())
            .bind(quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, user_id: Option<&UserId>) -> OrderResult<Vec<Order>> {
        let rows = match user_id {
            Some(user_id) => {
                let sql = format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, OrderRow>(&sql)
                    .bind(user_id.as_uuid())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
                sqlx::query_as::<_, OrderRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        self.hydrate(rows).await
    }

    async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        self.update_column("status", order_id, status.code(), at).await
    }

    async fn update_payment_status(
        &self,
        order_id: &OrderId,
        payment_status: PaymentStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        self.update_column("payment_status", order_id, payment_status.code(), at)
            .await
    }
}

impl InvoiceSequenceRepository for PgOrderRepository {
    async fn next_value(&self, period: InvoicePeriod) -> OrderResult<u64> {
        // Single-statement increment; concurrent callers serialize on the row lock
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO invoice_sequences (period, last_value)
            VALUES ($1, 1)
            ON CONFLICT (period)
            DO UPDATE SET last_value = invoice_sequences.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(period.code())
        .fetch_one(&self.pool)
        .await?;

        u64::try_from(value)
            .map_err(|_| OrderError::Internal(format!("Invalid invoice sequence value: {value}")))
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Clone)]
pub struct PgProductCatalog {
    pool: PgPool,
}

impl PgProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductCatalog for PgProductCatalog {
    async fn create(&self, product: &Product) -> OrderResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                name,
                description,
                price,
                stock,
                category,
                sizes,
                colors,
                image,
                style,
                fabric,
                occasion,
                kind,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category.code())
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.image.as_deref())
        .bind(&product.facets.style)
        .bind(&product.facets.fabric)
        .bind(&product.facets.occasion)
        .bind(&product.facets.kind)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> OrderResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn find_many(&self, product_ids: &[ProductId]) -> OrderResult<Vec<Product>> {
        let ids: Vec<Uuid> = product_ids.iter().map(|id| *id.as_uuid()).collect();
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ANY($1)");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn list(&self) -> OrderResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn update(&self, product: &Product) -> OrderResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                price = $4,
                stock = $5,
                category = $6,
                sizes = $7,
                colors = $8,
                image = $9,
                style = $10,
                fabric = $11,
                occasion = $12,
                kind = $13,
                updated_at = $14
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category.code())
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.image.as_deref())
        .bind(&product.facets.style)
        .bind(&product.facets.fabric)
        .bind(&product.facets.occasion)
        .bind(&product.facets.kind)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, product_id: &ProductId) -> OrderResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.as_uuid())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(OrderError::ProductInUse)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    user_id: Option<Uuid>,
    total_amount: Decimal,
    status: String,
    payment_status: String,
    ship_street: String,
    ship_city: String,
    ship_state: String,
    ship_postal_code: String,
    ship_country: String,
    invoice_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<LineItem>) -> OrderResult<Order> {
        let status = OrderStatus::from_code(&self.status)
            .ok_or_else(|| OrderError::Internal(format!("Invalid order status: {}", self.status)))?;
        let payment_status = PaymentStatus::from_code(&self.payment_status).ok_or_else(|| {
            OrderError::Internal(format!("Invalid payment status: {}", self.payment_status))
        })?;

        Ok(Order {
            order_id: OrderId::from_uuid(self.order_id),
            user_id: self.user_id.map(UserId::from_uuid),
            items,
            total_amount: self.total_amount,
            status,
            shipping_address: ShippingAddress {
                street: self.ship_street,
                city: self.ship_city,
                state: self.ship_state,
                postal_code: self.ship_postal_code,
                country: self.ship_country,
            },
            payment_status,
            invoice_number: InvoiceNumber::from_db(self.invoice_number),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LineItemRow {
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
}

impl LineItemRow {
    fn into_line_item(self) -> OrderResult<LineItem> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| OrderError::Internal(format!("Invalid quantity: {}", self.quantity)))?;

        Ok(LineItem {
            product_id: ProductId::from_uuid(self.product_id),
            quantity,
            unit_price: self.unit_price,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    stock: i32,
    category: String,
    sizes: Vec<String>,
    colors: Vec<String>,
    image: Option<String>,
    style: Vec<String>,
    fabric: Vec<String>,
    occasion: Vec<String>,
    kind: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> OrderResult<Product> {
        let category = ProductCategory::from_code(&self.category)
            .ok_or_else(|| OrderError::Internal(format!("Invalid category: {}", self.category)))?;

        Ok(Product {
            product_id: ProductId::from_uuid(self.product_id),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category,
            sizes: self.sizes,
            colors: self.colors,
            image: self.image,
            facets: ProductFacets {
                style: self.style,
                fabric: self.fabric,
                occasion: self.occasion,
                kind: self.kind,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
