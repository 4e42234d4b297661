//! PostgreSQL implementation of OrderStore.
//!
//! The conditional status transition is a single `UPDATE ... WHERE
//! order_no = $1 AND status = $2`; `rows_affected` is the applied flag.
//! That one statement is the subsystem's entire concurrency control.

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::order::{Order, OrderStatus, PayMethod};
use crate::ports::{OrderStore, TransitionPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the OrderStore port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgresOrderStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_no: String,
    provider_trade_no: Option<String>,
    client_id: String,
    amount: Decimal,
    pay_method: String,
    provider_status_text: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let pay_method = parse_pay_method(&row.pay_method)?;
        let client_id = ClientId::new(row.client_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid client_id: {}", e))
        })?;

        Ok(Order {
            id: OrderId::from_uuid(row.id),
            order_no: row.order_no,
            provider_trade_no: row.provider_trade_no,
            client_id,
            amount: row.amount,
            pay_method,
            provider_status_text: row.provider_status_text,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<OrderStatus, DomainError> {
    match s {
        "pending" => Ok(OrderStatus::Pending),
        "paid" => Ok(OrderStatus::Paid),
        "analyzed" => Ok(OrderStatus::Analyzed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn parse_pay_method(s: &str) -> Result<PayMethod, DomainError> {
    PayMethod::from_wire(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid pay_method value: {}", s),
        )
    })
}

const SELECT_ORDER: &str = r#"
    SELECT id, order_no, provider_trade_no, client_id, amount, pay_method,
           provider_status_text, status, created_at, updated_at
    FROM orders
"#;

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_no, provider_trade_no, client_id, amount, pay_method,
                provider_status_text, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.order_no)
        .bind(&order.provider_trade_no)
        .bind(order.client_id.as_str())
        .bind(order.amount)
        .bind(order.pay_method.as_wire())
        .bind(&order.provider_status_text)
        .bind(order.status.as_str())
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("orders_order_no_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateOrderNo,
                        "Order number already exists",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert order: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{} WHERE order_no = $1", SELECT_ORDER))
                .bind(order_no)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find order: {}", e),
                    )
                })?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE client_id = $1 ORDER BY created_at DESC",
            SELECT_ORDER
        ))
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list client orders: {}", e),
            )
        })?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn compare_and_transition(
        &self,
        order_no: &str,
        expected: OrderStatus,
        next: OrderStatus,
        patch: TransitionPatch,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = $3,
                provider_trade_no = COALESCE($4, provider_trade_no),
                provider_status_text = COALESCE($5, provider_status_text),
                pay_method = COALESCE($6, pay_method),
                updated_at = NOW()
            WHERE order_no = $1 AND status = $2
            "#,
        )
        .bind(order_no)
        .bind(expected.as_str())
        .bind(next.as_str())
        .bind(&patch.provider_trade_no)
        .bind(&patch.provider_status_text)
        .bind(patch.pay_method.map(|m| m.as_wire()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to transition order: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }
}
