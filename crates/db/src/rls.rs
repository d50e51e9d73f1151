//! Row-Level Security (RLS) context management.
//!
//! Every repository transaction sets the `PostgreSQL` session variable
//! `app.current_tenant_id` before running queries, enabling the
//! row-level security policies that enforce multi-tenant isolation.

use sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr};
use uuid::Uuid;

/// Sets the RLS context on a transaction.
///
/// Uses `SET LOCAL`, which scopes the setting to the current
/// transaction only.
///
/// # Errors
///
/// Returns an error if the RLS context cannot be set.
pub async fn set_rls_context(txn: &DatabaseTransaction, tenant_id: Uuid) -> Result<(), DbErr> {
    // SET LOCAL is scoped to the transaction; the UUID comes from a
    // typed value, not user input
    let sql = format!("SET LOCAL app.current_tenant_id = '{tenant_id}'");
    txn.execute_unprepared(&sql).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // These require a real PostgreSQL database with RLS enabled; the
    // full isolation checks run as integration tests.

    #[test]
    fn test_rls_sql_format() {
        let tenant_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let sql = format!("SET LOCAL app.current_tenant_id = '{tenant_id}'");
        assert_eq!(
            sql,
            "SET LOCAL app.current_tenant_id = '550e8400-e29b-41d4-a716-446655440000'"
        );
    }
}
