use crate::database::{Store, release};
use crate::entities::{LoanStatus, customer_entity as customers, loan_entity as loans};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use super::LoanService;

#[derive(Clone)]
pub struct ReportService {
    store: Store,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Customer count, unpaid loan count and the outstanding balance of all
    /// unpaid loans. An empty book reports zeros.
    pub async fn dashboard_summary(&self) -> AppResult<DashboardSummary> {
        let conn = self.store.connect().await?;
        let result = Self::summary(&conn).await;
        release(conn, result).await
    }

    async fn summary(conn: &DatabaseConnection) -> AppResult<DashboardSummary> {
        let customer_count = customers::Entity::find().count(conn).await?;
        let active_loan_count = loans::Entity::find()
            .filter(loans::Column::Status.eq(LoanStatus::Unpaid))
            .count(conn)
            .await?;

        #[derive(Debug, FromQueryResult)]
        struct OutstandingRow {
            total_outstanding: f64,
        }
        let total_outstanding = loans::Entity::find()
            .select_only()
            .column_as(
                Expr::cust(
                    r#"COALESCE(SUM("loans"."amount" * (1 + COALESCE("loans"."interest_rate", 0) / 100.0)), 0.0)"#,
                ),
                "total_outstanding",
            )
            .filter(loans::Column::Status.eq(LoanStatus::Unpaid))
            .into_model::<OutstandingRow>()
            .one(conn)
            .await?
            .map(|r| r.total_outstanding)
            .unwrap_or(0.0);

        Ok(DashboardSummary {
            customer_count,
            active_loan_count,
            total_outstanding,
        })
    }

    pub async fn list_reports(&self, status: LoanStatus) -> AppResult<Vec<LoanWithCustomer>> {
        let conn = self.store.connect().await?;
        let result = LoanService::loan_view_by_status(status)
            .all(&conn)
            .await
            .map_err(AppError::from);
        release(conn, result).await
    }

    /// Paid and unpaid loans read over a single connection.
    pub async fn report_breakdown(&self) -> AppResult<ReportBreakdown> {
        let conn = self.store.connect().await?;
        let result = async {
            let paid = LoanService::loan_view_by_status(LoanStatus::Paid)
                .all(&conn)
                .await?;
            let unpaid = LoanService::loan_view_by_status(LoanStatus::Unpaid)
                .all(&conn)
                .await?;
            Ok::<_, AppError>(ReportBreakdown { paid, unpaid })
        }
        .await;
        release(conn, result).await
    }
}
