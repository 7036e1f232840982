use crate::database::{Store, release};
use crate::entities::{LoanStatus, customer_entity as customers, loan_entity as loans};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Local;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set,
};

#[derive(Clone)]
pub struct LoanService {
    store: Store,
}

impl LoanService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Records a new loan. Status always starts as `unpaid` and the issue
    /// date is today; neither can be supplied by the caller.
    pub async fn create_loan(&self, request: NewLoan) -> AppResult<i64> {
        request.validate()?;

        let conn = self.store.connect().await?;
        let result = Self::insert_loan(&conn, request).await;
        let id = release(conn, result).await?;

        log::info!("Loan {id} recorded");
        Ok(id)
    }

    async fn insert_loan(conn: &DatabaseConnection, request: NewLoan) -> AppResult<i64> {
        let customer = customers::Entity::find_by_id(request.customer_id)
            .one(conn)
            .await?;
        if customer.is_none() {
            return Err(AppError::ValidationError(
                "Customer does not exist".to_string(),
            ));
        }

        let model = loans::ActiveModel {
            customer_id: Set(request.customer_id),
            amount: Set(request.amount),
            date: Set(Local::now().date_naive()),
            duration: Set(request.duration),
            status: Set(LoanStatus::Unpaid),
            loan_type: Set(request.loan_type),
            interest_rate: Set(Some(request.interest_rate)),
            ..Default::default()
        };
        let inserted = loans::Entity::insert(model).exec(conn).await?;
        Ok(inserted.last_insert_id)
    }

    /// Marks a loan as paid. Already-paid and unknown ids are accepted
    /// without error.
    pub async fn repay_loan(&self, loan_id: i64) -> AppResult<()> {
        let conn = self.store.connect().await?;
        let result = loans::Entity::update_many()
            .col_expr(loans::Column::Status, Expr::value(LoanStatus::Paid.to_value()))
            .filter(loans::Column::Id.eq(loan_id))
            .exec(&conn)
            .await
            .map_err(AppError::from);
        let updated = release(conn, result).await?;

        if updated.rows_affected == 0 {
            log::warn!("Repayment for unknown loan {loan_id} accepted");
        } else {
            log::info!("Loan {loan_id} marked as paid");
        }
        Ok(())
    }

    /// Every loan with its customer, plus the customer picker for the form.
    pub async fn loans_page(&self) -> AppResult<(Vec<LoanWithCustomer>, Vec<CustomerOption>)> {
        let conn = self.store.connect().await?;
        let result = async {
            let loans = Self::loan_view().all(&conn).await?;
            let options = super::CustomerService::customer_options(&conn).await?;
            Ok::<_, AppError>((loans, options))
        }
        .await;
        release(conn, result).await
    }

    pub async fn list_loans_with_customer(&self) -> AppResult<Vec<LoanWithCustomer>> {
        let conn = self.store.connect().await?;
        let result = Self::loan_view().all(&conn).await.map_err(AppError::from);
        release(conn, result).await
    }

    /// Joined loan rows with `loan_type`, `interest_rate` and `collateral`
    /// coalesced to `"N/A"` / `0` in SQL.
    pub(crate) fn loan_view() -> sea_orm::Selector<sea_orm::SelectModel<LoanWithCustomer>> {
        Self::loan_view_select().into_model::<LoanWithCustomer>()
    }

    pub(crate) fn loan_view_by_status(
        status: LoanStatus,
    ) -> sea_orm::Selector<sea_orm::SelectModel<LoanWithCustomer>> {
        Self::loan_view_select()
            .filter(loans::Column::Status.eq(status))
            .into_model::<LoanWithCustomer>()
    }

    fn loan_view_select() -> Select<loans::Entity> {
        loans::Entity::find()
            .select_only()
            .column(loans::Column::Id)
            .column_as(customers::Column::Name, "customer_name")
            .column(loans::Column::Amount)
            .column(loans::Column::Date)
            .column(loans::Column::Duration)
            .column(loans::Column::Status)
            .column_as(Expr::cust(r#"COALESCE(NULLIF(TRIM("loans"."loan_type"), ''), 'N/A')"#), "loan_type")
            .column_as(
                Expr::cust(r#"COALESCE("loans"."interest_rate", 0.0)"#),
                "interest_rate",
            )
            .column_as(
                Expr::cust(r#"COALESCE(NULLIF(TRIM("customers"."collateral"), ''), 'N/A')"#),
                "collateral",
            )
            .join(JoinType::InnerJoin, loans::Relation::Customer.def())
            .order_by_asc(loans::Column::Id)
    }
}
