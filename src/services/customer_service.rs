use crate::database::{Store, is_unique_violation, release};
use crate::entities::customer_entity as customers;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::normalize_phone;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

#[derive(Clone)]
pub struct CustomerService {
    store: Store,
}

impl CustomerService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Inserts a customer. A phone number that is already registered fails
    /// with [`AppError::DuplicatePhone`] and writes nothing.
    pub async fn create_customer(&self, request: NewCustomer) -> AppResult<i64> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        let phone = normalize_phone(&request.phone)?;

        let model = customers::ActiveModel {
            name: Set(request.name),
            phone: Set(phone.clone()),
            collateral: Set(request.collateral),
            ..Default::default()
        };

        let conn = self.store.connect().await?;
        let result = customers::Entity::insert(model).exec(&conn).await;
        let result = match result {
            Ok(inserted) => Ok(inserted.last_insert_id),
            Err(e) if is_unique_violation(&e) => Err(AppError::DuplicatePhone(phone)),
            Err(e) => Err(e.into()),
        };
        let id = release(conn, result).await?;

        log::info!("Customer {id} created");
        Ok(id)
    }

    pub async fn list_customers(&self) -> AppResult<Vec<CustomerRow>> {
        let conn = self.store.connect().await?;
        let result = Self::customer_rows(&conn).await;
        release(conn, result).await
    }

    pub async fn list_customer_options(&self) -> AppResult<Vec<CustomerOption>> {
        let conn = self.store.connect().await?;
        let result = Self::customer_options(&conn).await;
        release(conn, result).await
    }

    async fn customer_rows(conn: &DatabaseConnection) -> AppResult<Vec<CustomerRow>> {
        let rows = customers::Entity::find()
            .select_only()
            .column(customers::Column::Id)
            .column(customers::Column::Name)
            .column(customers::Column::Phone)
            .column_as(
                Expr::cust(r#"COALESCE(NULLIF(TRIM("customers"."collateral"), ''), 'N/A')"#),
                "collateral",
            )
            .order_by_asc(customers::Column::Id)
            .into_model::<CustomerRow>()
            .all(conn)
            .await?;
        Ok(rows)
    }

    pub(crate) async fn customer_options(conn: &DatabaseConnection) -> AppResult<Vec<CustomerOption>> {
        let rows = customers::Entity::find()
            .select_only()
            .column(customers::Column::Id)
            .column(customers::Column::Name)
            .order_by_asc(customers::Column::Name)
            .into_model::<CustomerOption>()
            .all(conn)
            .await?;
        Ok(rows)
    }
}
