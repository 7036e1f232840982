use crate::database::is_unique_violation;
use crate::entities::customer_entity as customers;
use crate::error::AppResult;
use crate::utils::normalize_phone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};

#[derive(Debug, FromQueryResult)]
struct StoredPhone {
    id: i64,
    phone: Option<String>,
}

/// Rewrites phones stored before normalisation existed, so that new
/// customers collide with them. A row whose normalised number already
/// belongs to another customer is left as it is and logged.
///
/// Returns the number of rewritten rows. Safe to run on every start.
pub async fn normalize_customer_phones(conn: &DatabaseConnection) -> AppResult<u64> {
    let rows = customers::Entity::find()
        .select_only()
        .column(customers::Column::Id)
        .column(customers::Column::Phone)
        .order_by_asc(customers::Column::Id)
        .into_model::<StoredPhone>()
        .all(conn)
        .await?;

    let mut rewritten = 0;
    for row in rows {
        let Some(stored) = row.phone else { continue };
        // Blank numbers have no normal form; leave them for an operator.
        let Ok(normalized) = normalize_phone(&stored) else {
            continue;
        };
        if normalized == stored {
            continue;
        }

        let update = customers::Entity::update_many()
            .col_expr(customers::Column::Phone, Expr::value(normalized.clone()))
            .filter(customers::Column::Id.eq(row.id))
            .exec(conn)
            .await;
        match update {
            Ok(_) => rewritten += 1,
            Err(e) if is_unique_violation(&e) => {
                log::warn!(
                    "Customer {} keeps phone '{stored}': '{normalized}' belongs to another customer",
                    row.id
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    if rewritten > 0 {
        log::info!("Normalised {rewritten} stored phone numbers");
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::NewCustomer;
    use crate::services::CustomerService;
    use crate::services::test_support::{LEGACY_SCHEMA, legacy_store};
    use crate::database::run_migrations;

    async fn phones(store: &crate::database::Store) -> Vec<String> {
        let conn = store.connect().await.unwrap();
        customers::Entity::find()
            .order_by_asc(customers::Column::Id)
            .all(&conn)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.phone)
            .collect()
    }

    #[tokio::test]
    async fn test_stored_phone_blocks_the_same_number_typed_differently() {
        let (_dir, store) = legacy_store(&[
            LEGACY_SCHEMA[0],
            LEGACY_SCHEMA[1],
            LEGACY_SCHEMA[2],
            "INSERT INTO customers (name, phone) VALUES ('Asha', '0712 345 678')",
        ])
        .await;
        run_migrations(&store).await.unwrap();

        assert_eq!(phones(&store).await, vec!["0712345678"]);

        let service = CustomerService::new(store.clone());
        let result = service
            .create_customer(NewCustomer {
                name: "Baraka".to_string(),
                phone: "0712345678".to_string(),
                collateral: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::DuplicatePhone(_))));
        assert_eq!(phones(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_colliding_stored_phones_are_left_unchanged() {
        let (_dir, store) = legacy_store(&[
            LEGACY_SCHEMA[0],
            LEGACY_SCHEMA[1],
            LEGACY_SCHEMA[2],
            "INSERT INTO customers (name, phone) VALUES ('Asha', '0712-345-678')",
            "INSERT INTO customers (name, phone) VALUES ('Baraka', '(0712) 345 678')",
            "INSERT INTO customers (name, phone) VALUES ('Chausiku', '0755 000 111')",
        ])
        .await;
        run_migrations(&store).await.unwrap();

        assert_eq!(
            phones(&store).await,
            vec!["0712345678", "(0712) 345 678", "0755000111"]
        );

        let conn = store.connect().await.unwrap();
        assert_eq!(normalize_customer_phones(&conn).await.unwrap(), 0);
    }
}
