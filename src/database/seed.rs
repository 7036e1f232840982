use crate::config::SeedConfig;
use crate::entities::employee_entity as employees;
use crate::error::AppResult;
use crate::utils::hash_password;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

use super::{Store, release};

/// Inserts the default admin unless an employee with that username already
/// exists. Returns whether a row was written.
pub async fn seed_admin(store: &Store, seed: &SeedConfig) -> AppResult<bool> {
    let password = hash_password(&seed.admin_password)?;
    let admin = employees::ActiveModel {
        username: Set(seed.admin_username.clone()),
        password: Set(password),
        ..Default::default()
    };

    let conn = store.connect().await?;
    let result = employees::Entity::insert(admin)
        .on_conflict(
            OnConflict::column(employees::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&conn)
        .await
        .map_err(Into::into);
    let inserted = release(conn, result).await? > 0;

    if inserted {
        log::info!("Seeded default employee '{}'", seed.admin_username);
    }
    Ok(inserted)
}
