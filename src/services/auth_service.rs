use crate::database::{Store, release};
use crate::entities::employee_entity as employees;
use crate::error::{AppError, AppResult};
use crate::utils::{JwtService, verify_password};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(store: Store, jwt_service: JwtService) -> Self {
        Self { store, jwt_service }
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Returns the employee id when `username` exists and `password` matches.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Option<i64>> {
        let conn = self.store.connect().await?;
        let result = employees::Entity::find()
            .filter(employees::Column::Username.eq(username))
            .one(&conn)
            .await
            .map_err(AppError::from);
        let employee = release(conn, result).await?;

        match employee {
            Some(employee) if verify_password(password, &employee.password)? => Ok(Some(employee.id)),
            _ => Ok(None),
        }
    }

    /// Verifies credentials and issues the session token for the cookie.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        match self.verify_credentials(username, password).await? {
            Some(employee_id) => {
                log::info!("Employee {employee_id} logged in");
                self.jwt_service.generate_session_token(employee_id, username)
            }
            None => {
                log::warn!("Failed login attempt for '{username}'");
                Err(AppError::AuthError("Invalid credentials".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;
    use crate::database::seed_admin;
    use crate::services::test_support::test_store;
    use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

    fn jwt() -> JwtService {
        JwtService::new("test-secret", 3600)
    }

    #[tokio::test]
    async fn test_seeded_admin_can_log_in() {
        let (_dir, store) = test_store().await;
        assert!(seed_admin(&store, &SeedConfig::default()).await.unwrap());
        let service = AuthService::new(store, jwt());

        let id = service.verify_credentials("admin", "admin123").await.unwrap();
        assert!(id.is_some());

        let token = service.login("admin", "admin123").await.unwrap();
        assert_eq!(service.jwt_service().verify_session_token(&token).unwrap(), id.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let (_dir, store) = test_store().await;
        seed_admin(&store, &SeedConfig::default()).await.unwrap();
        let service = AuthService::new(store, jwt());

        assert_eq!(service.verify_credentials("admin", "nope").await.unwrap(), None);
        assert_eq!(service.verify_credentials("ghost", "admin123").await.unwrap(), None);
        assert!(matches!(
            service.login("admin", "nope").await,
            Err(AppError::AuthError(_))
        ));
    }

    #[tokio::test]
    async fn test_reseeding_keeps_changed_password() {
        let (_dir, store) = test_store().await;
        seed_admin(&store, &SeedConfig::default()).await.unwrap();

        // Password changed outside the app, stored as an unsalted digest the
        // way earlier deployments wrote it.
        let conn = store.connect().await.unwrap();
        let mut admin = employees::Entity::find()
            .filter(employees::Column::Username.eq("admin"))
            .one(&conn)
            .await
            .unwrap()
            .unwrap()
            .into_active_model();
        // sha256("kilimo2025")
        admin.password =
            Set("b98cd612daeca7f3cfe145d3261f79e68d860a9d216a551a48a36b3ba7a91ad1".to_string());
        admin.update(&conn).await.unwrap();

        assert!(!seed_admin(&store, &SeedConfig::default()).await.unwrap());

        let service = AuthService::new(store, jwt());
        assert!(service.verify_credentials("admin", "kilimo2025").await.unwrap().is_some());
        assert!(service.verify_credentials("admin", "admin123").await.unwrap().is_none());
    }
}
