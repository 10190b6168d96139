//! User repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `None` for absent rows; only store failures are errors.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert the user if its ID is new, otherwise overwrite the stored row
    async fn save(&self, user: User) -> AppResult<User>;

    /// List every user, oldest first
    async fn find_all(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository over PostgreSQL
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations surface as conflicts so callers can tell them
/// apart from other store failures.
fn map_write_err(err: DbErr) -> AppError {
    classify_write_err(err.sql_err(), err)
}

fn classify_write_err(sql_err: Option<SqlErr>, err: DbErr) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            AppError::conflict("Email")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let exists = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .is_some();

        let active = ActiveModel::from(user);
        let result = if exists {
            active.update(&self.db).await
        } else {
            active.insert(&self.db).await
        };

        let model = result.map_err(map_write_err)?;
        Ok(User::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(email: &str) -> user::Model {
        let now = Utc::now();
        user::Model {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_maps_model() {
        let row = model("a@x.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();

        let store = UserStore::new(db);
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(found.id, row.id);
        assert_eq!(found.password_hash, row.password_hash);
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let store = UserStore::new(db);
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_inserts_new_user() {
        let row = model("new@x.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new(), vec![row.clone()]])
            .into_connection();

        let store = UserStore::new(db);
        let saved = store.save(User::from(row.clone())).await.unwrap();

        assert_eq!(saved.id, row.id);
        assert_eq!(saved.email, "new@x.com");
    }

    #[tokio::test]
    async fn test_find_all_returns_every_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("a@x.com"), model("b@x.com")]])
            .into_connection();

        let store = UserStore::new(db);
        let users = store.find_all().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].email, "b@x.com");
    }

    #[tokio::test]
    async fn test_save_updates_existing_user() {
        let row = model("a@x.com");
        let mut changed = row.clone();
        changed.first_name = "Renamed".to_string();
        changed.email = "renamed@x.com".to_string();

        // Existence lookup, then the UPDATE ... RETURNING row
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()], vec![changed.clone()]])
            .into_connection();

        let store = UserStore::new(db);
        let saved = store.save(User::from(changed)).await.unwrap();

        assert_eq!(saved.id, row.id);
        assert_eq!(saved.first_name, "Renamed");
        assert_eq!(saved.email, "renamed@x.com");
        assert_eq!(saved.password_hash, row.password_hash);
    }

    #[tokio::test]
    async fn test_save_propagates_other_write_failures() {
        let row = model("a@x.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let store = UserStore::new(db);
        let err = store.save(User::from(row)).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err = classify_write_err(
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"idx_users_email\"".to_string(),
            )),
            DbErr::Custom("duplicate key".to_string()),
        );

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[test]
    fn test_non_sql_error_stays_database_error() {
        let err = map_write_err(DbErr::Custom("pool timed out".to_string()));

        assert!(matches!(err, AppError::Database(_)));
    }
}
