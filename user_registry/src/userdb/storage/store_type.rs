use std::sync::Arc;

use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    types::{User, UserChanges},
};

use super::postgres::*;
use super::sqlite::*;

/// Facade over the users table, dispatching to the connected backend
#[derive(Clone)]
pub struct UserStore {
    store: Arc<dyn DataStore>,
}

impl UserStore {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Create the users table if needed; on PostgreSQL additionally check
    /// the live schema against what the crate expects.
    pub async fn init(&self) -> Result<(), UserError> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => create_tables_sqlite(pool).await,
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Insert a new row; a unique-constraint violation on the email maps
    /// to `DuplicateEmail`.
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        photo_path: Option<&str>,
    ) -> Result<User, UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            insert_user_sqlite(pool, name, email, photo_path).await
        } else if let Some(pool) = self.store.as_postgres() {
            insert_user_postgres(pool, name, email, photo_path).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by id
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_user_sqlite(pool, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// All users, newest creation first
    pub async fn get_all_users(&self) -> Result<Vec<User>, UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            list_users_sqlite(pool).await
        } else if let Some(pool) = self.store.as_postgres() {
            list_users_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Partial update: read the prior row, apply only the supplied
    /// fields, write every column back.
    pub async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, UserError> {
        let current = self.get_user(id).await?.ok_or(UserError::NotFound)?;
        let merged = current.merged(changes);

        if let Some(pool) = self.store.as_sqlite() {
            update_user_sqlite(pool, &merged).await
        } else if let Some(pool) = self.store.as_postgres() {
            update_user_postgres(pool, &merged).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Delete the row, returning it as it existed beforehand so the
    /// caller can clean up its asset.
    pub async fn delete_user(&self, id: i64) -> Result<User, UserError> {
        let deleted = if let Some(pool) = self.store.as_sqlite() {
            delete_user_sqlite(pool, id).await?
        } else if let Some(pool) = self.store.as_postgres() {
            delete_user_postgres(pool, id).await?
        } else {
            return Err(UserError::Storage("Unsupported database type".to_string()));
        };

        deleted.ok_or(UserError::NotFound)
    }

    /// Connectivity probe for health checks
    pub async fn ping(&self) -> Result<(), UserError> {
        if let Some(pool) = self.store.as_sqlite() {
            ping_sqlite(pool).await
        } else if let Some(pool) = self.store.as_postgres() {
            ping_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_user_store;

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let store = test_user_store().await;

        let user = store
            .insert_user("Ana", "ana@example.com", None)
            .await
            .expect("Failed to insert user");

        assert!(user.id >= 1);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.photo_path, None);

        let fetched = store
            .get_user(user.id)
            .await
            .expect("Failed to get user")
            .expect("User should exist");

        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_insert_user_with_photo() {
        let store = test_user_store().await;

        let user = store
            .insert_user("Ana", "ana@example.com", Some("1700000000000-abc.jpg"))
            .await
            .expect("Failed to insert user");

        assert_eq!(user.photo_path.as_deref(), Some("1700000000000-abc.jpg"));
    }

    #[tokio::test]
    async fn test_insert_duplicate_email() {
        let store = test_user_store().await;

        store
            .insert_user("Bob", "dup@example.com", None)
            .await
            .expect("Failed to insert first user");

        let result = store.insert_user("Cid", "dup@example.com", None).await;

        match result {
            Err(UserError::DuplicateEmail(email)) => assert_eq!(email, "dup@example.com"),
            other => panic!("Expected DuplicateEmail, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_user_is_none() {
        let store = test_user_store().await;

        let result = store.get_user(12345).await.expect("Failed to query");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_users_newest_first() {
        let store = test_user_store().await;

        let first = store
            .insert_user("Ana", "ana@example.com", None)
            .await
            .expect("Failed to insert");
        let second = store
            .insert_user("Bob", "bob@example.com", None)
            .await
            .expect("Failed to insert");

        let users = store.get_all_users().await.expect("Failed to list");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, second.id);
        assert_eq!(users[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_user_partial() {
        let store = test_user_store().await;

        let user = store
            .insert_user("Ana", "ana@example.com", Some("1700000000000-abc.jpg"))
            .await
            .expect("Failed to insert");

        let updated = store
            .update_user(
                user.id,
                UserChanges {
                    name: Some("Ana Maria".to_string()),
                    ..UserChanges::default()
                },
            )
            .await
            .expect("Failed to update");

        // Only the supplied field changes
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(updated.photo_path.as_deref(), Some("1700000000000-abc.jpg"));
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = test_user_store().await;

        let result = store.update_user(999, UserChanges::default()).await;
        assert_eq!(result, Err(UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_to_duplicate_email() {
        let store = test_user_store().await;

        store
            .insert_user("Ana", "ana@example.com", None)
            .await
            .expect("Failed to insert");
        let bob = store
            .insert_user("Bob", "bob@example.com", None)
            .await
            .expect("Failed to insert");

        let result = store
            .update_user(
                bob.id,
                UserChanges {
                    email: Some("ana@example.com".to_string()),
                    ..UserChanges::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_delete_user_returns_prior_row() {
        let store = test_user_store().await;

        let user = store
            .insert_user("Ana", "ana@example.com", Some("1700000000000-abc.jpg"))
            .await
            .expect("Failed to insert");

        let deleted = store.delete_user(user.id).await.expect("Failed to delete");
        assert_eq!(deleted, user);

        let gone = store.get_user(user.id).await.expect("Failed to query");
        assert!(gone.is_none());

        let again = store.delete_user(user.id).await;
        assert_eq!(again, Err(UserError::NotFound));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = test_user_store().await;

        let first = store
            .insert_user("Ana", "ana@example.com", None)
            .await
            .expect("Failed to insert");
        store
            .delete_user(first.id)
            .await
            .expect("Failed to delete");

        let second = store
            .insert_user("Bob", "bob@example.com", None)
            .await
            .expect("Failed to insert");

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_ping() {
        let store = test_user_store().await;
        store.ping().await.expect("Ping should succeed");
    }
}
