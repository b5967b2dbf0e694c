use crate::assets::AssetStore;
use crate::upload::{self, PhotoUpload};
use crate::userdb::{User, UserChanges, UserStore};

use super::errors::CoordinationError;

/// Request payload for creating a user
#[derive(Debug, Default)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub photo: Option<PhotoUpload>,
}

/// Request payload for a partial update
///
/// `None` fields keep their prior value; a photo replaces the existing
/// one and the superseded file is removed.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Composes the user repository and the asset store into consistent
/// create/update/delete sequences.
///
/// Ordering rule: on the happy path the database row is the last thing
/// written, on delete the first thing removed. Any failure after a photo
/// has been saved triggers a compensating delete of that photo before the
/// error propagates, so a failed operation leaves no orphaned file and a
/// reader never sees a committed row pointing at a missing asset.
#[derive(Clone)]
pub struct UserLifecycle {
    users: UserStore,
    assets: AssetStore,
}

impl UserLifecycle {
    pub fn new(users: UserStore, assets: AssetStore) -> Self {
        Self { users, assets }
    }

    /// Create a user, optionally with a profile photo.
    pub async fn create_user(&self, request: CreateUser) -> Result<User, CoordinationError> {
        upload::validate_new_user(&request.name, &request.email)?;

        let photo = request.photo.filter(|p| !p.is_empty());
        if let Some(photo) = &photo {
            upload::validate_photo(photo)?;
        }

        // The asset goes first so the row never references a file that
        // does not exist yet
        let new_reference = match &photo {
            Some(photo) => Some(self.assets.save(&photo.bytes, &photo.extension).await?),
            None => None,
        };

        match self
            .users
            .insert_user(&request.name, &request.email, new_reference.as_deref())
            .await
        {
            Ok(user) => {
                tracing::debug!("Created user {} ({})", user.id, user.email);
                Ok(user)
            }
            Err(err) => {
                if let Some(reference) = &new_reference {
                    self.discard_asset(reference).await;
                }
                Err(err.into())
            }
        }
    }

    /// Fetch a single user.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, CoordinationError> {
        Ok(self.users.get_user(id).await?)
    }

    /// All users, newest creation first.
    pub async fn list_users(&self) -> Result<Vec<User>, CoordinationError> {
        Ok(self.users.get_all_users().await?)
    }

    /// Apply a partial update, replacing the photo when a new one is
    /// supplied.
    pub async fn update_user(
        &self,
        id: i64,
        request: UpdateUser,
    ) -> Result<User, CoordinationError> {
        // No asset is touched for a nonexistent user
        let current = self.users.get_user(id).await?.ok_or_else(|| {
            CoordinationError::ResourceNotFound {
                resource_type: "User".to_string(),
                resource_id: id.to_string(),
            }
            .log()
        })?;

        let photo = request.photo.filter(|p| !p.is_empty());
        if let Some(photo) = &photo {
            upload::validate_photo(photo)?;
        }

        let new_reference = match &photo {
            Some(photo) => Some(self.assets.save(&photo.bytes, &photo.extension).await?),
            None => None,
        };

        let changes = UserChanges {
            // An empty string means the field was not supplied
            name: request.name.filter(|s| !s.trim().is_empty()),
            email: request.email.filter(|s| !s.trim().is_empty()),
            photo_path: new_reference.clone(),
        };

        let updated = match self.users.update_user(id, changes).await {
            Ok(user) => user,
            Err(err) => {
                // The unmodified row still references the old asset; only
                // the just-saved file has to go
                if let Some(reference) = &new_reference {
                    self.discard_asset(reference).await;
                }
                return Err(err.into());
            }
        };

        // The row already references the new asset, so the superseded one
        // can be removed without a reader ever observing a dangling
        // reference
        if let (Some(new_reference), Some(old_reference)) = (&new_reference, &current.photo_path) {
            if old_reference != new_reference {
                self.assets.delete(old_reference).await?;
            }
        }

        tracing::debug!("Updated user {}", updated.id);
        Ok(updated)
    }

    /// Delete a user and its photo, if any.
    pub async fn delete_user(&self, id: i64) -> Result<(), CoordinationError> {
        // Row first: if the asset delete fails afterwards the residue is
        // an orphaned file, never a row pointing at nothing
        let deleted = self.users.delete_user(id).await?;

        if let Some(reference) = &deleted.photo_path {
            self.assets.delete(reference).await?;
        }

        tracing::debug!("Deleted user {}", id);
        Ok(())
    }

    /// Repository connectivity probe for health checks.
    pub async fn ping(&self) -> Result<(), CoordinationError> {
        Ok(self.users.ping().await?)
    }

    // Compensating delete. A failure here must not mask the error that
    // triggered the compensation, so it is logged and swallowed.
    async fn discard_asset(&self, reference: &str) {
        if let Err(err) = self.assets.delete(reference).await {
            tracing::warn!("Failed to clean up asset {}: {}", reference, err);
        }
    }
}
