use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

use user_registry::{
    AssetStore, CreateUser, PhotoUpload, UpdateUser, User, UserLifecycle, file_extension,
};

use crate::error::IntoResponseError;

/// List all users, newest first
pub(crate) async fn list_users(
    State(lifecycle): State<UserLifecycle>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let users = lifecycle.list_users().await.into_response_error()?;
    let users: Vec<Value> = users.into_iter().map(user_payload).collect();
    Ok(Json(json!({ "success": true, "users": users })))
}

pub(crate) async fn get_user(
    State(lifecycle): State<UserLifecycle>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    match lifecycle.get_user(id).await.into_response_error()? {
        Some(user) => Ok(Json(json!({ "success": true, "user": user_payload(user) }))),
        None => Err((StatusCode::NOT_FOUND, "User not found".to_string())),
    }
}

/// Create a user from a multipart form with `name`, `email` and an
/// optional `photo` file field
pub(crate) async fn create_user(
    State(lifecycle): State<UserLifecycle>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, String)> {
    let form = read_user_form(multipart).await?;

    let request = CreateUser {
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        photo: form.photo,
    };

    let user = lifecycle.create_user(request).await.into_response_error()?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user_payload(user) })),
    ))
}

/// Partial update; absent form fields keep their prior value
pub(crate) async fn update_user(
    State(lifecycle): State<UserLifecycle>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    let form = read_user_form(multipart).await?;

    let request = UpdateUser {
        name: form.name,
        email: form.email,
        photo: form.photo,
    };

    let user = lifecycle
        .update_user(id, request)
        .await
        .into_response_error()?;

    Ok(Json(json!({ "success": true, "user": user_payload(user) })))
}

pub(crate) async fn delete_user(
    State(lifecycle): State<UserLifecycle>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    lifecycle.delete_user(id).await.into_response_error()?;
    Ok(Json(json!({ "success": true, "message": "User deleted" })))
}

/// Repository connectivity probe
pub(crate) async fn check_db(
    State(lifecycle): State<UserLifecycle>,
) -> Result<Json<Value>, (StatusCode, String)> {
    lifecycle.ping().await.into_response_error()?;
    Ok(Json(json!({ "status": "ok" })))
}

// The row as the wire sees it, with the public URL its photo is served
// under alongside the raw reference
fn user_payload(user: User) -> Value {
    let photo_url = user.photo_path.as_deref().map(AssetStore::serving_path);

    let mut value = serde_json::to_value(&user).unwrap_or_else(|_| json!({}));
    if let (Some(object), Some(url)) = (value.as_object_mut(), photo_url) {
        object.insert("photo_url".to_string(), Value::String(url));
    }
    value
}

#[derive(Default)]
struct UserForm {
    name: Option<String>,
    email: Option<String>,
    photo: Option<PhotoUpload>,
}

// Pull the known fields out of a multipart body; unknown fields are
// skipped rather than rejected.
async fn read_user_form(mut multipart: Multipart) -> Result<UserForm, (StatusCode, String)> {
    let mut form = UserForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        // Captured up front: reading the field body consumes it
        let field_name = field.name().map(str::to_string);

        match field_name.as_deref() {
            Some("name") => {
                form.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                );
            }
            Some("email") => {
                form.email = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
                );
            }
            Some("photo") => {
                let extension = field
                    .file_name()
                    .and_then(file_extension)
                    .unwrap_or_default();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

                tracing::debug!(
                    "Received photo field: {} bytes, extension '{}', type '{}'",
                    bytes.len(),
                    extension,
                    content_type
                );

                form.photo = Some(PhotoUpload::new(bytes.to_vec(), extension, content_type));
            }
            other => {
                tracing::debug!("Skipping unknown multipart field {:?}", other);
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_registry::ASSET_ROUTE_PREFIX;

    fn sample_user(photo_path: Option<&str>) -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            photo_path: photo_path.map(String::from),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_user_payload_includes_photo_url() {
        let payload = user_payload(sample_user(Some("1700-abc.jpg")));

        assert_eq!(payload["photo_path"], "1700-abc.jpg");
        assert_eq!(
            payload["photo_url"],
            format!("{}/1700-abc.jpg", ASSET_ROUTE_PREFIX.as_str())
        );
    }

    #[test]
    fn test_user_payload_without_photo_has_no_url() {
        let payload = user_payload(sample_user(None));

        assert!(payload.get("photo_path").is_none());
        assert!(payload.get("photo_url").is_none());
        assert_eq!(payload["email"], "ana@example.com");
    }
}
