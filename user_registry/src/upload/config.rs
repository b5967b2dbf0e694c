use std::{env, sync::LazyLock};

/// Upload size ceiling in bytes
///
/// Default: 5 MiB
pub static UPLOAD_MAX_BYTES: LazyLock<usize> = LazyLock::new(|| {
    env::var("UPLOAD_MAX_BYTES")
        .ok()
        .and_then(|v| match v.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("Invalid UPLOAD_MAX_BYTES: {}. Using default", v);
                None
            }
        })
        .unwrap_or(5 * 1024 * 1024)
});

/// Allowed photo formats as file extensions, comma separated
///
/// Default: jpeg,jpg,png,gif
pub(super) static UPLOAD_ALLOWED_TYPES: LazyLock<Vec<String>> = LazyLock::new(|| {
    match env::var("UPLOAD_ALLOWED_TYPES") {
        Ok(v) => {
            let types: Vec<String> = v
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if types.is_empty() {
                tracing::warn!("Empty UPLOAD_ALLOWED_TYPES. Using default");
                default_allowed_types()
            } else {
                types
            }
        }
        Err(_) => default_allowed_types(),
    }
});

fn default_allowed_types() -> Vec<String> {
    ["jpeg", "jpg", "png", "gif"]
        .into_iter()
        .map(String::from)
        .collect()
}
