use sqlx::{Pool, Postgres, Row};

/// Compares a live PostgreSQL table against the column layout the crate
/// expects, mapping mismatches through the caller's error constructor.
pub(crate) async fn validate_postgres_table_schema<E>(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let rows = sqlx::query(
        "SELECT column_name, data_type FROM information_schema.columns
         WHERE table_name = $1",
    )
    .bind(table_name)
    .fetch_all(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    if rows.is_empty() {
        return Err(error_mapper(format!(
            "Schema validation failed: table '{table_name}' does not exist"
        )));
    }

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("column_name"), row.get("data_type")))
        .collect();

    for (expected_name, expected_type) in expected_columns {
        match actual_columns.iter().find(|(name, _)| name == expected_name) {
            Some((_, actual_type)) if actual_type == expected_type => {}
            Some((_, actual_type)) => {
                return Err(error_mapper(format!(
                    "Schema validation failed: column '{expected_name}' has type \
                     '{actual_type}' but expected '{expected_type}'"
                )));
            }
            None => {
                return Err(error_mapper(format!(
                    "Schema validation failed: missing column '{expected_name}'"
                )));
            }
        }
    }

    // Extra columns are tolerated but worth knowing about
    for (actual_name, _) in &actual_columns {
        if !expected_columns.iter().any(|(name, _)| name == actual_name) {
            tracing::warn!("Extra column '{}' in table '{}'", actual_name, table_name);
        }
    }

    Ok(())
}
