// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service category queries.

use rusqlite::params;
use salon_core::{Category, NewCategory, SalonError};

use crate::database::Database;

fn category_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name_es: row.get(1)?,
        name_en: row.get(2)?,
        active: row.get(3)?,
    })
}

/// List categories ordered by id, optionally only active ones.
pub async fn list_categories(db: &Database, active_only: bool) -> Result<Vec<Category>, SalonError> {
    db.connection()
        .call(move |conn| {
            let sql = if active_only {
                "SELECT id, name_es, name_en, active FROM service_categories
                 WHERE active = 1 ORDER BY id ASC"
            } else {
                "SELECT id, name_es, name_en, active FROM service_categories ORDER BY id ASC"
            };
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], category_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a category by id.
pub async fn get_category(db: &Database, id: i64) -> Result<Option<Category>, SalonError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name_es, name_en, active FROM service_categories WHERE id = ?1",
                params![id],
                category_row,
            );
            match result {
                Ok(category) => Ok(Some(category)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Create an active category and return its id.
pub async fn create_category(db: &Database, category: &NewCategory) -> Result<i64, SalonError> {
    let category = category.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO service_categories (name_es, name_en) VALUES (?1, ?2)",
                params![category.name_es, category.name_en],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a category; its services go with it (ON DELETE CASCADE).
pub async fn delete_category(db: &Database, id: i64) -> Result<bool, SalonError> {
    db.connection()
        .call(move |conn| {
            let changed =
                conn.execute("DELETE FROM service_categories WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
