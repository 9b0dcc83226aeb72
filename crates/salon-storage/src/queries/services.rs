// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service queries.

use rusqlite::params;
use salon_core::{SalonError, Service, ServiceDraft};

use crate::database::Database;

const COLUMNS: &str =
    "id, category_id, title_es, title_en, description_es, description_en, price, image_url";

fn service_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        category_id: row.get(1)?,
        title_es: row.get(2)?,
        title_en: row.get(3)?,
        description_es: row.get(4)?,
        description_en: row.get(5)?,
        price: row.get(6)?,
        image_url: row.get(7)?,
    })
}

/// List services ordered by id, optionally restricted to one category.
pub async fn list_services(
    db: &Database,
    category_id: Option<i64>,
) -> Result<Vec<Service>, SalonError> {
    db.connection()
        .call(move |conn| match category_id {
            Some(category_id) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {COLUMNS} FROM services WHERE category_id = ?1 ORDER BY id ASC"
                ))?;
                let rows = stmt.query_map(params![category_id], service_row)?;
                rows.collect()
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {COLUMNS} FROM services ORDER BY id ASC"))?;
                let rows = stmt.query_map([], service_row)?;
                rows.collect()
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a service by id.
pub async fn get_service(db: &Database, id: i64) -> Result<Option<Service>, SalonError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {COLUMNS} FROM services WHERE id = ?1"),
                params![id],
                service_row,
            );
            match result {
                Ok(service) => Ok(Some(service)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a service and return its id.
pub async fn create_service(
    db: &Database,
    category_id: i64,
    draft: &ServiceDraft,
    image_url: Option<&str>,
) -> Result<i64, SalonError> {
    let draft = draft.clone();
    let image_url = image_url.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO services (category_id, title_es, title_en, description_es,
                     description_en, price, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    category_id,
                    draft.title_es,
                    draft.title_en,
                    draft.description_es,
                    draft.description_en,
                    draft.price,
                    image_url,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite every editable column of a service. Returns whether a row matched.
pub async fn update_service(
    db: &Database,
    id: i64,
    category_id: i64,
    draft: &ServiceDraft,
    image_url: Option<&str>,
) -> Result<bool, SalonError> {
    let draft = draft.clone();
    let image_url = image_url.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE services SET category_id = ?1, title_es = ?2, title_en = ?3,
                     description_es = ?4, description_en = ?5, price = ?6, image_url = ?7
                 WHERE id = ?8",
                params![
                    category_id,
                    draft.title_es,
                    draft.title_en,
                    draft.description_es,
                    draft.description_en,
                    draft.price,
                    image_url,
                    id,
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a service. Returns whether a row matched.
pub async fn delete_service(db: &Database, id: i64) -> Result<bool, SalonError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::categories::{create_category, delete_category};
    use salon_core::NewCategory;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir, i64) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let cat = create_category(
            &db,
            &NewCategory {
                name_es: "Uñas".to_string(),
                name_en: "Nails".to_string(),
            },
        )
        .await
        .unwrap();
        (db, dir, cat)
    }

    fn draft(title: &str, price: f64) -> ServiceDraft {
        ServiceDraft {
            category_id: None,
            title_es: format!("{title} es"),
            title_en: title.to_string(),
            description_es: "Descripción".to_string(),
            description_en: "Description".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn create_and_list_services_by_category() {
        let (db, _dir, cat) = setup_db().await;
        let a = create_service(&db, cat, &draft("Soft gel", 25.0), Some("/images/a.jpg"))
            .await
            .unwrap();
        let b = create_service(&db, cat, &draft("Kapping", 30.0), None).await.unwrap();

        let services = list_services(&db, Some(cat)).await.unwrap();
        assert_eq!(services.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(services[0].image_url.as_deref(), Some("/images/a.jpg"));
        assert!(services[1].image_url.is_none());
        assert!(list_services(&db, Some(cat + 1)).await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (db, _dir, cat) = setup_db().await;
        let id = create_service(&db, cat, &draft("Soft gel", 25.0), None).await.unwrap();

        assert!(update_service(&db, id, cat, &draft("Acrylic", 40.0), Some("/images/b.png"))
            .await
            .unwrap());
        let svc = get_service(&db, id).await.unwrap().unwrap();
        assert_eq!(svc.title_en, "Acrylic");
        assert_eq!(svc.price, 40.0);
        assert_eq!(svc.image_url.as_deref(), Some("/images/b.png"));

        assert!(!update_service(&db, id + 9, cat, &draft("x", 1.0), None).await.unwrap());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn non_positive_price_is_rejected_by_schema() {
        let (db, _dir, cat) = setup_db().await;
        let result = create_service(&db, cat, &draft("Free", 0.0), None).await;
        assert!(result.is_err());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn deleting_category_cascades_to_services() {
        let (db, _dir, cat) = setup_db().await;
        create_service(&db, cat, &draft("Soft gel", 25.0), None).await.unwrap();
        assert!(delete_category(&db, cat).await.unwrap());
        assert!(list_services(&db, None).await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_service_reports_missing() {
        let (db, _dir, cat) = setup_db().await;
        let id = create_service(&db, cat, &draft("Soft gel", 25.0), None).await.unwrap();
        assert!(delete_service(&db, id).await.unwrap());
        assert!(get_service(&db, id).await.unwrap().is_none());
        assert!(!delete_service(&db, id).await.unwrap());
        db.close().await.unwrap();
    }
}
