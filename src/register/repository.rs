//! Data access for risk records

use rusqlite::{Row, params};

use super::db::RegisterDb;
use super::error::RegisterError;
use super::models::{RiskId, RiskRecord};

/// Persistence contract for risk records
///
/// Update and delete do not report whether a row matched: both succeed on a
/// missing id without touching anything. Only `get` surfaces `NotFound`.
pub trait RiskStore: Send + Sync {
    /// Insert a record, ignoring its `id`, and return it with the assigned id
    fn create(&self, record: &RiskRecord) -> Result<RiskRecord, RegisterError>;

    /// Fetch one record
    fn get(&self, id: RiskId) -> Result<RiskRecord, RegisterError>;

    /// All records; order is not part of the contract
    fn list(&self) -> Result<Vec<RiskRecord>, RegisterError>;

    /// Replace every field except `id`; a missing id is a successful no-op
    fn update(&self, id: RiskId, record: &RiskRecord) -> Result<RiskRecord, RegisterError>;

    /// Remove a record; a missing id is a successful no-op
    fn delete(&self, id: RiskId) -> Result<(), RegisterError>;
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, item_name, risk_id, risk_description, likelihood, impact, risk_score,
           mitigation_actions, responsible_person, responsible_department,
           target_completion_date, status, stakeholders
    FROM risks
"#;

/// SQLite-backed [`RiskStore`]
#[derive(Clone)]
pub struct RiskRepository {
    db: RegisterDb,
}

impl RiskRepository {
    pub fn new(db: RegisterDb) -> Self {
        Self { db }
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RiskRecord> {
        // Columns inserted through raw SQL may be NULL; read them as zero values
        Ok(RiskRecord {
            id: row.get(0)?,
            item_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            risk_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            risk_description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            likelihood: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
            impact: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
            risk_score: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
            mitigation_actions: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            responsible_person: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            responsible_department: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            target_completion_date: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
            status: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
            stakeholders: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
        })
    }
}

impl RiskStore for RiskRepository {
    fn create(&self, record: &RiskRecord) -> Result<RiskRecord, RegisterError> {
        let conn = self.db.conn()?;
        conn.execute(
            r#"
            INSERT INTO risks (item_name, risk_id, risk_description, likelihood, impact, risk_score,
                               mitigation_actions, responsible_person, responsible_department,
                               target_completion_date, status, stakeholders)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                record.item_name,
                record.risk_id,
                record.risk_description,
                record.likelihood,
                record.impact,
                record.risk_score,
                record.mitigation_actions,
                record.responsible_person,
                record.responsible_department,
                record.target_completion_date,
                record.status,
                record.stakeholders,
            ],
        )?;
        // Same guard as the insert, so no other writer can move the rowid
        let id = conn.last_insert_rowid();
        Ok(record.clone().with_id(id))
    }

    fn get(&self, id: RiskId) -> Result<RiskRecord, RegisterError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        match stmt.query_row(params![id], Self::row_to_record) {
            Ok(record) => Ok(record),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RegisterError::NotFound { id }),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<RiskRecord>, RegisterError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn update(&self, id: RiskId, record: &RiskRecord) -> Result<RiskRecord, RegisterError> {
        let conn = self.db.conn()?;
        // Row count is deliberately not checked: a missing id is not an error
        conn.execute(
            r#"
            UPDATE risks SET
                item_name = ?2,
                risk_id = ?3,
                risk_description = ?4,
                likelihood = ?5,
                impact = ?6,
                risk_score = ?7,
                mitigation_actions = ?8,
                responsible_person = ?9,
                responsible_department = ?10,
                target_completion_date = ?11,
                status = ?12,
                stakeholders = ?13
            WHERE id = ?1
            "#,
            params![
                id,
                record.item_name,
                record.risk_id,
                record.risk_description,
                record.likelihood,
                record.impact,
                record.risk_score,
                record.mitigation_actions,
                record.responsible_person,
                record.responsible_department,
                record.target_completion_date,
                record.status,
                record.stakeholders,
            ],
        )?;
        Ok(record.clone().with_id(id))
    }

    fn delete(&self, id: RiskId) -> Result<(), RegisterError> {
        let conn = self.db.conn()?;
        conn.execute("DELETE FROM risks WHERE id = ?1", params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RiskRepository {
        RiskRepository::new(RegisterDb::open_in_memory().unwrap())
    }

    fn sample(name: &str) -> RiskRecord {
        RiskRecord {
            id: 0,
            item_name: name.to_string(),
            risk_id: "R-001".to_string(),
            risk_description: "Disk failure on primary host".to_string(),
            likelihood: 3,
            impact: 4,
            risk_score: 7,
            mitigation_actions: "RAID + nightly backups".to_string(),
            responsible_person: "Dana".to_string(),
            responsible_department: "Operations".to_string(),
            target_completion_date: "2026-12-01".to_string(),
            status: "Open".to_string(),
            stakeholders: "IT, Finance".to_string(),
        }
    }

    #[test]
    fn test_create_then_get_roundtrip() {
        let repo = repo();
        let input = sample("Server");

        let created = repo.create(&input).unwrap();
        let fetched = repo.get(created.id).unwrap();

        assert!(created.id > 0);
        assert_eq!(fetched, created);
        assert!(fetched.same_content(&input));
    }

    #[test]
    fn test_create_ignores_client_id() {
        let repo = repo();
        let created = repo.create(&sample("Server").with_id(999)).unwrap();

        assert_ne!(created.id, 999);
        assert!(matches!(repo.get(999), Err(RegisterError::NotFound { id: 999 })));
    }

    #[test]
    fn test_ids_are_distinct_and_increasing() {
        let repo = repo();
        let a = repo.create(&sample("A")).unwrap();
        let b = repo.create(&sample("B")).unwrap();
        repo.delete(b.id).unwrap();
        let c = repo.create(&sample("C")).unwrap();

        assert!(b.id > a.id);
        // AUTOINCREMENT never hands out a deleted id again
        assert!(c.id > b.id);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let repo = repo();
        let err = repo.get(42).unwrap_err();
        assert!(matches!(err, RegisterError::NotFound { id: 42 }));
    }

    #[test]
    fn test_list_empty_is_empty() {
        assert!(repo().list().unwrap().is_empty());
    }

    #[test]
    fn test_list_after_creates_and_deletes() {
        let repo = repo();
        let ids: Vec<_> = (0..5)
            .map(|i| repo.create(&sample(&format!("Item {i}"))).unwrap().id)
            .collect();
        repo.delete(ids[1]).unwrap();
        repo.delete(ids[3]).unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|r| r.id != ids[1] && r.id != ids[3]));
    }

    #[test]
    fn test_update_replaces_all_fields_but_id() {
        let repo = repo();
        let created = repo.create(&sample("Server")).unwrap();

        let mut changed = sample("Router").with_id(555);
        changed.status = "Closed".to_string();
        changed.risk_score = 1;
        let returned = repo.update(created.id, &changed).unwrap();

        let stored = repo.get(created.id).unwrap();
        assert_eq!(returned.id, created.id);
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.item_name, "Router");
        assert_eq!(stored.status, "Closed");
        assert_eq!(stored.risk_score, 1);
        assert!(matches!(repo.get(555), Err(RegisterError::NotFound { .. })));
    }

    #[test]
    fn test_update_is_idempotent() {
        let repo = repo();
        let created = repo.create(&sample("Server")).unwrap();
        let payload = sample("Patched");

        repo.update(created.id, &payload).unwrap();
        let first = repo.list().unwrap();
        repo.update(created.id, &payload).unwrap();
        let second = repo.list().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_update_and_delete_missing_are_noops() {
        let repo = repo();
        let existing = repo.create(&sample("Server")).unwrap();

        let returned = repo.update(777, &sample("Ghost")).unwrap();
        repo.delete(778).unwrap();

        assert_eq!(returned.item_name, "Ghost");
        assert_eq!(returned.id, 777);
        assert_eq!(repo.list().unwrap(), vec![existing]);
    }

    #[test]
    fn test_null_columns_read_as_defaults() {
        let db = RegisterDb::open_in_memory().unwrap();
        db.conn()
            .unwrap()
            .execute("INSERT INTO risks (item_name) VALUES ('Bare')", [])
            .unwrap();

        let records = RiskRepository::new(db).list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_name, "Bare");
        assert_eq!(records[0].likelihood, 0);
        assert_eq!(records[0].stakeholders, "");
    }
}
