// Ledger queries: every SQL statement against the verdicts table.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{LedgerStats, VerdictRecord};

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<VerdictRecord> {
    Ok(VerdictRecord {
        content_hash: row.get(0)?,
        path: row.get(1)?,
        approved: row.get(2)?,
        score: row.get(3)?,
        criteria_hash: row.get(4)?,
        recorded_at: row.get(5)?,
    })
}

/// Save or replace the verdict for a content hash.
pub fn upsert_verdict(conn: &Connection, record: &VerdictRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO verdicts (content_hash, path, approved, score, criteria_hash, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(content_hash) DO UPDATE SET
            path = ?2,
            approved = ?3,
            score = ?4,
            criteria_hash = ?5,
            recorded_at = ?6",
        params![
            record.content_hash,
            record.path,
            record.approved,
            record.score,
            record.criteria_hash,
            record.recorded_at,
        ],
    )?;
    Ok(())
}

/// Load the verdict for a content hash.
pub fn get_verdict(conn: &Connection, content_hash: &str) -> Result<Option<VerdictRecord>> {
    let mut stmt = conn.prepare(
        "SELECT content_hash, path, approved, score, criteria_hash, recorded_at
         FROM verdicts WHERE content_hash = ?1",
    )?;
    let result = stmt
        .query_row(params![content_hash], record_from_row)
        .optional()?;
    Ok(result)
}

/// Most recent verdicts, newest first.
pub fn get_recent_verdicts(conn: &Connection, limit: u32) -> Result<Vec<VerdictRecord>> {
    let mut stmt = conn.prepare(
        "SELECT content_hash, path, approved, score, criteria_hash, recorded_at
         FROM verdicts ORDER BY recorded_at DESC, path ASC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit], record_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Totals across the whole ledger.
pub fn get_stats(conn: &Connection) -> Result<LedgerStats> {
    let stats = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(approved), 0),
                COUNT(DISTINCT criteria_hash),
                MAX(recorded_at)
         FROM verdicts",
        [],
        |row| {
            let total: i64 = row.get(0)?;
            let approved: i64 = row.get(1)?;
            let criteria_sets: i64 = row.get(2)?;
            Ok(LedgerStats {
                total: total as u64,
                approved: approved as u64,
                canceled: (total - approved) as u64,
                criteria_sets: criteria_sets as u64,
                last_recorded_at: row.get(3)?,
            })
        },
    )?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        super::super::schema::create_tables(&conn).unwrap();
        conn
    }

    fn record(hash: &str, approved: bool, at: &str) -> VerdictRecord {
        VerdictRecord {
            content_hash: hash.to_string(),
            path: format!("/docs/{hash}.txt"),
            approved,
            score: if approved { 3 } else { 0 },
            criteria_hash: "c1".to_string(),
            recorded_at: at.to_string(),
        }
    }

    #[test]
    fn upsert_then_get() {
        let conn = conn();
        let rec = record("h1", true, "2026-01-01 10:00:00");
        upsert_verdict(&conn, &rec).unwrap();
        assert_eq!(get_verdict(&conn, "h1").unwrap(), Some(rec));
        assert_eq!(get_verdict(&conn, "missing").unwrap(), None);
    }

    #[test]
    fn upsert_replaces_existing_row() {
        let conn = conn();
        upsert_verdict(&conn, &record("h1", true, "2026-01-01 10:00:00")).unwrap();
        let newer = record("h1", false, "2026-01-02 10:00:00");
        upsert_verdict(&conn, &newer).unwrap();
        assert_eq!(get_verdict(&conn, "h1").unwrap(), Some(newer));
        assert_eq!(get_stats(&conn).unwrap().total, 1);
    }

    #[test]
    fn stats_on_empty_ledger() {
        let conn = conn();
        assert_eq!(get_stats(&conn).unwrap(), LedgerStats::default());
    }

    #[test]
    fn stats_and_recent_order() {
        let conn = conn();
        upsert_verdict(&conn, &record("a", true, "2026-01-01 10:00:00")).unwrap();
        upsert_verdict(&conn, &record("b", false, "2026-01-03 10:00:00")).unwrap();
        upsert_verdict(&conn, &record("c", true, "2026-01-02 10:00:00")).unwrap();

        let stats = get_stats(&conn).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.canceled, 1);
        assert_eq!(stats.criteria_sets, 1);
        assert_eq!(stats.last_recorded_at.as_deref(), Some("2026-01-03 10:00:00"));

        let recent = get_recent_verdicts(&conn, 2).unwrap();
        let hashes: Vec<&str> = recent.iter().map(|r| r.content_hash.as_str()).collect();
        assert_eq!(hashes, vec!["b", "c"]);
    }
}
