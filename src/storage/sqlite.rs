use crate::model::{JobRecord, StorageError, StoredJob, join_skills, parse_date_field, split_skills};
use rusqlite::{Connection, Row, params};

/// Document operations the pipeline needs from a job store.
pub trait JobStore {
    /// Appends a record, returning its id.
    fn insert_job(&self, record: &JobRecord) -> Result<i64, StorageError>;

    /// Records whose skills are absent or empty but which carry a description.
    fn find_missing_skills(&self) -> Result<Vec<StoredJob>, StorageError>;

    /// Sets `Skills` on one record if it is still unset. Returns whether a row changed.
    fn update_skills(&self, id: i64, skills: &[String]) -> Result<bool, StorageError>;

    fn get_all_jobs(&self) -> Result<Vec<JobRecord>, StorageError>;
}

const COLUMNS: &str = r#"id, "Job Title", "Description", "Location", "Country", "Company",
    "Date", "Salary", "URL", "Skills""#;

const MISSING_SKILLS: &str = r#"("Skills" IS NULL OR "Skills" = '') AND "Description" IS NOT NULL"#;

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database and creates or migrates the `job_offers` table.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS job_offers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                "Job Title" TEXT NOT NULL DEFAULT '',
                "Description" TEXT,
                "Location" TEXT NOT NULL DEFAULT '',
                "Country" TEXT NOT NULL DEFAULT 'Unknown',
                "Company" TEXT NOT NULL DEFAULT '',
                "Date" TEXT,
                "Salary" INTEGER,
                "URL" TEXT NOT NULL DEFAULT '',
                "Skills" TEXT
            );
            "#,
        )?;

        // Databases created before the Country column existed.
        Self::migrate_add_column_if_missing(&conn, "job_offers", "Country", "TEXT NOT NULL DEFAULT 'Unknown'")?;
        conn.execute_batch(r#"CREATE INDEX IF NOT EXISTS idx_job_offers_skills ON job_offers("Skills");"#)?;

        Ok(Self { conn })
    }

    /// Adds a column to the table when it does not exist yet.
    fn migrate_add_column_if_missing(
        conn: &Connection,
        table: &str,
        column: &str,
        column_def: &str,
    ) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing_columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !existing_columns.iter().any(|c| c == column) {
            let alter_sql = format!(r#"ALTER TABLE {} ADD COLUMN "{}" {}"#, table, column, column_def);
            conn.execute(&alter_sql, [])?;
        }

        Ok(())
    }

    pub fn get_job(&self, id: i64) -> Result<StoredJob, StorageError> {
        let sql = format!("SELECT {} FROM job_offers WHERE id = ?1", COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Self::map_job(row)?),
            None => Err(StorageError::NotFound(id)),
        }
    }

    /// Closes the connection, reporting any error SQLite raises on shutdown.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Database(e))
    }

    fn query_jobs(&self, sql: &str) -> Result<Vec<StoredJob>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], Self::map_job)?;
        let mut jobs = Vec::new();
        for job in rows {
            jobs.push(job?);
        }
        Ok(jobs)
    }

    fn map_job(row: &Row) -> Result<StoredJob, rusqlite::Error> {
        let date: Option<String> = row.get(6)?;
        let salary: Option<i64> = row.get(7)?;
        let skills: Option<String> = row.get(9)?;

        Ok(StoredJob {
            id: row.get(0)?,
            record: JobRecord {
                title: row.get(1)?,
                description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                location: row.get(3)?,
                country: row.get(4)?,
                company: row.get(5)?,
                posted_date: parse_date_field(date.as_deref()),
                salary_annual: salary.and_then(|s| u64::try_from(s).ok()),
                url: row.get(8)?,
                skills: split_skills(skills.as_deref()),
            },
        })
    }
}

impl JobStore for SqliteStorage {
    fn insert_job(&self, record: &JobRecord) -> Result<i64, StorageError> {
        self.conn.execute(
            r#"INSERT INTO job_offers (
                "Job Title", "Description", "Location", "Country", "Company",
                "Date", "Salary", "URL", "Skills"
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
            params![
                &record.title,
                &record.description,
                &record.location,
                &record.country,
                &record.company,
                record.date_field(),
                record.salary_annual.and_then(|s| i64::try_from(s).ok()),
                &record.url,
                record.skills_field(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_missing_skills(&self) -> Result<Vec<StoredJob>, StorageError> {
        self.query_jobs(&format!(
            "SELECT {} FROM job_offers WHERE {} ORDER BY id",
            COLUMNS, MISSING_SKILLS
        ))
    }

    fn update_skills(&self, id: i64, skills: &[String]) -> Result<bool, StorageError> {
        let Some(joined) = join_skills(skills) else {
            return Ok(false);
        };
        let changed = self.conn.execute(
            r#"UPDATE job_offers SET "Skills" = ?1
               WHERE id = ?2 AND ("Skills" IS NULL OR "Skills" = '')"#,
            params![joined, id],
        )?;
        Ok(changed > 0)
    }

    fn get_all_jobs(&self) -> Result<Vec<JobRecord>, StorageError> {
        let jobs = self.query_jobs(&format!("SELECT {} FROM job_offers ORDER BY id", COLUMNS))?;
        Ok(jobs.into_iter().map(|j| j.record).collect())
    }
}
