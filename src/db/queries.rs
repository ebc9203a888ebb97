use crate::db::Database;
use crate::error::{Result, SoilCheckError};
use crate::models::{AnalysisResult, Classification, Report, Suitability, User};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use tracing::warn;

fn timestamp(dt: &DateTime<Utc>) -> String {
    // Fixed width so lexical order matches chronological order
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(
    column: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, err.into())
}

// User Queries

impl Database {
    pub fn create_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                r#"
                INSERT INTO users (id, name, email, password_hash, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    user.id,
                    user.name,
                    user.email,
                    user.password_hash,
                    timestamp(&user.created_at),
                ],
            );

            match inserted {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    Err(SoilCheckError::AlreadyExists)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM users WHERE email = ?1",
                [email],
                row_to_user,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let created_at_str: String = row.get("created_at")?;

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Report Queries

impl Database {
    pub fn insert_report(&self, report: &Report) -> Result<()> {
        let result = &report.result;
        let behavior = serde_json::to_string(&result.behavior)?;
        let risks = serde_json::to_string(&result.risks)?;
        let recommendations = serde_json::to_string(&result.recommendations)?;
        let parameters = serde_json::to_string(&result.parameters)?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO reports
                    (id, user_id, user_email, classification, suitability, suitability_text,
                     behavior, risks, recommendations, parameters, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                params![
                    report.id,
                    report.user_id,
                    report.user_email,
                    result.classification.as_str(),
                    result.suitability.as_str(),
                    result.suitability_text,
                    behavior,
                    risks,
                    recommendations,
                    parameters,
                    timestamp(&report.created_at),
                ],
            )?;
            Ok(())
        })
    }

    /// All reports owned by a user, newest first.
    pub fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<Report>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM reports WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )?;
            let reports = stmt
                .query_map([user_id], row_to_report)?
                .filter_map(|r| match r {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!(user_id, error = %e, "Skipping unreadable report row");
                        None
                    }
                })
                .collect();
            Ok(reports)
        })
    }

    pub fn get_report_for_user(&self, user_id: &str, report_id: &str) -> Result<Option<Report>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM reports WHERE id = ?1 AND user_id = ?2",
                [report_id, user_id],
                row_to_report,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn json_column<T: DeserializeOwned>(row: &Row, column: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    let index = row.as_ref().column_index(column)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(index, e))
}

fn row_to_report(row: &Row) -> rusqlite::Result<Report> {
    let classification_str: String = row.get("classification")?;
    let suitability_str: String = row.get("suitability")?;
    let created_at_str: String = row.get("created_at")?;

    let classification = Classification::from_str(&classification_str).ok_or_else(|| {
        conversion_error(0, format!("unknown classification '{}'", classification_str))
    })?;
    let suitability = Suitability::from_str(&suitability_str).ok_or_else(|| {
        conversion_error(0, format!("unknown suitability '{}'", suitability_str))
    })?;

    Ok(Report {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        user_email: row.get("user_email")?,
        result: AnalysisResult {
            classification,
            behavior: json_column(row, "behavior")?,
            suitability,
            suitability_text: row.get("suitability_text")?,
            risks: json_column(row, "risks")?,
            recommendations: json_column(row, "recommendations")?,
            parameters: json_column(row, "parameters")?,
        },
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                warn!(created_at = %created_at_str, "Invalid created_at in database, using now");
                Utc::now()
            }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SuitabilityEngine;
    use crate::models::SoilSample;
    use chrono::Duration;

    fn user(email: &str) -> User {
        User::new("Test User", email, "hash".into())
    }

    fn analysis(pi: f64) -> AnalysisResult {
        SuitabilityEngine::new().analyze(&SoilSample {
            plasticity_index: pi,
            fines: 60.0,
            liquid_limit: 40.0,
            ..Default::default()
        })
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&user("a@example.com")).unwrap();

        let err = db.create_user(&user("a@example.com")).unwrap_err();
        assert!(matches!(err, SoilCheckError::AlreadyExists));
    }

    #[test]
    fn find_user_by_email() {
        let db = Database::open_in_memory().unwrap();
        let u = user("b@example.com");
        db.create_user(&u).unwrap();

        let found = db.find_user_by_email("b@example.com").unwrap().unwrap();
        assert_eq!(found.id, u.id);
        assert_eq!(found.name, "Test User");
        assert!(db.find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn reports_round_trip_through_storage() {
        let db = Database::open_in_memory().unwrap();
        let u = user("c@example.com");
        db.create_user(&u).unwrap();

        let report = Report::new(&u.id, &u.email, analysis(30.0));
        db.insert_report(&report).unwrap();

        let stored = db.get_report_for_user(&u.id, &report.id).unwrap().unwrap();
        assert_eq!(stored.result, report.result);
        assert_eq!(stored.user_email, "c@example.com");
    }

    #[test]
    fn reports_are_listed_newest_first_per_user() {
        let db = Database::open_in_memory().unwrap();
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");
        db.create_user(&alice).unwrap();
        db.create_user(&bob).unwrap();

        let now = Utc::now();
        let older = Report::new(&alice.id, &alice.email, analysis(5.0))
            .with_created_at(now - Duration::hours(2));
        let newer = Report::new(&alice.id, &alice.email, analysis(40.0))
            .with_created_at(now - Duration::minutes(5));
        let bobs = Report::new(&bob.id, &bob.email, analysis(10.0));

        db.insert_report(&older).unwrap();
        db.insert_report(&bobs).unwrap();
        db.insert_report(&newer).unwrap();

        let listed = db.list_reports_for_user(&alice.id).unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);

        assert_eq!(db.list_reports_for_user(&bob.id).unwrap().len(), 1);
    }

    #[test]
    fn report_is_not_visible_to_other_users() {
        let db = Database::open_in_memory().unwrap();
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");
        db.create_user(&alice).unwrap();
        db.create_user(&bob).unwrap();

        let report = Report::new(&alice.id, &alice.email, analysis(5.0));
        db.insert_report(&report).unwrap();

        assert!(db.get_report_for_user(&bob.id, &report.id).unwrap().is_none());
    }
}
