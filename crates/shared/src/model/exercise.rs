use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", check("../../../server/migrations/002-exercise/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
}

impl NewExercise {
    pub fn new<I: Into<Uuid>, T: Into<String>>(
        id: I,
        user_id: I,
        description: T,
        duration: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            description: description.into(),
            duration,
            date,
        }
    }
}

/// Log-listing projection of an exercise row, everything but the owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct ExerciseLogEntry {
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
    pub id: Uuid,
}

/// Inclusive calendar-date bounds, either end optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// The only filter shape the exercise repository understands. Handlers build
/// one of these; the repository owns the translation to SQL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseFilter {
    pub user_id: Uuid,
    pub date_range: DateRange,
}

#[cfg(feature = "backend")]
impl ExerciseFilter {
    fn apply(&self, query: &mut SelectStatement) {
        query.and_where(Expr::col(ExerciseIden::UserId).eq(&self.user_id));

        let DateRange { from, to } = self.date_range;
        match (from, to) {
            (Some(from), Some(to)) => {
                query.and_where(Expr::col(ExerciseIden::Date).between(from, to));
            },
            (Some(from), None) => {
                query.and_where(Expr::col(ExerciseIden::Date).gte(from));
            },
            (None, Some(to)) => {
                query.and_where(Expr::col(ExerciseIden::Date).lte(to));
            },
            (None, None) => {},
        }
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    pub fn create(
        conn: &mut Connection,
        new_exercise: NewExercise,
    ) -> Result<Exercise, rusqlite::Error> {
        let tx = conn.transaction()?;
        let exercise = {
            new_exercise.insert(&tx)?;
            Exercise::fetch_by_id(&tx, &new_exercise.id)?
        };
        tx.commit()?;

        Ok(exercise)
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Exercise, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row)?;
        Ok(exercise)
    }

    /// Number of exercises matching the filter, regardless of any limit the
    /// caller will apply when fetching
    pub fn count_where(conn: &Connection, filter: &ExerciseFilter) -> Result<i64, rusqlite::Error> {
        let mut query = Query::select();
        query
            .expr(Expr::col(ExerciseIden::Id).count())
            .from(ExerciseIden::Table);
        filter.apply(&mut query);

        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let count = stmt.query_row(&*values.as_params(), |row| row.get(0))?;
        Ok(count)
    }

    /// Matching log entries ordered by date ascending, up to `limit` when one
    /// is given
    pub fn find_where(
        conn: &Connection,
        filter: &ExerciseFilter,
        limit: Option<u64>,
    ) -> Result<Vec<ExerciseLogEntry>, rusqlite::Error> {
        let mut query = Query::select();
        query
            .columns([
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
                ExerciseIden::Id,
            ])
            .from(ExerciseIden::Table)
            .order_by(ExerciseIden::Date, Order::Asc);
        filter.apply(&mut query);

        if let Some(limit) = limit {
            query.limit(limit);
        }

        let (sql, values) = query.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let entries = stmt
            .query_map(&*values.as_params(), ExerciseLogEntry::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(entries)
    }
}
