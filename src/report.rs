use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;

use crate::error::ReportError;

/// Half-open query window `[start, end)`. A record matches iff its
/// `time_from >= start` and its `time_to < end`; an absent bound leaves that
/// side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Window {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Zero-based page index plus page size. A zero size is rejected at
/// construction, so a `PageRequest` handed to the queries is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Result<Self, ReportError> {
        if size == 0 {
            return Err(ReportError::InvalidPagination);
        }

        Ok(PageRequest { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

/// Aggregated total hours for one (employee, project) pair within a window.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub employee_name: String,
    pub project_name: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
}

const SELECT_REPORT: &str = "SELECT e.name AS employee_name, p.name AS project_name, \
     SUM((strftime('%s', tr.time_to) - strftime('%s', tr.time_from)) / 3600.0) AS total_hours \
     FROM time_record tr \
     JOIN employee e ON tr.employee_id = e.id \
     JOIN project p ON tr.project_id = p.id \
     WHERE (?1 IS NULL OR tr.time_from >= ?1) \
     AND (?2 IS NULL OR tr.time_to < ?2) \
     AND (?3 IS NULL OR e.name = ?3) \
     GROUP BY e.name, p.name \
     ORDER BY e.name, p.name \
     LIMIT ?4 OFFSET ?5";

const COUNT_REPORT: &str = "SELECT COUNT(*) FROM ( \
     SELECT 1 \
     FROM time_record tr \
     JOIN employee e ON tr.employee_id = e.id \
     JOIN project p ON tr.project_id = p.id \
     WHERE (?1 IS NULL OR tr.time_from >= ?1) \
     AND (?2 IS NULL OR tr.time_to < ?2) \
     AND (?3 IS NULL OR e.name = ?3) \
     GROUP BY e.name, p.name)";

/// Total hours per (employee, project) pair for every employee, sorted by
/// employee name then project name.
pub async fn all_report(
    pool: &SqlitePool,
    window: Window,
    page: PageRequest,
) -> Result<Page<ReportRow>, ReportError> {
    aggregate(pool, window, None, page).await
}

/// Same aggregation restricted to one employee by exact, case-sensitive name
/// match. An unknown employee yields an empty page, never an error.
pub async fn employee_report(
    pool: &SqlitePool,
    username: &str,
    window: Window,
    page: PageRequest,
) -> Result<Page<ReportRow>, ReportError> {
    aggregate(pool, window, Some(username), page).await
}

// Single entry point both query shapes share; swapping the store means
// swapping this one statement pair.
async fn aggregate(
    pool: &SqlitePool,
    window: Window,
    employee: Option<&str>,
    page: PageRequest,
) -> Result<Page<ReportRow>, ReportError> {
    let content = sqlx::query_as::<_, ReportRow>(SELECT_REPORT)
        .bind(window.start)
        .bind(window.end)
        .bind(employee)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    let total_elements = sqlx::query_scalar::<_, i64>(COUNT_REPORT)
        .bind(window.start)
        .bind(window.end)
        .bind(employee)
        .fetch_one(pool)
        .await?;

    Ok(Page {
        content,
        page: page.page(),
        size: page.size(),
        total_elements,
        total_pages: total_pages(total_elements, page.size()),
    })
}

fn total_pages(total_elements: i64, size: u32) -> u32 {
    if total_elements <= 0 {
        return 0;
    }

    ((total_elements as u64 + u64::from(size) - 1) / u64::from(size)) as u32
}
