use chrono::NaiveDateTime;
use serde::Serialize;

use crate::auth::Role;
use crate::report::{Page, ReportRow};

pub const WORK_HOURS_REPORT: &str = "work_hours_report";

/// Attribute bag handed to the view collaborator alongside the template
/// name. The report data plus the echoed query parameters and the resolved
/// identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportViewModel {
    pub report_data: Page<ReportRow>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub current_page: u32,
    pub page_size: u32,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
struct View<T: Serialize> {
    template: &'static str,
    attributes: T,
}

/// The core has no opinion on rendering technology; the named template plus
/// its attributes go out as JSON for whatever renders them.
pub fn work_hours_report(model: ReportViewModel) -> warp::reply::Json {
    warp::reply::json(&View {
        template: WORK_HOURS_REPORT,
        attributes: model,
    })
}
