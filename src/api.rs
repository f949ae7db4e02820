use std::convert::Infallible;

use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::sqlite::SqlitePool;
use warp::http::StatusCode;
use warp::reply::Reply;
use warp::{Filter, Rejection};

use crate::auth::{self, Caller, Visibility};
use crate::error::ReportError;
use crate::report::{self, PageRequest, Window};
use crate::view::{self, ReportViewModel};

fn default_page() -> u32 {
    0
}

fn default_size() -> u32 {
    10
}

/// Query parameters of the report endpoint. Unknown parameters are ignored,
/// so a client-supplied employee name can never reach the query layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportParams {
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

#[derive(Debug)]
enum AuthRejection {
    MissingIdentity,
    MissingRole,
}

impl warp::reject::Reject for AuthRejection {}

fn with_pool(
    pool: SqlitePool,
) -> impl Filter<Extract = (SqlitePool,), Error = Infallible> + Clone {
    warp::any().map(move || pool.clone())
}

// The authentication provider resolves the caller upstream and forwards the
// result as headers; this filter only terminates that contract.
fn with_caller() -> impl Filter<Extract = (Caller,), Error = Rejection> + Clone {
    warp::header::optional::<String>("x-auth-user")
        .and(warp::header::optional::<String>("x-auth-roles"))
        .and_then(authenticate)
}

async fn authenticate(
    username: Option<String>,
    roles: Option<String>,
) -> Result<Caller, Rejection> {
    let username =
        username.ok_or_else(|| warp::reject::custom(AuthRejection::MissingIdentity))?;
    let roles = roles.unwrap_or_default();
    let caller = Caller::new(username, roles.split(',').map(str::trim));

    if !caller.has_role() {
        return Err(warp::reject::custom(AuthRejection::MissingRole));
    }

    Ok(caller)
}

// Filters
pub fn get_report(
    pool: SqlitePool,
) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
    warp::path!("web" / "reports")
        .and(warp::get())
        .and(warp::query::<ReportParams>())
        .and(with_caller())
        .and(with_pool(pool))
        .and_then(report_handler)
}

pub fn routes(
    pool: SqlitePool,
) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
    get_report(pool)
}

// Handlers
async fn report_handler(
    params: ReportParams,
    caller: Caller,
    pool: SqlitePool,
) -> Result<warp::reply::Response, Infallible> {
    let page = match PageRequest::new(params.page, params.size) {
        Ok(page) => page,
        Err(err) => {
            return Ok(
                warp::reply::with_status(err.to_string(), StatusCode::BAD_REQUEST)
                    .into_response(),
            )
        }
    };
    let window = Window {
        start: params.start_date,
        end: params.end_date,
    };

    tracing::info!(
        username = %caller.username,
        role = caller.effective_role().name(),
        page = params.page,
        size = params.size,
        "report requested"
    );

    let result = match auth::resolve_visibility(&caller) {
        Visibility::All => report::all_report(&pool, window, page).await,
        Visibility::OwnRecords => {
            report::employee_report(&pool, &caller.username, window, page).await
        }
    };

    match result {
        Ok(report_data) => {
            let model = ReportViewModel {
                report_data,
                start_date: params.start_date,
                end_date: params.end_date,
                current_page: params.page,
                page_size: params.size,
                role: caller.effective_role(),
                username: caller.username,
            };
            Ok(view::work_hours_report(model).into_response())
        }
        Err(err @ ReportError::InvalidPagination) => Ok(warp::reply::with_status(
            err.to_string(),
            StatusCode::BAD_REQUEST,
        )
        .into_response()),
        Err(err) => {
            tracing::error!(error = %err, "report query failed");
            Ok(warp::reply::with_status(
                "report unavailable".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let status = if let Some(auth) = err.find::<AuthRejection>() {
        match auth {
            AuthRejection::MissingIdentity => StatusCode::UNAUTHORIZED,
            AuthRejection::MissingRole => StatusCode::FORBIDDEN,
        }
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok(status)
}
