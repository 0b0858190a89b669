//! HTTP API: `GET /bracket/{competitor_type}` and the health check.

use crate::catalog::CatalogSource;
use crate::config::AppConfig;
use crate::error::{validate_origin, ServiceError};
use crate::logic::create_bracket;
use crate::models::{BracketRequest, BracketSize, CompetitorKind, Matchup, Selection};
use actix_web::{
    error::{InternalError, QueryPayloadError},
    get,
    http::{
        header::{self, HeaderValue},
        StatusCode,
    },
    web::{self, Data, Path, Query},
    HttpRequest, HttpResponse, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Arc;

/// Shared, read-only server state. The catalog owns the only mutable resource (its token cache).
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub config: AppConfig,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Query string of `GET /bracket/{competitor_type}`. Everything is parsed by hand so
/// bad values come back as JSON errors.
#[derive(Debug, Default, Deserialize)]
pub struct BracketQuery {
    /// Artist id (albums) or playlist id (tracks).
    pub from: Option<String>,
    /// Power of two or "auto"; missing means "auto".
    pub size: Option<String>,
    /// Legacy switch: "true" means seeded.
    pub seeded: Option<String>,
    /// "seeded" or "unordered"; takes precedence over `seeded`.
    pub selection: Option<String>,
}

impl BracketQuery {
    pub fn selection(&self) -> Result<Selection, ServiceError> {
        match (self.selection.as_deref(), self.seeded.as_deref()) {
            (Some(selection), _) => selection.parse().map_err(ServiceError::InvalidSelection),
            (None, Some("true")) => Ok(Selection::Seeded),
            (None, _) => Ok(Selection::Unordered),
        }
    }

    pub fn size(&self) -> Result<BracketSize, ServiceError> {
        Ok(self.size.as_deref().unwrap_or("auto").parse::<BracketSize>()?)
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "madness-bracket",
    })
}

/// Build a bracket of albums (from an artist) or tracks (from a playlist).
#[get("/bracket/{competitor_type}")]
async fn api_create_bracket(
    state: Data<AppState>,
    req: HttpRequest,
    path: Path<String>,
    query: Query<BracketQuery>,
) -> HttpResponse {
    let mut response = match bracket_for(&state, &path, &query).await {
        Ok(matchups) => HttpResponse::Ok().json(matchups),
        Err(e) => error_response(&e),
    };
    let origin = req.headers().get(header::ORIGIN).and_then(|v| v.to_str().ok());
    if let Some(origin) = allowed_origin(&state.config, origin) {
        if let Ok(value) = HeaderValue::from_str(origin) {
            response
                .headers_mut()
                .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }
    response
}

/// Validate the request, fetch candidates, and build the bracket.
///
/// Every parameter is checked before the catalog is contacted.
pub async fn bracket_for(
    state: &AppState,
    competitor_type: &str,
    query: &BracketQuery,
) -> Result<Vec<Matchup>, ServiceError> {
    let kind: CompetitorKind = competitor_type
        .parse()
        .map_err(ServiceError::UnknownCompetitorType)?;
    let size = query.size()?;
    let selection = query.selection()?;
    let origin = validate_origin(query.from.as_deref().unwrap_or_default())?;

    let candidates = state.catalog.fetch_candidates(origin, kind).await?;
    log::info!(
        "Fetched {} {:?} candidates from {} (size {:?}, {:?})",
        candidates.len(),
        kind,
        origin,
        size,
        selection
    );

    let request = BracketRequest {
        competitor_type: kind,
        size,
        selection,
        candidates,
    };
    // Fresh entropy per request: shuffles and tie-breaks must not repeat across requests.
    let mut rng = StdRng::from_entropy();
    Ok(create_bracket(request, state.config.dedup_policy, &mut rng)?)
}

/// The request origin, if it is on the allow-list.
pub fn allowed_origin<'a>(config: &AppConfig, origin: Option<&'a str>) -> Option<&'a str> {
    origin.filter(|o| config.allows_origin(o))
}

pub fn error_response(e: &ServiceError) -> HttpResponse {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        log::error!("Bracket request failed: {}", e);
    } else {
        log::warn!("Bracket request rejected: {}", e);
    }
    HttpResponse::build(status).json(serde_json::json!({ "error": e.to_string() }))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(&ServiceError::InvalidQuery(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Register the API routes. The caller supplies `Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(api_health)
        .service(api_create_bracket);
}
