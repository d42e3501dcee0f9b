use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::ExhaustedPolicy;
use crate::core::{extract_profile, Matcher};
use crate::models::{AssignRequest, AssignResponse, ErrorResponse, HealthResponse, ScoreRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub on_exhausted: ExhaustedPolicy,
    pub max_population: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/assign", web::post().to(assign_mentors))
        .route("/matches/score", web::post().to(score_pair));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Assign mentors endpoint
///
/// POST /api/v1/matches/assign
///
/// Request body:
/// ```json
/// {
///   "mentees": [{"first_name": "Ana", "school": "Nursing", ...}],
///   "mentors": [{"first_name": "Cal", "repeat_mentor": "Yes", ...}],
///   "rubric": "graduated"
/// }
/// ```
async fn assign_mentors(
    state: web::Data<AppState>,
    req: web::Json<AssignRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for assign request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let largest = req.mentees.len().max(req.mentors.len());
    if largest > state.max_population {
        tracing::info!(
            "Rejecting assign request with {} profiles (limit {})",
            largest,
            state.max_population
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Request too large".to_string(),
            message: format!(
                "At most {} mentees or mentors per request",
                state.max_population
            ),
            status_code: 400,
        });
    }

    let AssignRequest { mentees, mentors, rubric } = req.into_inner();
    let matcher = rubric
        .map(Matcher::with_variant)
        .unwrap_or_else(|| state.matcher.clone());

    tracing::info!(
        "Assigning {} mentees across {} mentors",
        mentees.len(),
        mentors.len()
    );

    // Scoring is CPU-bound; keep it off the async workers
    let run = match tokio::task::spawn_blocking(move || matcher.run(&mentees, &mentors)).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("Matching task failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Matching failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if state.on_exhausted == ExhaustedPolicy::Fail {
        if let Err(e) = run.outcome.clone().into_complete() {
            tracing::warn!("Rejecting assignment: {}", e);
            return HttpResponse::Conflict().json(ErrorResponse {
                error: "Mentor pool exhausted".to_string(),
                message: e.to_string(),
                status_code: 409,
            });
        }
    }

    let response = AssignResponse {
        run_id: uuid::Uuid::new_v4().to_string(),
        pairs: run.rows(),
        exhausted: run.outcome.exhausted.clone(),
        total_mentees: run.mentees.len(),
        total_mentors: run.mentors.len(),
    };

    tracing::info!(
        "Run {} placed {} of {} mentees",
        response.run_id,
        response.pairs.len(),
        response.total_mentees
    );

    HttpResponse::Ok().json(response)
}

/// Score breakdown endpoint
///
/// POST /api/v1/matches/score
///
/// Returns each rubric term's contribution for a single mentee/mentor pair.
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    let matcher = req
        .rubric
        .map(Matcher::with_variant)
        .unwrap_or_else(|| state.matcher.clone());

    let mentee = extract_profile(&req.mentee);
    let mentor = extract_profile(&req.mentor);

    HttpResponse::Ok().json(matcher.explain(&mentee, &mentor))
}
