use std::sync::Arc;
use std::time::Instant;

use actix_web::{web, HttpResponse, Result as ActixResult};
use actix_web::error::ResponseError;

use super::ApiResponse;
use crate::error::AppError;
use crate::metrics;
use crate::models::NotificationRequest;
use crate::services::NotificationRouter;

/// Dispatch a notification
///
/// POST /api/v1/notifications/dispatch
pub async fn dispatch_notification(
    router: web::Data<Arc<NotificationRouter>>,
    req: web::Json<NotificationRequest>,
) -> ActixResult<HttpResponse> {
    let started = Instant::now();
    let request = req.into_inner();

    if request.missing_call_details() {
        let app_error = AppError::Unprocessable(format!(
            "{} request for recipient {} has no call details",
            request.kind.as_str(),
            request.recipient_id
        ));
        return Ok(app_error.error_response());
    }

    match router.dispatch(request).await {
        Ok(outcome) => {
            metrics::observe_dispatch(outcome.path.as_str(), started.elapsed());
            Ok(HttpResponse::Ok().json(ApiResponse::ok(outcome)))
        }
        Err(e) => {
            metrics::observe_dispatch_failure(e.stage());
            let app_error: AppError = e.into();
            Ok(app_error.error_response())
        }
    }
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications").route("/dispatch", web::post().to(dispatch_notification)),
    );
}
