use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use super::Authenticator;
use super::session::AdminSession;

/// Middleware function that checks for a signed-in admin.
/// Redirects to /admin/login otherwise.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let is_admin = match req.app_data::<web::Data<Authenticator>>() {
        Some(auth) => AdminSession::restore(&req.get_session(), auth).is_admin(),
        None => false,
    };

    if !is_admin {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
