use actix_web::HttpResponse;

#[derive(serde::Serialize)]
struct SuccessBody<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

/// Success half of the response envelope: `{"success": true, "data": ...}`.
pub struct Success<T: serde::Serialize> {
    status: actix_web::http::StatusCode,
    data: Option<T>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::OK, data: Some(data) }
    }

    pub fn created(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::CREATED, data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { status: actix_web::http::StatusCode::OK, data: None }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(SuccessBody { success: true, data: self.data })
    }
}
