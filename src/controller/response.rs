use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use maud::Markup;

#[must_use]
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[must_use]
pub fn html(markup: Markup) -> HttpResponse {
    html_with_status(StatusCode::OK, markup)
}

#[must_use]
pub fn html_with_status(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}

/// Blank form fields count as absent.
#[must_use]
pub fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}
