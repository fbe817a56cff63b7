//! Locale extraction middleware
//!
//! Reads `Accept-Language` and runs the rest of the request with that locale.

use axum::{extract::Request, http::header::ACCEPT_LANGUAGE, middleware::Next, response::Response};

use crate::utils::extract_locale_from_header;
use crate::utils::i18n::with_locale;

/// Middleware to extract locale from Accept-Language header
pub async fn locale_middleware(req: Request, next: Next) -> Response {
    let locale = req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
    let locale = extract_locale_from_header(locale);

    with_locale(&locale, next.run(req)).await
}
