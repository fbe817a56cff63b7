//! Internationalization utilities
//!
//! Locale extraction from `Accept-Language` and storage of the locale used
//! for UI strings (scenario labels, settings notices, errors). Inside a
//! request the locale is task-local, so it survives the handler hopping
//! between worker threads; outside a request the thread-local value applies.
//! Chinese is the default, matching the sellers this tool is built for.

use std::cell::RefCell;
use std::future::Future;

thread_local! {
    static CURRENT_LOCALE: RefCell<String> = RefCell::new(DEFAULT_LOCALE.to_string());
}

tokio::task_local! {
    static REQUEST_LOCALE: String;
}

/// Supported locales
pub const SUPPORTED_LOCALES: &[&str] = &["zh", "en"];
pub const DEFAULT_LOCALE: &str = "zh";

/// Set the current locale for the current thread
pub fn set_locale(locale: &str) {
    let locale = normalize_locale(locale);
    CURRENT_LOCALE.with(|l| {
        *l.borrow_mut() = locale;
    });
}

/// Get the locale of the current request, else of the current thread
pub fn get_locale() -> String {
    REQUEST_LOCALE
        .try_with(|l| l.clone())
        .unwrap_or_else(|_| CURRENT_LOCALE.with(|l| l.borrow().clone()))
}

/// Run `fut` with `locale` as the request locale
pub async fn with_locale<F: Future>(locale: &str, fut: F) -> F::Output {
    REQUEST_LOCALE.scope(normalize_locale(locale), fut).await
}

/// Normalize locale string to supported format
/// Accepts: "zh", "zh-CN", "zh_CN", "en", "en-US", "en_US", etc.
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale.split(['-', '_', ',', ';']).next().unwrap_or(DEFAULT_LOCALE);

    SUPPORTED_LOCALES
        .iter()
        .find(|supported| primary.starts_with(*supported))
        .unwrap_or(&DEFAULT_LOCALE)
        .to_string()
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) => normalize_locale(value),
        None => DEFAULT_LOCALE.to_string(),
    }
}
