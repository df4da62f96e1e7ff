//! Extractor configuration.

use std::rc::Rc;

use actix_web::{web, Error, HttpRequest};

use crate::error::FormError;

pub(crate) type ErrHandler = Option<Rc<dyn Fn(FormError, &HttpRequest) -> Error>>;

/// [`FormData`] and [`Form`] extractor configuration.
///
/// Add to your app data to change the memory limit or install a custom error
/// handler for form extraction.
///
/// ```
/// use actix_form::{Form, FormConfig};
/// use actix_web::{post, App, Result};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Info {
///     username: String,
/// }
///
/// // Max in-memory payload size for forms is set to 64kB.
/// #[post("/")]
/// async fn index(form: Form<Info>) -> Result<String> {
///     Ok(format!("Welcome {}!", form.username))
/// }
///
/// App::new()
///     .app_data(FormConfig::default().limit(65_536))
///     .service(index);
/// ```
///
/// [`FormData`]: crate::FormData
/// [`Form`]: crate::Form
#[derive(Clone)]
pub struct FormConfig {
    pub(crate) limit: usize,
    pub(crate) err_handler: ErrHandler,
}

impl FormConfig {
    /// Set maximum number of payload bytes buffered in memory.
    ///
    /// The limit applies to URL encoded bodies as a whole and to the
    /// collected text fields of a multipart body. File parts are drained
    /// without buffering and do not count towards it. By default the limit
    /// is 32 MiB.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set custom error handler.
    ///
    /// The handler receives the [`FormError`] that failed extraction and may
    /// substitute any error (and therefore any response) for it.
    pub fn error_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(FormError, &HttpRequest) -> Error + 'static,
    {
        self.err_handler = Some(Rc::new(f));
        self
    }

    /// Extract payload config from app data.
    ///
    /// Checks both `T` and `Data<T>`, in that order, and falls back to the
    /// default payload config.
    pub(crate) fn from_req(req: &HttpRequest) -> &Self {
        req.app_data::<Self>()
            .or_else(|| req.app_data::<web::Data<Self>>().map(|d| d.as_ref()))
            .unwrap_or(&DEFAULT_CONFIG)
    }
}

/// Allow shared refs used as default.
const DEFAULT_CONFIG: FormConfig = FormConfig {
    limit: 33_554_432, // 2^25 bytes (32 MiB)
    err_handler: None,
};

impl Default for FormConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
