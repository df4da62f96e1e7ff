//! Form extractors.

use std::{borrow::Cow, fmt, ops, str};

use actix_multipart::Multipart;
use actix_web::{
    body::EitherBody,
    dev::Payload,
    http::header::CONTENT_LENGTH,
    web::BytesMut,
    Error, FromRequest, HttpMessage as _, HttpRequest, HttpResponse, Responder,
};
use encoding_rs::UTF_8;
use futures_core::future::LocalBoxFuture;
use futures_util::{future, FutureExt as _, StreamExt as _, TryStreamExt as _};
use serde::{de::DeserializeOwned, Serialize};

use crate::{config::FormConfig, data::FormData, error::FormError};

/// URL encoded or multipart payload extractor and responder.
///
/// `Form` has two uses: extracting typed data from form request payloads, and
/// responding with URL encoded data.
///
/// # Extractor
/// To extract typed data from a request body, the inner type `T` must
/// implement the [`DeserializeOwned`] trait. Field values are collected
/// according to the request's content type (URL encoded bodies and the
/// non-file fields of multipart bodies both work) and bound onto `T` by
/// serde field name.
///
/// If extraction or binding fails, the request is finalized with a
/// `400 Bad Request` plain text response before the handler runs. Handlers
/// that want to inspect the failure instead can extract
/// `Result<Form<T>, Error>`. For untyped field access, or to bind without
/// rejecting the request, extract [`FormData`] and call
/// [`bind()`](FormData::bind) yourself.
///
/// Use [`FormConfig`] to configure the memory limit and error handling.
///
/// ```
/// use actix_form::Form;
/// use actix_web::post;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Login {
///     username: String,
/// }
///
/// #[post("/login")]
/// async fn login(form: Form<Login>) -> String {
///     format!("Welcome {}!", form.username)
/// }
/// ```
///
/// # Responder
/// The `Form` type also allows you to respond with well-formed URL encoded
/// data: return a value of type `Form<T>` where `T` implements
/// [`Serialize`]. The response has the `application/x-www-form-urlencoded`
/// content type.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Form<T>(pub T);

impl<T> Form<T> {
    /// Unwrap into inner `T` value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ops::Deref for Form<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> ops::DerefMut for Form<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: fmt::Display> fmt::Display for Form<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> FromRequest for Form<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let FormConfig { limit, err_handler } = FormConfig::from_req(req).clone();
        let fields = collect_fields(req, payload, limit);
        let req = req.clone();

        async move {
            fields
                .await
                .and_then(|data| data.bind())
                .map(Form)
                .map_err(|err| match &err_handler {
                    Some(handler) => (handler)(err, &req),
                    None => err.into(),
                })
        }
        .boxed_local()
    }
}

impl<T: Serialize> Responder for Form<T> {
    type Body = EitherBody<String>;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        match serde_urlencoded::to_string(&self.0) {
            Ok(body) => match HttpResponse::Ok()
                .content_type(mime::APPLICATION_WWW_FORM_URLENCODED)
                .message_body(body)
            {
                Ok(res) => res.map_into_left_body(),
                Err(err) => HttpResponse::from_error(err).map_into_right_body(),
            },

            Err(err) => {
                HttpResponse::from_error(FormError::Serialize(err)).map_into_right_body()
            }
        }
    }
}

impl FromRequest for FormData {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let FormConfig { limit, err_handler } = FormConfig::from_req(req).clone();
        let fields = collect_fields(req, payload, limit);
        let req = req.clone();

        async move {
            fields.await.map_err(|err| match &err_handler {
                Some(handler) => (handler)(err, &req),
                None => err.into(),
            })
        }
        .boxed_local()
    }
}

enum Kind {
    UrlEncoded,
    Multipart,
}

/// Classify the request body by its declared content type.
fn body_kind(req: &HttpRequest) -> Result<Kind, FormError> {
    let mime = req
        .mime_type()
        .map_err(|_| FormError::ContentType)?
        .ok_or(FormError::ContentType)?;

    if mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED {
        Ok(Kind::UrlEncoded)
    } else if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA {
        Ok(Kind::Multipart)
    } else {
        Err(FormError::ContentType)
    }
}

/// Read the request body into a field value set.
///
/// The body is parsed exactly once, on the path selected by the content
/// type; requests with a non-form content type are rejected.
fn collect_fields(
    req: &HttpRequest,
    payload: &mut Payload,
    limit: usize,
) -> LocalBoxFuture<'static, Result<FormData, FormError>> {
    match body_kind(req) {
        Ok(Kind::UrlEncoded) => urlencoded_fields(req, payload, limit),
        Ok(Kind::Multipart) => {
            let multipart = Multipart::new(req.headers(), payload.take());
            multipart_fields(multipart, limit).boxed_local()
        }
        Err(err) => future::err(err).boxed_local(),
    }
}

fn urlencoded_fields(
    req: &HttpRequest,
    payload: &mut Payload,
    limit: usize,
) -> LocalBoxFuture<'static, Result<FormData, FormError>> {
    let encoding = match req.encoding() {
        Ok(enc) => enc,
        Err(_) => return future::err(FormError::ContentType).boxed_local(),
    };

    let mut length = None;
    if let Some(value) = req.headers().get(&CONTENT_LENGTH) {
        match value.to_str().ok().and_then(|len| len.parse::<usize>().ok()) {
            Some(len) => length = Some(len),
            None => return future::err(FormError::UnknownLength).boxed_local(),
        }
    }

    // a declared length over the limit fails before any buffering
    if matches!(length, Some(len) if len > limit) {
        return future::err(FormError::Overflow { limit }).boxed_local();
    }

    let mut stream = payload.take();

    async move {
        let mut body = BytesMut::with_capacity(8192);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;

            if body.len() + chunk.len() > limit {
                return Err(FormError::Overflow { limit });
            }

            body.extend_from_slice(&chunk);
        }

        let pairs: Vec<(String, String)> = if encoding == UTF_8 {
            serde_urlencoded::from_bytes(&body)?
        } else {
            let body = encoding
                .decode_without_bom_handling_and_without_replacement(&body)
                .map(Cow::into_owned)
                .ok_or(FormError::Encoding)?;

            serde_urlencoded::from_str(&body)?
        };

        Ok(FormData::from_pairs(pairs))
    }
    .boxed_local()
}

async fn multipart_fields(mut multipart: Multipart, limit: usize) -> Result<FormData, FormError> {
    let mut pairs = Vec::new();
    let mut remaining = limit;

    while let Some(mut field) = multipart.try_next().await? {
        let name = match field.name() {
            Some(name) => name.to_owned(),
            None => {
                log::debug!("skipping multipart field without a name");
                continue;
            }
        };

        // file parts are not collected; dropping the field lets the
        // multipart reader drain it without buffering
        let is_file = field
            .content_disposition()
            .is_some_and(|cd| cd.get_filename().is_some());

        if is_file {
            log::debug!("skipping file field `{name}`");
            continue;
        }

        let mut buf = BytesMut::new();

        while let Some(chunk) = field.try_next().await? {
            remaining = remaining
                .checked_sub(chunk.len())
                .ok_or(FormError::Overflow { limit })?;
            buf.extend_from_slice(&chunk);
        }

        let value = str::from_utf8(&buf)
            .map_err(|_| FormError::Encoding)?
            .to_owned();

        pairs.push((name, value));
    }

    Ok(FormData::from_pairs(pairs))
}
