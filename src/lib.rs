//! Form field access & binding for Actix Web.
//!
//! Reads `application/x-www-form-urlencoded` and `multipart/form-data`
//! request bodies into a per-request field value set, and binds field values
//! onto caller types via serde.
//!
//! - [`FormData`]: untyped access to the submitted fields (`get`, `get_or`,
//!   `get_all`, `has`) plus a non-rejecting binder ([`FormData::bind`]).
//! - [`Form`]: typed extractor that binds the fields onto `T: Deserialize`
//!   and rejects the request with `400 Bad Request` when parsing or binding
//!   fails; doubles as a URL encoded responder.
//! - [`FormConfig`]: app data configuration, covering the in-memory size
//!   limit (32 MiB by default) and custom error handling.
//!
//! The request body is parsed exactly once, on the path selected by its
//! content type. Only the non-file fields of a multipart body are collected;
//! file parts are drained without being buffered.
//!
//! # Examples
//!
//! ```
//! use actix_form::{Form, FormData};
//! use actix_web::{post, App};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Login {
//!     username: String,
//! }
//!
//! #[post("/login")]
//! async fn login(form: Form<Login>) -> String {
//!     format!("Welcome {}!", form.username)
//! }
//!
//! #[post("/search")]
//! async fn search(form: FormData) -> String {
//!     form.get_or("q", "*").to_owned()
//! }
//!
//! App::new().service(login).service(search);
//! ```

#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible, missing_docs)]

mod config;
mod data;
mod error;
mod extract;

pub use self::config::FormConfig;
pub use self::data::FormData;
pub use self::error::FormError;
pub use self::extract::Form;
