//! HTTP handlers

pub mod auth;
pub mod health;
pub mod navigation;
pub mod topics;

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` whose rejections render through the response envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
