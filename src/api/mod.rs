//! HTTP surface of the service.
//!
//! Handlers stay thin: they validate the request DTO, call one service method
//! and map the result to a JSON body. Errors surface as [`crate::AppError`].
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - One handler per endpoint
//! - [`middleware`] - Bearer authentication and request tracing
//! - [`routes`] - Route groups for `/url`, `/users` and `/auth`

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
