pub mod auth;
pub mod context;
pub mod entities;
pub mod error;
pub mod inner_error;
pub mod repository;
pub mod services;
