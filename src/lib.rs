// src/lib.rs

//! Asuka III cabin availability scraper

pub mod auth;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(feature = "serve")]
pub mod http;

#[cfg(feature = "lambda")]
pub mod lambda;
