//! Provider gateway for the Financial Modeling Prep API
//!
//! One authenticated GET per call, with the JSON body passed through
//! untouched and every failure folded into [`GatewayError`].

#![allow(clippy::must_use_candidate)]

mod client;
mod error;
mod observer;
mod params;

pub use client::Gateway;
pub use error::GatewayError;
pub use observer::{Observer, TraceLevel, notify};
pub use params::{API_KEY_PARAM, QueryParams, QueryValue};
