//! Outbound contracts to the external tax calculation and ITR
//! generation service.
//!
//! The wizard controller only ever sees the [`FilingService`] trait;
//! [`HttpFilingService`] is the production implementation and tests
//! supply their own stub.

mod client;
mod error;
mod types;

pub use client::{FilingService, HttpFilingService, ServiceConfig};
pub use error::ServiceError;
pub use types::{
    CalculationRequest, CalculationResponse, DownloadFormat, DownloadResponse, GenerationRequest,
    GenerationResponse, RecommendationRequest, RecommendationResponse,
};
