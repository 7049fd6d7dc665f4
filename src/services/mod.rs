pub mod aggregate_service;
pub mod fetch_service;
pub mod ranking;

pub use aggregate_service::AggregateService;
pub use fetch_service::FetchService;
