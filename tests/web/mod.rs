pub mod error_envelope_tests;
pub mod graphql_tests;
pub mod health_endpoint_tests;
pub mod parity_tests;
