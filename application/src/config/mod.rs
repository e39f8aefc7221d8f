//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetryPolicy`]: attempt count and exponential backoff
//! - [`SolveParams`]: model, retry, timeout and option extraction

pub mod retry_policy;
pub mod solve_params;

pub use retry_policy::RetryPolicy;
pub use solve_params::SolveParams;
