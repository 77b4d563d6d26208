//! Client for the ViaCEP postal-code lookup service: a thin HTTP layer that
//! classifies responses, a resolver that turns them into domain outcomes and
//! a process-lifetime cache that shares in-flight lookups per code.

pub mod api;
pub mod http;
pub mod resolver;
