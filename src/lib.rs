//! Rewrites imports of `@expose`-annotated backend functions into
//! `createRuntime(...)` proxies that call the backend over the wire.

pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod syntax;
pub mod transform;
pub mod walk;
