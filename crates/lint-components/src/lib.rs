//! Built-in components and the `define_config` entry point.
//!
//! Each component contributes one tooling concern to the emitted
//! configuration: the always-on baseline (`standard`, `imports`) plus
//! opt-in Node.js, TypeScript, promise-hygiene and prettier support.
//! Callers go through [`define_config`], enabling components and supplying
//! an override fragment through the [`ConfigApi`].

pub mod api;
pub mod imports;
pub mod node;
pub mod prettier;
pub mod promise;
pub mod standard;
mod support;
pub mod typescript;

pub use api::{ConfigApi, define_config, register_builtins};
pub use imports::Imports;
pub use node::Node;
pub use prettier::Prettier;
pub use promise::Promise;
pub use standard::Standard;
pub use typescript::TypeScript;
