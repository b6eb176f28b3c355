// handlers/mod.rs - request handlers, one function per route
//
// Every handler takes its dependencies from `AppState`; none of them touch
// global configuration. The auth gate has already run by the time any of these
// execute.

pub mod customers;
pub mod system;
