#![doc = "The `shiftmaster` library crate."]
#![doc = ""]
#![doc = "Multi-tenant shift scheduling: companies are the tenant boundary, a system"]
#![doc = "administrator provisions companies and users, and company members view and"]
#![doc = "manage a calendar of shifts with PDF export. This crate holds the domain"]
#![doc = "models, authentication, routing and error handling; the binary (`main.rs`)"]
#![doc = "wires them into an HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod pdf;
pub mod routes;
