//! Library crate for party-draw-back, exposing the catalog server and the draw client to the
//! binaries and integration tests.

pub mod config;
pub mod dao;
pub mod draw;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
