/// Catalog storage backends and the filter they share.
pub mod game_store;
/// Database model definitions.
pub mod models;
/// Sample catalog used by local runs and the seeding tool.
pub mod seed;
/// Storage abstraction layer for database operations.
pub mod storage;
