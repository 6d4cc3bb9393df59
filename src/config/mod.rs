/// Database connection and schema creation
pub mod database;

/// Portal settings and directory seeding from config.toml
pub mod portal;
