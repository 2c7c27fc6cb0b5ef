
/// Status row persistence against an in-memory SQLite database
pub mod db_tests;
