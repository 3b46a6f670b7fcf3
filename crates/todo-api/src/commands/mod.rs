pub mod migrate;
pub mod schema;
pub mod serve;
