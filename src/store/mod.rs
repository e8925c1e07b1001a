//!  Records live in a [data_source::MemoryStore].
//!  The basic idea is:
//!   - Every process starts from a fixture, either the built in seed or a json file.
//!   - The query and aggregation layers only read through [data_source::DataSource].
//!   - Updates replace a whole record by id, nothing is edited in place.

pub mod data_source;
pub mod entities;
pub mod fixture;
