pub mod filter_sort;
pub mod locations;
pub mod normalizer;
pub mod outcome;
pub mod query;
pub mod quality;
pub mod raw;
pub mod record;
pub mod response;
pub mod synthetic;
