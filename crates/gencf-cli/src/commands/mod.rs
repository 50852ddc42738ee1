pub mod enrich;
pub mod fetch;
pub mod process;
pub mod regions;
pub mod run;
pub mod summary;
