pub mod affiliations;
pub mod assets;
pub mod assignments;
pub mod requests;
