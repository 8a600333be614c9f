pub mod affiliation;
pub mod allocation;
pub mod asset;
pub mod assignment;
pub mod auth;
pub mod request;
