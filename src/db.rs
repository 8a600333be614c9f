pub mod store;
pub use store::{Store, UnitOfWork};
pub mod asset_repo;
pub use asset_repo::AssetRepository;
pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod affiliation_repo;
pub use affiliation_repo::AffiliationRepository;
pub mod request_repo;
pub use request_repo::RequestRepository;
pub mod assignment_repo;
pub use assignment_repo::AssignmentRepository;

pub mod postgres;
pub use postgres::PgStore;
pub mod memory;
pub use memory::MemoryStore;
