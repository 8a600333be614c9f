pub mod affiliation_service;
pub mod allocation_service;
pub mod assignment_service;
pub mod inventory_service;
pub mod request_service;
