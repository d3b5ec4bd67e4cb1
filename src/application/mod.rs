// Application layer - Use cases over the energy backend
pub mod assistant_service;
pub mod dashboard_service;
pub mod dashboard_store;
pub mod energy_repository;
pub mod source_error;
pub mod transform;

#[cfg(test)]
pub mod fake_repository;
