pub mod booking_repo;
pub mod postgres_repo;
#[cfg(test)]
pub mod in_memory_repo;
