pub mod person_repository;

pub use person_repository::PersonRepositoryImpl;
