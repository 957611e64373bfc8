pub mod db_init;

pub mod audit;
pub mod client;
pub mod contract;
pub mod person;
