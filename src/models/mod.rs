pub mod car;
pub mod car_inspection;
pub mod car_status;
pub mod client;
pub mod contract_status;
pub mod employee;
pub mod rental_contract;
pub mod role;
pub mod user;
