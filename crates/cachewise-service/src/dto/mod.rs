//! Data Transfer Objects for the service layer.

mod bank_dto;
mod employee_dto;

pub use bank_dto::*;
pub use employee_dto::*;
