pub mod access;
pub mod complaint_service;

pub use complaint_service::{ComplaintError, ComplaintForm, ComplaintService};
