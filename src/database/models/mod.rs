pub mod complaint;
pub mod user;

pub use complaint::{Category, Complaint, ComplaintRow, ComplaintStatus, ComplaintWithOwner, NewComplaint};
pub use user::{NewUser, OwnerProfile, User, UserRow};
