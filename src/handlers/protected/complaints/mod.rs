// handlers/protected/complaints - /api/complaints
//
// POST   /api/complaints              citizen      create (multipart, optional image)
// GET    /api/complaints              admin        list all + owner profile
// GET    /api/complaints/user/:id     self/admin   list one citizen's complaints
// GET    /api/complaints/:id          self/admin   show one + owner profile
// PUT    /api/complaints/:id/status   admin        set status

pub mod create;
pub mod list;
pub mod show;
pub mod status;
pub mod upload;

pub use create::create_complaint;
pub use list::{list_all, list_user_complaints};
pub use show::get_complaint;
pub use status::update_status;
