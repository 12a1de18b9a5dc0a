// handlers/protected/mod.rs - Protected handlers (x-auth-token required)
//
// Every route here sits behind `jwt_auth_middleware`; admin-only and
// citizen-only routes add a role gate on top. Ownership checks for
// self-or-admin routes happen in `ComplaintService`.

pub mod complaints;
