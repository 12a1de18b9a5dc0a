// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (x-auth-token required, optional role gate)
pub mod public; // Tier 1: banner, health check
pub mod protected; // Tier 2: complaint API under /api/complaints
