// Public handlers - no authentication required.
// Token acquisition lives here; everything else sits behind /api.
pub mod auth;
