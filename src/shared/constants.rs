/// Admin role - can validate submitted POIs and manage the directory
pub const ROLE_ADMIN: &str = "admin";

/// Supervisor role - can validate submitted POIs
pub const ROLE_SUPERVISOR: &str = "supervisor";

/// Citizen role - can register POIs and track their submissions
pub const ROLE_CITIZEN: &str = "ciudadano";

/// Roles that carry moderation authority
pub const MODERATION_ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_SUPERVISOR];
