use crate::features::pois::models::PointOfInterest;
use crate::shared::constants::MODERATION_ROLES;

/// The acting account for a directory operation.
///
/// Authorization itself is the auth collaborator's concern: it resolves the
/// session into a user id and a moderation-authority flag before the core is
/// invoked. The core only enforces the structural rules that follow from
/// that flag and from record ownership.
#[derive(Debug, Clone)]
pub struct Actor {
    pub usuario_id: String,
    pub moderation_authority: bool,
}

impl Actor {
    pub fn new(usuario_id: impl Into<String>, moderation_authority: bool) -> Self {
        Self {
            usuario_id: usuario_id.into(),
            moderation_authority,
        }
    }

    /// Derive the authority flag from the account's role list
    /// (admin/supervisor carry moderation authority).
    pub fn from_roles(usuario_id: impl Into<String>, roles: &[String]) -> Self {
        let moderation_authority = roles
            .iter()
            .any(|role| MODERATION_ROLES.contains(&role.as_str()));
        Self::new(usuario_id, moderation_authority)
    }

    /// Owners and moderators may edit or delete a record.
    pub fn can_manage(&self, poi: &PointOfInterest) -> bool {
        self.moderation_authority || poi.is_owned_by(&self.usuario_id)
    }
}
