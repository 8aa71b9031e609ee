//! Role-based access policy.
//!
//! Every protected operation is named by an [`Action`]. [`allowed`] is the single
//! role gate; operations classified [`ActionClass::OwnerOrAdmin`] additionally call
//! [`is_owner_or_admin`] after loading the target entity, so a missing entity is
//! reported before an ownership failure.

use uuid::Uuid;

use crate::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // account
    Register,
    Login,
    VerifyEmail,
    // admin
    DeleteUser,
    PromoteUser,
    BlockUser,
    UnblockUser,
    ListUsersByRole,
    AdminDeleteAlbum,
    AdminDeleteTrack,
    AdminDeletePlaylist,
    AdminUpdatePlaylist,
    CreateAdminPlaylist,
    // owned resources
    UpdateAlbum,
    DeleteAlbum,
    UpdateTrack,
    DeleteTrack,
    UpdatePlaylist,
    DeletePlaylist,
    AddTrackToPlaylist,
    // any signed-in account
    ReadCatalog,
    ReadRecommendations,
    UploadTrack,
    CreateAlbum,
    CreatePlaylist,
    PlayTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    Public,
    AdminOnly,
    OwnerOrAdmin,
    Authenticated,
}

impl Action {
    pub fn class(self) -> ActionClass {
        use Action::*;
        match self {
            Register | Login | VerifyEmail => ActionClass::Public,
            DeleteUser | PromoteUser | BlockUser | UnblockUser | ListUsersByRole
            | AdminDeleteAlbum | AdminDeleteTrack | AdminDeletePlaylist | AdminUpdatePlaylist
            | CreateAdminPlaylist => ActionClass::AdminOnly,
            UpdateAlbum | DeleteAlbum | UpdateTrack | DeleteTrack | UpdatePlaylist
            | DeletePlaylist | AddTrackToPlaylist => ActionClass::OwnerOrAdmin,
            ReadCatalog | ReadRecommendations | UploadTrack | CreateAlbum | CreatePlaylist
            | PlayTrack => ActionClass::Authenticated,
        }
    }
}

/// Role gate for `action`.
///
/// `OwnerOrAdmin` actions pass the gate for every role; ownership is decided per
/// entity by [`is_owner_or_admin`].
pub fn allowed(role: UserRole, action: Action) -> bool {
    match action.class() {
        ActionClass::Public | ActionClass::Authenticated | ActionClass::OwnerOrAdmin => true,
        ActionClass::AdminOnly => role.is_admin(),
    }
}

pub fn is_owner_or_admin(actor_id: Uuid, actor_role: UserRole, owner_id: Uuid) -> bool {
    actor_role.is_admin() || actor_id == owner_id
}
