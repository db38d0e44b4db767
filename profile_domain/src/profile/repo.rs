use entrait::entrait_export as entrait;

use super::{Profile, ProfileChanges, UserId};
use crate::error::ProfileResult;

#[entrait(ProfileRepoImpl, delegate_by = DelegateProfileRepo, mock_api = ProfileRepoMock)]
pub trait ProfileRepo {
    async fn find_profile(&self, user_id: UserId) -> ProfileResult<Option<Profile>>;

    /// Update the profile of `user_id`, inserting it if it does not exist yet.
    async fn merge_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> ProfileResult<Profile>;
}
