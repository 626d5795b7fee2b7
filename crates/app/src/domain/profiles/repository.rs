//! Profiles Repository

use crate::{
    auth::UserUuid,
    domain::profiles::records::{PROFILE_COLUMNS, ProfileChangesRecord, ProfileRecord},
    provider::{Access, ProviderClient, ProviderError, Query},
};

const USER_PROFILES: &str = "user_profiles";

#[derive(Debug, Clone)]
pub(crate) struct ProviderProfilesRepository {
    client: ProviderClient,
}

impl ProviderProfilesRepository {
    #[must_use]
    pub(crate) fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub(crate) async fn get_profile(&self, user: UserUuid) -> Result<ProfileRecord, ProviderError> {
        let query = Query::new().select(PROFILE_COLUMNS).eq("id", user);

        self.client
            .select_single(Access::User, USER_PROFILES, &query)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        user: UserUuid,
        changes: &ProfileChangesRecord<'_>,
    ) -> Result<(), ProviderError> {
        self.client
            .update(
                Access::User,
                USER_PROFILES,
                &Query::new().eq("id", user),
                changes,
            )
            .await
    }
}
