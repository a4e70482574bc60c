//! # Managed Application Lookup

use crate::provider::ManagedApplicationProvider;
use async_trait::async_trait;
use paths::{managed_application_path, ApiVersion};
use tracing::{info_span, Instrument};

use super::{ArmClient, ArmError, ManagedApplication};

#[async_trait]
impl ManagedApplicationProvider for ArmClient {
    async fn get_managed_application(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ManagedApplication, ArmError> {
        let span = info_span!(
            "azure.managed_application.get",
            resource_group = resource_group,
            application.name = name
        );
        let path = managed_application_path(&self.subscription_id, resource_group, name);
        self.get_json("managed_application.get", &path, ApiVersion::ManagedApplications)
            .instrument(span)
            .await
    }
}
