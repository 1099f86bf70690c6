//! `LookupPort` over the upstream domain groups and product catalogue

use async_trait::async_trait;
use core_kernel::PortError;
use domain_proposal::ports::{DomainGroup, LookupPort};
use domain_proposal::proposal::{LookupRef, ProductRef};

use crate::client::{optional, Envelope, ProposalApiGateway};
use crate::dto::{ProductDto, RefDto};

#[async_trait]
impl LookupPort for ProposalApiGateway {
    async fn domain_group(
        &self,
        token: &str,
        group: DomainGroup,
    ) -> Result<Vec<LookupRef>, PortError> {
        let path = format!("v1/Domain/group/{}", group.group_name());
        let envelope: Envelope<Vec<RefDto>> = self.get(token, &path, &[]).await?;
        Ok(optional(envelope)?
            .unwrap_or_default()
            .into_iter()
            .map(RefDto::into_lookup)
            .collect())
    }

    async fn products(&self, token: &str) -> Result<Vec<ProductRef>, PortError> {
        let envelope: Envelope<Vec<ProductDto>> = self.get(token, "v1/Product/all", &[]).await?;
        Ok(optional(envelope)?
            .unwrap_or_default()
            .into_iter()
            .map(ProductDto::into_domain)
            .collect())
    }
}
