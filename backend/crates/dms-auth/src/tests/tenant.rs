use crate::tests::valid_claims;
use crate::{Claims, ResolutionError, TenantResolver};

fn with_resource_role(mut claims: Claims, resource: &str, roles: &[&str]) -> Claims {
    claims.resource_access.insert(
        resource.to_string(),
        crate::ResourceAccess {
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
    );
    claims
}

#[test]
fn given_explicit_tenant_id_when_resolved_then_it_wins() {
    let mut claims = with_resource_role(valid_claims(), "tenant-beta", &["viewer"]);
    claims.tenant_id = Some("acme".to_string());

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "acme");
}

#[test]
fn given_tenant_prefixed_resource_when_resolved_then_suffix_returned() {
    let claims = with_resource_role(valid_claims(), "tenant-gamma", &["viewer"]);

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "gamma");
}

#[test]
fn given_tenant_prefixed_role_when_resolved_then_suffix_returned() {
    let claims = with_resource_role(valid_claims(), "documents-api", &["tenant-beta", "viewer"]);

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "beta");
}

#[test]
fn given_prefixed_resource_and_prefixed_role_then_resource_wins() {
    let claims = with_resource_role(valid_claims(), "documents-api", &["tenant-from-role"]);
    let claims = with_resource_role(claims, "tenant-from-resource", &["viewer"]);

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "from-resource");
}

#[test]
fn given_no_tenant_claims_when_fallback_enabled_then_username_used() {
    let claims = valid_claims();

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "alice");
}

#[test]
fn given_no_tenant_claims_when_fallback_disabled_then_no_tenant() {
    let claims = valid_claims();

    let resolver = TenantResolver::new(false);
    assert!(matches!(
        resolver.resolve(&claims),
        Err(ResolutionError::NoTenant { .. })
    ));
}

#[test]
fn given_empty_username_and_no_claims_then_no_tenant_even_with_fallback() {
    let mut claims = valid_claims();
    claims.preferred_username = String::new();
    claims.sub = String::new();

    let resolver = TenantResolver::new(true);
    assert!(matches!(
        resolver.resolve(&claims),
        Err(ResolutionError::NoTenant { .. })
    ));
}

#[test]
fn given_empty_explicit_tenant_id_then_ignored() {
    let mut claims = with_resource_role(valid_claims(), "tenant-beta", &[]);
    claims.tenant_id = Some(String::new());

    let resolver = TenantResolver::new(true);
    assert_eq!(resolver.resolve(&claims).unwrap(), "beta");
}
