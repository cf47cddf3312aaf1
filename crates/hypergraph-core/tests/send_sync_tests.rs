//! Tests to verify that all public types are Send + Sync as required.

use hypergraph_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_request_types_are_send_sync() {
    // Requests cross the async transport boundary
    assert_send_sync::<SchemaRequest>();
    assert_send_sync::<MappingRequest>();
    assert_send_sync::<QueryRequest>();
    assert_send_sync::<ProvidersRequest>();
    assert_send_sync::<PublishingRequest>();
    assert_send_sync::<AuthenticationRequest>();
    assert_send_sync::<QuickstartRequest>();
    assert_send_sync::<SpaceRequest>();
}

#[test]
fn test_domain_types_are_send_sync() {
    assert_send_sync::<EntitySpec>();
    assert_send_sync::<PropertySpec>();
    assert_send_sync::<RelationSpec>();
    assert_send_sync::<FilterSpec>();
    assert_send_sync::<MappingEntity>();
    assert_send_sync::<PropertyKind>();
    assert_send_sync::<Flavor>();
    assert_send_sync::<Strategy>();
    assert_send_sync::<KnowledgeCategory>();
}

#[test]
fn test_config_types_are_send_sync() {
    assert_send_sync::<ServerConfig>();
    assert_send_sync::<ServerConfigBuilder>();
    assert_send_sync::<LogFormat>();
}

#[test]
fn test_error_is_send_sync() {
    // Error type must be Send + Sync
    assert_send_sync::<Error>();
}
