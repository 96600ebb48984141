//! Resource and data source type names exposed by the provider

pub const RESOURCE_TYPES: &[&str] = &[
    "aiven_connection_pool",
    "aiven_database",
    "aiven_kafka_acl",
    "aiven_kafka_topic",
    "aiven_kafka_connector",
    "aiven_kafka_schema",
    "aiven_kafka_schema_configuration",
    "aiven_elasticsearch_acl",
    "aiven_project",
    "aiven_project_user",
    "aiven_project_vpc",
    "aiven_vpc_peering_connection",
    "aiven_service",
    "aiven_service_integration",
    "aiven_service_integration_endpoint",
    "aiven_service_user",
    "aiven_account",
    "aiven_account_team",
    "aiven_account_team_project",
    "aiven_account_team_member",
    "aiven_account_authentication",
];

/// Same as [`RESOURCE_TYPES`] minus `aiven_service_integration`.
pub const DATA_SOURCE_TYPES: &[&str] = &[
    "aiven_connection_pool",
    "aiven_database",
    "aiven_kafka_acl",
    "aiven_kafka_topic",
    "aiven_kafka_connector",
    "aiven_kafka_schema",
    "aiven_kafka_schema_configuration",
    "aiven_elasticsearch_acl",
    "aiven_project",
    "aiven_project_user",
    "aiven_project_vpc",
    "aiven_vpc_peering_connection",
    "aiven_service",
    "aiven_service_integration_endpoint",
    "aiven_service_user",
    "aiven_account",
    "aiven_account_team",
    "aiven_account_team_project",
    "aiven_account_team_member",
    "aiven_account_authentication",
];

pub fn is_resource_type(name: &str) -> bool {
    RESOURCE_TYPES.contains(&name)
}

pub fn is_data_source_type(name: &str) -> bool {
    DATA_SOURCE_TYPES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes_and_uniqueness() {
        assert_eq!(RESOURCE_TYPES.len(), 21);
        assert_eq!(DATA_SOURCE_TYPES.len(), 20);
        assert_eq!(RESOURCE_TYPES.iter().collect::<HashSet<_>>().len(), 21);
        assert_eq!(DATA_SOURCE_TYPES.iter().collect::<HashSet<_>>().len(), 20);
    }

    #[test]
    fn test_data_sources_are_resources() {
        assert!(DATA_SOURCE_TYPES.iter().all(|name| is_resource_type(name)));
        assert!(is_resource_type("aiven_service_integration"));
        assert!(!is_data_source_type("aiven_service_integration"));
    }
}
