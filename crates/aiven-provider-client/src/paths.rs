//! API path builders
//!
//! Every user-supplied segment is escaped with the identifier codec's
//! escaping, so names containing `/` cannot change the route.

use aiven_provider_core::identifier::escape_part;

pub fn project_path(project: &str) -> String {
    format!("/project/{}", escape_part(project))
}

pub fn service_path(project: &str, service: &str) -> String {
    format!("{}/service/{}", project_path(project), escape_part(service))
}

pub fn topic_path(project: &str, service: &str, topic: &str) -> String {
    format!("{}/topic/{}", service_path(project, service), escape_part(topic))
}

pub fn database_path(project: &str, service: &str, database: &str) -> String {
    format!("{}/db/{}", service_path(project, service), escape_part(database))
}

pub fn service_user_path(project: &str, service: &str, user: &str) -> String {
    format!("{}/user/{}", service_path(project, service), escape_part(user))
}
