//! Diff suppression rules
//!
//! The host compares declared configuration with stored state key by key and
//! asks the attribute's suppressor whether a difference is meaningful. These
//! rules cover defaults the configuration model cannot express: server-side
//! defaults, blocks left entirely at their defaults, and the implicit
//! `ip_filter` allow-list. Suppressors never fail; when in doubt they return
//! `false` and the change is surfaced.

use crate::resource_data::ResourceData;

/// Suppressor signature: flat key, stored value, newly computed value, and
/// the resource being reconciled.
pub type DiffSuppressFn = fn(key: &str, old: &str, new: &str, data: &ResourceData) -> bool;

/// Wildcard entry the service API applies when no IP filter is configured.
pub const IP_FILTER_DEFAULT: &str = "0.0.0.0/0";

/// Ignore changes to fields that can only be set at creation time.
pub fn create_only_diff_suppress(_key: &str, _old: &str, _new: &str, data: &ResourceData) -> bool {
    !data.id().is_empty()
}

/// A block whose fields are all left at their defaults is reported as absent
/// (`.# = 0`) although the stored state has it present (`.# = 1`).
pub fn empty_object_diff_suppress(key: &str, old: &str, new: &str, _data: &ResourceData) -> bool {
    old == "1" && new == "0" && key.ends_with(".#")
}

/// The IP filter list defaults to the wildcard; a configuration that leaves
/// it out should not clear it.
pub fn ip_filter_array_diff_suppress(
    key: &str,
    old: &str,
    new: &str,
    _data: &ResourceData,
) -> bool {
    old == "1" && new == "0" && key.ends_with(".ip_filter.#")
}

pub fn ip_filter_value_diff_suppress(
    key: &str,
    old: &str,
    new: &str,
    _data: &ResourceData,
) -> bool {
    old == IP_FILTER_DEFAULT && new.is_empty() && key.ends_with(".ip_filter.0")
}

/// Combined rule attached to the `ip_filter` attribute: the host consults the
/// same suppressor for the count key and the element keys.
pub fn ip_filter_diff_suppress(key: &str, old: &str, new: &str, data: &ResourceData) -> bool {
    let suppress = ip_filter_array_diff_suppress(key, old, new, data)
        || ip_filter_value_diff_suppress(key, old, new, data);
    if suppress {
        tracing::debug!("Suppressing default ip_filter diff on {}: {:?} -> {:?}", key, old, new);
    }
    suppress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> ResourceData {
        ResourceData::new().with_id("proj/svc")
    }

    #[test]
    fn test_create_only_suppressed_once_created() {
        let data = existing();
        assert!(create_only_diff_suppress("cloud_name", "google-europe-west1", "aws-eu-west-1", &data));
        assert!(create_only_diff_suppress("cloud_name", "", "anything", &data));
    }

    #[test]
    fn test_create_only_not_suppressed_before_create() {
        let data = ResourceData::new();
        assert!(!create_only_diff_suppress("cloud_name", "", "aws-eu-west-1", &data));
    }

    #[test]
    fn test_empty_object_one_to_zero() {
        let data = ResourceData::new();
        assert!(empty_object_diff_suppress("config.0.settings.#", "1", "0", &data));
    }

    #[test]
    fn test_empty_object_other_transitions() {
        let data = ResourceData::new();
        assert!(!empty_object_diff_suppress("config.0.settings.#", "0", "1", &data));
        assert!(!empty_object_diff_suppress("config.0.settings.#", "1", "2", &data));
        assert!(!empty_object_diff_suppress("config.0.settings.enabled", "1", "0", &data));
    }

    #[test]
    fn test_ip_filter_count() {
        let data = ResourceData::new();
        assert!(ip_filter_array_diff_suppress("pg_user_config.0.ip_filter.#", "1", "0", &data));
        assert!(!ip_filter_array_diff_suppress("pg_user_config.0.ip_filter.#", "0", "1", &data));
        assert!(!ip_filter_array_diff_suppress("pg_user_config.0.other.#", "1", "0", &data));
    }

    #[test]
    fn test_ip_filter_value() {
        let data = ResourceData::new();
        let key = "pg_user_config.0.ip_filter.0";
        assert!(ip_filter_value_diff_suppress(key, "0.0.0.0/0", "", &data));
        assert!(!ip_filter_value_diff_suppress(key, "0.0.0.0/0", "10.0.0.0/8", &data));
        assert!(!ip_filter_value_diff_suppress(key, "10.0.0.0/8", "", &data));
        assert!(!ip_filter_value_diff_suppress("pg_user_config.0.ip_filter.1", "0.0.0.0/0", "", &data));
    }

    #[test]
    fn test_ip_filter_combined() {
        let data = ResourceData::new();
        assert!(ip_filter_diff_suppress("kafka_user_config.0.ip_filter.#", "1", "0", &data));
        assert!(ip_filter_diff_suppress("kafka_user_config.0.ip_filter.0", "0.0.0.0/0", "", &data));
        assert!(!ip_filter_diff_suppress("kafka_user_config.0.ip_filter.0", "0.0.0.0/0", "10.0.0.0/8", &data));
    }
}
