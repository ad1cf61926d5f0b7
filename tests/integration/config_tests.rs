//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use bdo_search_rs::GatewayError;
    use bdo_search_rs::config::Config;
    use std::io::Write;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_full_config_file() {
        let file = write_config(
            r#"
server:
  host: 127.0.0.1
  port: 9100
  max_body_size: 2048
auth:
  admin_token: yaml-admin-token
cache:
  max_entries: 500
  ttl_secs: 120
scraper:
  max_tasks_total: 50
  max_tasks_per_client: 5
  upstream_url: http://scraper.internal:8080/search
maintenance:
  regions: [kr]
"#,
        );

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().address(), "127.0.0.1:9100");
        assert_eq!(config.server().max_body_size, 2048);
        assert_eq!(config.auth().admin_token, "yaml-admin-token");
        assert_eq!(config.cache().ttl_secs, 120);
        assert_eq!(config.scraper().max_tasks_per_client, 5);
        assert_eq!(config.maintenance().regions, vec!["kr"]);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let file = write_config("server:\n  port: 9200\n");

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().port, 9200);
        assert_eq!(config.server().client_ip_header, "CF-Connecting-IP");
        assert_eq!(config.scraper().max_tasks_per_client, 200);
        assert_eq!(config.server().max_body_size, 1024 * 1024);
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let file = write_config("scraper:\n  max_tasks_total: 2\n  max_tasks_per_client: 5\n");

        let err = assert_err!(Config::from_file(file.path()).await);

        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("Scraper config error"));
    }

    #[tokio::test]
    async fn test_unknown_maintenance_region_is_rejected() {
        let file = write_config("maintenance:\n  regions: [MARS]\n");

        let err = assert_err!(Config::from_file(file.path()).await);

        assert!(err.to_string().contains("MARS"));
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = assert_err!(Config::from_file("/nonexistent/gateway.yaml").await);
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[tokio::test]
    async fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml = assert_ok!(config.to_yaml());
        let file = write_config(&yaml);

        let reloaded = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(reloaded.server().port, config.server().port);
        assert_eq!(reloaded.cache().max_entries, config.cache().max_entries);
    }
}
