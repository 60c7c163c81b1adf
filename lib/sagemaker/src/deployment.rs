use std::time::Duration;

use chrono::DateTime;
use chrono::TimeZone;

pub const VARIANT_NAME: &str = "AllTraffic";

#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub endpoint_name: String,
    pub instance_type: String,
    pub initial_instance_count: i32,
    pub container_startup_health_check_timeout: Duration,
    pub model_data_download_timeout: Duration,
}

impl Deployment {
    pub fn new(endpoint_name: String, instance_type: String) -> Self {
        Deployment {
            endpoint_name,
            instance_type,
            initial_instance_count: 1,
            container_startup_health_check_timeout: Duration::from_secs(30 * 60),
            model_data_download_timeout: Duration::from_secs(20 * 60),
        }
    }
}

/// `{prefix}-YYYY-MM-DD-HH-MM`, runs within the same minute share a name.
pub fn timestamped_name<Tz>(prefix: &str, time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}-{}", time.format("%Y-%m-%d-%H-%M"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn timestamped_name_appends_minute_resolution_suffix() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 7, 42).unwrap();
        assert_eq!(timestamped_name("llama", &time), "llama-2024-05-01-09-07");
    }

    #[test]
    fn timestamped_name_collides_within_same_minute() {
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 9, 7, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 1, 9, 7, 59).unwrap();
        assert_eq!(timestamped_name("llama", &first), timestamped_name("llama", &second));
    }

    #[test]
    fn deployment_uses_single_instance_and_generous_timeouts() {
        let deployment = Deployment::new("llama-endpoint".to_string(), "ml.g5.12xlarge".to_string());
        assert_eq!(deployment.initial_instance_count, 1);
        assert_eq!(deployment.container_startup_health_check_timeout.as_secs(), 1800);
        assert_eq!(deployment.model_data_download_timeout.as_secs(), 1200);
    }
}
