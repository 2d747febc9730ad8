use crate::types::HealthRes;

/// Simple health service shared by the REST API and the CLI
///
/// This service provides a standardised way to check the health status of the ward service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Ward view is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_alive() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert_eq!(res.message, "Ward view is alive");
    }
}
