use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartConfiguration, DashboardConfig};

pub const DASHBOARD_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const CHART_CONFIGURATION_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfigurationJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartConfiguration,
}

impl DashboardConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = DashboardConfigJsonContractV1 {
            schema_version: DASHBOARD_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize dashboard config v1: {e}"))
        })
    }

    /// Accepts a bare config object or a versioned envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<DashboardConfigJsonContractV1>(input) {
            if config.schema_version != DASHBOARD_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidConfig(format!(
                    "unsupported dashboard config schema version: {}",
                    config.schema_version
                )));
            }
            return config.config.validate();
        }
        let config: DashboardConfig = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse dashboard config json: {e}"))
        })?;
        config.validate()
    }
}

impl ChartConfiguration {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigurationJsonContractV1 {
            schema_version: CHART_CONFIGURATION_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart configuration v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let chart = if let Ok(chart) = serde_json::from_str::<ChartConfiguration>(input) {
            chart
        } else {
            let payload: ChartConfigurationJsonContractV1 =
                serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidConfig(format!(
                        "failed to parse chart configuration json: {e}"
                    ))
                })?;
            if payload.schema_version != CHART_CONFIGURATION_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidConfig(format!(
                    "unsupported chart configuration schema version: {}",
                    payload.schema_version
                )));
            }
            payload.chart
        };
        chart.validate()?;
        Ok(chart)
    }
}
