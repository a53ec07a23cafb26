use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Highest compression level the generators accept. 0 disables compression,
/// 1 adds the huffdiff producers, 2 additionally drops the uncompressed raw
/// fragments from the outputs, 3 drops them without running the producers.
pub const MAX_COMPRESSION_LEVEL: u32 = 3;

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("invalid parameter {field}={value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parameters for the whole pipeline, as loaded from a parameter file.
///
/// The aggregator section is optional: a standalone pipeline (no downstream
/// aggregators) omits it, and the event builder then routes events to disk
/// or online monitoring instead of the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    pub aggregator: Option<AggregatorParams>,
    pub event_builder: EventBuilderParams,
}

/// Inputs for the aggregator configuration document.
///
/// Every field substitutes one-for-one into the template except
/// `total_event_builders`, which also derives the MPI buffer count
/// (`4 x total_event_builders`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorParams {
    pub total_front_end_ranks: u32,
    pub total_event_builders: u32,
    pub expected_events_per_bunch: u32,
    pub max_fragment_size_words: u64,
    /// Comma-separated XMLRPC endpoints of the run-control clients.
    pub xmlrpc_client_list: String,
    pub file_size_mb: u32,
    pub file_duration: u32,
    pub file_event_count: u32,
    #[serde(default = "default_event_queue_depth")]
    pub event_queue_depth: u32,
    #[serde(default = "default_event_queue_wait_time")]
    pub event_queue_wait_time: u32,
    #[serde(default = "default_onmon_event_prescale")]
    pub onmon_event_prescale: u32,
    /// Interface address the monitoring transfer sends from.
    pub local_address: String,
    #[serde(default = "default_multicast_port")]
    pub multicast_port: u16,
}

fn default_event_queue_depth() -> u32 {
    20
}

fn default_event_queue_wait_time() -> u32 {
    5
}

fn default_onmon_event_prescale() -> u32 {
    1
}

fn default_multicast_port() -> u16 {
    30001
}

impl AggregatorParams {
    /// Field checks that run before any substitution. Counts and sizes are
    /// unsigned, so only the string-typed inputs need inspection here.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.xmlrpc_client_list.trim().is_empty() {
            return Err(ParamError::InvalidParameter {
                field: "xmlrpc_client_list",
                value: self.xmlrpc_client_list.clone(),
                reason: "must not be empty",
            });
        }

        if self.local_address.trim().is_empty() {
            return Err(ParamError::InvalidParameter {
                field: "local_address",
                value: self.local_address.clone(),
                reason: "must not be empty",
            });
        }

        Ok(())
    }
}

/// Inputs for one event builder's configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBuilderParams {
    /// Zero-based index of this event builder, embedded in the output file
    /// name.
    pub eb_index: u32,
    pub total_front_end_ranks: u32,
    pub total_event_builders: u32,
    pub total_aggregators: u32,
    pub compression_level: u32,
    pub total_v1720s: u32,
    pub total_v1724s: u32,
    /// Directory the disk-writing output places its files in.
    pub data_dir: PathBuf,
    #[serde(default)]
    pub onmon_enabled: bool,
    #[serde(default = "default_disk_writing_enabled")]
    pub disk_writing_enabled: bool,
    pub max_fragment_size_words: u64,
    pub expected_fragments_per_event: u32,
    /// Pre-rendered online-monitoring analyzer block, injected verbatim when
    /// monitoring is enabled and no aggregators are downstream.
    #[serde(default)]
    pub onmon_viewer_config: String,
}

fn default_disk_writing_enabled() -> bool {
    true
}

impl EventBuilderParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ParamError::InvalidParameter {
                field: "compression_level",
                value: self.compression_level.to_string(),
                reason: "must be between 0 and 3",
            });
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ParamError::InvalidParameter {
                field: "data_dir",
                value: String::new(),
                reason: "must not be empty",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator_params() -> AggregatorParams {
        AggregatorParams {
            total_front_end_ranks: 2,
            total_event_builders: 2,
            expected_events_per_bunch: 1,
            max_fragment_size_words: 2097152,
            xmlrpc_client_list: "http://daq01:5442/RPC2,3".to_string(),
            file_size_mb: 8000,
            file_duration: 0,
            file_event_count: 0,
            event_queue_depth: 20,
            event_queue_wait_time: 5,
            onmon_event_prescale: 1,
            local_address: "192.168.1.5".to_string(),
            multicast_port: 30001,
        }
    }

    #[test]
    fn test_aggregator_params_valid() {
        assert!(aggregator_params().validate().is_ok());
    }

    #[test]
    fn test_aggregator_params_empty_client_list_rejected() {
        let mut params = aggregator_params();
        params.xmlrpc_client_list = "  ".to_string();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("xmlrpc_client_list"));
    }

    #[test]
    fn test_aggregator_params_empty_local_address_rejected() {
        let mut params = aggregator_params();
        params.local_address = String::new();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("local_address"));
    }

    fn event_builder_params() -> EventBuilderParams {
        EventBuilderParams {
            eb_index: 0,
            total_front_end_ranks: 2,
            total_event_builders: 2,
            total_aggregators: 1,
            compression_level: 0,
            total_v1720s: 1,
            total_v1724s: 0,
            data_dir: PathBuf::from("/tmp/daqdata"),
            onmon_enabled: false,
            disk_writing_enabled: true,
            max_fragment_size_words: 2097152,
            expected_fragments_per_event: 2,
            onmon_viewer_config: String::new(),
        }
    }

    #[test]
    fn test_event_builder_params_valid() {
        assert!(event_builder_params().validate().is_ok());
    }

    #[test]
    fn test_event_builder_params_compression_level_bounds() {
        let mut params = event_builder_params();
        params.compression_level = MAX_COMPRESSION_LEVEL;
        assert!(params.validate().is_ok());

        params.compression_level = MAX_COMPRESSION_LEVEL + 1;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("compression_level"));
    }

    #[test]
    fn test_event_builder_params_empty_data_dir_rejected() {
        let mut params = event_builder_params();
        params.data_dir = PathBuf::new();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("data_dir"));
    }
}
