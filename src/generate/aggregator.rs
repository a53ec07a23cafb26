use std::collections::HashMap;
use tracing::{debug, info};

use super::GenerateError;
use crate::config::AggregatorParams;
use crate::render::render;

/// Aggregator configuration document. One placeholder per input, no
/// conditional blocks. `%UID%` in the metrics file name is expanded by the
/// metric plugin at run time, not here.
const AGGREGATOR_TEMPLATE: &str = r#"daq: {
  max_fragment_size_words: %{size_words}
  aggregator: {
    mpi_buffer_count: %{buffer_count}
    first_event_builder_rank: %{total_frs}
    event_builder_count: %{total_ebs}
    expected_events_per_bunch: %{bunch_size}
    print_event_store_stats: true
    event_queue_depth: %{queue_depth}
    event_queue_wait_time: %{queue_timeout}
    onmon_event_prescale: %{onmon_event_prescale}
    xmlrpc_client_list: "%{xmlrpc_client_list}"
    inrun_recv_timeout_usec: 1000000
    file_size_MB: %{file_size}
    file_duration: %{file_duration}
    file_event_count: %{file_event_count}
  }

  metrics: {
    aggFile: {
      metricPluginType: "file"
      level: 3
      fileName: "/tmp/aggregator/agg_%UID%_metrics.log"
      uniquify: true
    }
  }

  monitoring_transfer: {

    transferPluginType: multicast

    multicast_address: "224.0.0.1"
    multicast_port: %{multicast_port}

    local_address: "%{local_address}"

    receive_buffer_size: 100000000

    subfragment_size: 6000
    subfragments_per_send: 10

    max_fragment_size_words: %{size_words}
    first_event_builder_rank: %{total_frs}
  }
}"#;

/// Generate the aggregator configuration text.
///
/// Direct substitution of the validated inputs; the only computed value is
/// the MPI buffer count, four buffers per event builder feeding this
/// aggregator.
pub fn generate_aggregator(params: &AggregatorParams) -> Result<String, GenerateError> {
    params.validate()?;

    debug!(
        total_front_end_ranks = params.total_front_end_ranks,
        total_event_builders = params.total_event_builders,
        "generating aggregator configuration"
    );

    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("size_words", params.max_fragment_size_words.to_string());
    values.insert(
        "buffer_count",
        (4 * params.total_event_builders).to_string(),
    );
    values.insert("total_frs", params.total_front_end_ranks.to_string());
    values.insert("total_ebs", params.total_event_builders.to_string());
    values.insert("bunch_size", params.expected_events_per_bunch.to_string());
    values.insert("queue_depth", params.event_queue_depth.to_string());
    values.insert("queue_timeout", params.event_queue_wait_time.to_string());
    values.insert(
        "onmon_event_prescale",
        params.onmon_event_prescale.to_string(),
    );
    values.insert("xmlrpc_client_list", params.xmlrpc_client_list.clone());
    values.insert("file_size", params.file_size_mb.to_string());
    values.insert("file_duration", params.file_duration.to_string());
    values.insert("file_event_count", params.file_event_count.to_string());
    values.insert("local_address", params.local_address.clone());
    values.insert("multicast_port", params.multicast_port.to_string());

    let text = render(AGGREGATOR_TEMPLATE, &values)?;

    info!(bytes = text.len(), "aggregator configuration generated");

    Ok(text)
}
