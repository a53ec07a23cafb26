use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::compression::compression_block;
use super::daq_block::daq_block;
use super::GenerateError;
use crate::config::EventBuilderParams;
use crate::render::render;

/// Event-builder configuration document. Which blocks end up active is
/// decided by the assembly logic in [`generate_event_builder`]; disabled
/// blocks are comment-marked rather than removed, so the document keeps its
/// line structure across parameter changes.
const EVENT_BUILDER_TEMPLATE: &str = r#"
services: {
  scheduler: {
    fileMode: NOMERGE
  }
  user: {
    NetMonTransportServiceInterface: {
      service_provider: NetMonTransportService
      first_data_receiver_rank: %{ag_rank}
      mpi_buffer_count: %{netmonout_buffer_count}
      max_fragment_size_words: %{size_words}
      data_receiver_count: 1 # %{ag_count}
      #broadcast_sends: true
    }
  }
  Timing: { summaryOnly: true }
  #SimpleMemoryCheck: { }
}

%{event_builder_code}

outputs: {
  %{netmon_output}netMonOutput: {
  %{netmon_output}  module_type: NetMonOutput
  %{netmon_output}  %{drop_uncompressed}outputCommands: [ "keep *", "drop artdaq::Fragments_daq_V1720_*", "drop artdaq::Fragments_daq_V1724_*" ]
  %{netmon_output}}
  %{root_output}normalOutput: {
  %{root_output}  module_type: RootOutput
  %{root_output}  fileName: "%{output_file}"
  %{root_output}  compressionLevel: 0
  %{root_output}  %{drop_uncompressed}outputCommands: [ "keep *", "drop artdaq::Fragments_daq_V1720_*", "drop artdaq::Fragments_daq_V1724_*" ]
  %{root_output}}
}

physics: {
  analyzers: {
%{phys_anal_onmon_cfg}
  }

  producers: {

     %{huffdiffV1720}

     %{huffdiffV1724}
  }

  p1: [ %{compressionModules} ]

  %{enable_onmon}a1: [ app, wf ]

  %{netmon_output}my_output_modules: [ netMonOutput ]
  %{root_output}my_output_modules: [ normalOutput ]
}
source: {
  module_type: RawInput
  waiting_time: 900
  resume_after_timeout: true
  fragment_type_map: [[1, "missed"], [3, "V1720"], [4, "V1724"], [6, "TOY1"], [7, "TOY2"]]
}
process_name: DAQ"#;

/// Generate the configuration text for one event builder.
///
/// The assembly rules, in template order:
///
/// - the core `daq:` block reports stats verbosely only while no aggregator
///   is downstream to do it instead;
/// - the network-output buffer count is four per aggregator;
/// - a huffdiff producer is included per digitizer type only when
///   `0 < compression_level < 3` and that type is present, and every
///   included producer joins the `p1` processing path;
/// - the drop-uncompressed output directive is active only above level 1;
/// - output routing is exclusive: aggregators downstream means network
///   output, otherwise file output (when disk writing is on) and optionally
///   the injected online-monitoring analyzers.
pub fn generate_event_builder(params: &EventBuilderParams) -> Result<String, GenerateError> {
    params.validate()?;

    debug!(
        eb_index = params.eb_index,
        total_aggregators = params.total_aggregators,
        compression_level = params.compression_level,
        "generating event builder configuration"
    );

    let verbose = params.total_aggregators == 0;

    let mut values: HashMap<&str, String> = HashMap::new();

    values.insert(
        "event_builder_code",
        daq_block(
            params.max_fragment_size_words,
            params.total_front_end_ranks,
            params.expected_fragments_per_event,
            verbose,
        )?,
    );

    // The first aggregator rank sits directly after the front ends and event
    // builders.
    values.insert(
        "ag_rank",
        (params.total_front_end_ranks + params.total_event_builders).to_string(),
    );
    values.insert("ag_count", params.total_aggregators.to_string());
    values.insert("size_words", params.max_fragment_size_words.to_string());
    values.insert(
        "netmonout_buffer_count",
        (4 * params.total_aggregators).to_string(),
    );

    let mut compression_modules: Vec<&str> = Vec::new();
    let compressing = params.compression_level > 0 && params.compression_level < 3;

    if compressing && params.total_v1720s > 0 {
        values.insert(
            "huffdiffV1720",
            format!("huffdiffV1720: {{ {}}}", compression_block("V1720")),
        );
        compression_modules.push("huffdiffV1720");
    } else {
        values.insert("huffdiffV1720", String::new());
    }

    if compressing && params.total_v1724s > 0 {
        values.insert(
            "huffdiffV1724",
            format!("huffdiffV1724: {{ {}}}", compression_block("V1724")),
        );
        compression_modules.push("huffdiffV1724");
    } else {
        values.insert("huffdiffV1724", String::new());
    }

    // Above level 1 the outputs drop the raw fragments the producers replace.
    values.insert(
        "drop_uncompressed",
        comment_marker(params.compression_level > 1),
    );

    values.insert("compressionModules", compression_modules.join(","));

    if params.total_aggregators >= 1 {
        // Built events leave over the network; file output and online
        // monitoring stay in the document but inert.
        values.insert("netmon_output", comment_marker(true));
        values.insert("root_output", comment_marker(false));
        values.insert("enable_onmon", comment_marker(false));
        values.insert("phys_anal_onmon_cfg", String::new());
    } else {
        values.insert("netmon_output", comment_marker(false));
        values.insert(
            "root_output",
            comment_marker(params.disk_writing_enabled),
        );
        if params.onmon_enabled {
            values.insert("phys_anal_onmon_cfg", params.onmon_viewer_config.clone());
            values.insert("enable_onmon", comment_marker(true));
        } else {
            values.insert("phys_anal_onmon_cfg", String::new());
            values.insert("enable_onmon", comment_marker(false));
        }
    }

    values.insert(
        "output_file",
        output_file(&params.data_dir, params.eb_index),
    );

    let text = render(EVENT_BUILDER_TEMPLATE, &values)?;

    info!(
        eb_index = params.eb_index,
        bytes = text.len(),
        "event builder configuration generated"
    );

    Ok(text)
}

/// "" enables a template line, "#" comment-disables it.
fn comment_marker(enabled: bool) -> String {
    if enabled {
        String::new()
    } else {
        "#".to_string()
    }
}

/// Output file path for the disk-writing output module. The `%06r`, `%02s`
/// and `%to` run, subrun and timestamp tokens are filled in by the DAQ
/// runtime when it opens the file.
fn output_file(data_dir: &Path, eb_index: u32) -> String {
    let file_name = format!("artdaqdemo_eb{:02}_r%06r_sr%02s_%to.root", eb_index);
    data_dir.join(file_name).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_comment_marker() {
        assert_eq!(comment_marker(true), "");
        assert_eq!(comment_marker(false), "#");
    }

    #[test]
    fn test_output_file_zero_pads_the_index() {
        let path = output_file(&PathBuf::from("/data"), 3);
        assert_eq!(path, "/data/artdaqdemo_eb03_r%06r_sr%02s_%to.root");

        let path = output_file(&PathBuf::from("/data"), 12);
        assert_eq!(path, "/data/artdaqdemo_eb12_r%06r_sr%02s_%to.root");
    }
}
