use std::collections::HashMap;

use crate::render::{render, RenderError};

/// Core event-builder service block, shared by every event builder in the
/// pipeline.
const DAQ_BLOCK_TEMPLATE: &str = "\
daq: {
  max_fragment_size_words: %{size_words}
  event_builder: {
    mpi_buffer_count: %{buffer_count}
    first_fragment_receiver_rank: 0
    fragment_receiver_count: %{total_frs}
    expected_fragments_per_event: %{total_fragments}
    use_art: true
    print_event_store_stats: %{verbose}
    verbose: %{verbose}
  }
}";

/// Render the `daq:` service block for an event builder.
///
/// `verbose` maps to the block's textual booleans here, at render time;
/// callers decide it from topology. The MPI buffer count follows the
/// fragment-receiver count (four buffers per receiver).
pub fn daq_block(
    frag_size_words: u64,
    total_front_end_ranks: u32,
    expected_fragments_per_event: u32,
    verbose: bool,
) -> Result<String, RenderError> {
    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("size_words", frag_size_words.to_string());
    values.insert("buffer_count", (4 * total_front_end_ranks).to_string());
    values.insert("total_frs", total_front_end_ranks.to_string());
    values.insert(
        "total_fragments",
        expected_fragments_per_event.to_string(),
    );
    values.insert("verbose", verbose.to_string());

    render(DAQ_BLOCK_TEMPLATE, &values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daq_block_substitutes_everything() {
        let block = daq_block(2097152, 2, 4, true).unwrap();
        assert!(block.contains("max_fragment_size_words: 2097152"));
        assert!(block.contains("mpi_buffer_count: 8"));
        assert!(block.contains("fragment_receiver_count: 2"));
        assert!(block.contains("expected_fragments_per_event: 4"));
        assert!(!block.contains("%{"));
    }

    #[test]
    fn test_daq_block_verbose_flag_renders_textually() {
        let quiet = daq_block(1024, 1, 1, false).unwrap();
        assert!(quiet.contains("verbose: false"));
        assert!(quiet.contains("print_event_store_stats: false"));

        let loud = daq_block(1024, 1, 1, true).unwrap();
        assert!(loud.contains("verbose: true"));
    }
}
