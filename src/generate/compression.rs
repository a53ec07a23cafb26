/// Body of a Huffman-difference compression producer for one digitizer
/// fragment type (`V1720` or `V1724`).
///
/// The event-builder generator wraps the body in a named producer table
/// (`huffdiffV1720: { ... }`); the fields inside are owned here. The
/// trailing space keeps the closing brace separated when wrapped.
pub fn compression_block(fragment_type: &str) -> String {
    format!(
        "module_type: Compression fragment_type: \"{0}\" table_file: \"table_daq{0}.txt\" record_compression: true ",
        fragment_type
    )
}
