/// Import file decoding
///
/// Turns uploaded tabular files into header-keyed rows for the
/// staging layer (parser.rs).

pub mod parser;
