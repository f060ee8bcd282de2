//! Compile-time build information, shown by `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
