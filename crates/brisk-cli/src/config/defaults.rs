use std::path::PathBuf;

use crate::config::types::{Format, Platform};

pub fn default_entry() -> Vec<String> {
    vec!["src/index.ts".to_string()]
}

pub fn default_formats() -> Vec<Format> {
    vec![Format::Esm]
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_platform() -> Platform {
    Platform::Node
}

pub fn default_clean() -> bool {
    true
}
