//! `aup2` reads, rewrites and reconstructs AviUtl2 `.aup2` project files.
//!
//! A project file is a line-oriented list of bracketed section headers (`[project]`,
//! `[scene.N]`, `[N]` for timeline objects, `[N.M]` for an object's effects) followed by
//! `key=value` lines. This crate turns that text into a typed [`Document`], lets callers move
//! objects between layers and repack their frame windows, and writes the result back out.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `text -> Document` ([`parse`]); anomalies become warnings in [`Diagnostics`]
//! 2. **Transform** (optional): [`transform_layer`] rewrites layers, frames and focus in place
//! 3. **Validate**: [`validate`] lists structural problems that block writing
//! 4. **Reconstruct**: `Document -> text` ([`reconstruct`]) in canonical section order
//!
//! Values are decoded with [`decode`] and written back with [`encode`]; hex colors and
//! zero-prefixed digit strings survive a round trip untouched.
//!
//! A keyed JSON view of a document is available through [`to_tree`] / [`from_tree`], and the
//! `io` helpers ([`convert_file`], [`transform_file`], [`export_json`], ...) wrap the whole
//! pipeline for on-disk files.
//!
//! The library never installs a `tracing` subscriber; it only emits events.
#![forbid(unsafe_code)]

mod codec;
mod document;
mod foundation;
mod io;
mod layout;
mod parse;
mod reconstruct;
mod summary;
mod validate;

pub use codec::value::{DecodeWarning, NumericSeq, Value, decode, encode};
pub use document::model::{Diagnostics, Document, ObjectRecord, Section, SectionRef};
pub use document::tree::{from_tree, to_tree};
pub use foundation::core::{EffectId, FrameWindow, ObjectId, SceneId};
pub use foundation::error::{Aup2Error, Aup2Result, StructureErrors};
pub use io::{
    ValidationOutcome, check_input_path, convert_file, export_json, import_json, read_document,
    transform_file, validate_file, write_document, write_text,
};
pub use layout::solver::{Placed, SceneGroup, isolated_sequence, pack_contiguous, pack_group};
pub use layout::transform::{
    TransformOpts, TransformReport, UnspecifiedScenePlacement, transform_layer,
};
pub use parse::parse;
pub use reconstruct::{is_scene_level_key, reconstruct};
pub use summary::{ObjectInfo, Summary, objects_by_scene, summarize};
pub use validate::validate;
