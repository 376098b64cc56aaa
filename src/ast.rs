use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A control-flow tree as produced by an external parser.
///
/// The JSON shape is the wire contract: the `type` discriminant and every
/// field name below are fixed. Parsers for each supported source language
/// serialize this union; this crate consumes it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlFlowNode {
    /// Statements executed top to bottom.
    Sequence { children: Vec<ControlFlowNode> },

    /// A named function or procedure body.
    Block {
        label: String,
        children: Vec<ControlFlowNode>,
    },

    /// Selection. The else branch may be absent.
    If {
        condition: String,
        then_block: Box<ControlFlowNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_block: Option<Box<ControlFlowNode>>,
    },

    /// Pre-test iteration (while / for).
    Loop {
        condition: String,
        body: Box<ControlFlowNode>,
    },

    /// A single atomic statement.
    Command { label: String },

    /// Parse failure placeholder. Never has children.
    Error { message: String },
}

impl ControlFlowNode {
    /// Child count, counting branch slots for `If` and the body for `Loop`.
    pub fn child_count(&self) -> usize {
        match self {
            Self::Sequence { children } | Self::Block { children, .. } => children.len(),
            Self::If { else_block, .. } => 1 + usize::from(else_block.is_some()),
            Self::Loop { .. } => 1,
            Self::Command { .. } | Self::Error { .. } => 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid control-flow JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty input")]
    Empty,
}

/// Decodes a control-flow tree from its JSON wire form.
pub fn decode(input: &str) -> Result<ControlFlowNode, InputError> {
    if input.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(serde_json::from_str(input)?)
}

pub fn decode_file(path: &Path) -> Result<ControlFlowNode, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&contents)
}
