//! Node/edge list export
//!
//! Writes a built graph to CSV interchange files for external network tools
//! and the visualization layer.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::graph::CooccurrenceGraph;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("write failed: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

/// Write `source,target,weight` rows for every edge.
pub fn export_edge_list(graph: &CooccurrenceGraph, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["source", "target", "weight"])?;
    for (source, target, weight) in graph.edges() {
        writer.write_record([source.to_string(), target.to_string(), weight.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `label,degree,frequency,community` rows for every node.
///
/// `community` is empty for nodes no detector has assigned.
pub fn export_node_list(graph: &CooccurrenceGraph, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["label", "degree", "frequency", "community"])?;
    for node in graph.nodes() {
        let degree = graph.degree(&node.label).unwrap_or(0);
        let community = node
            .community
            .map(|id| id.to_string())
            .unwrap_or_default();
        writer.write_record([
            node.label.clone(),
            degree.to_string(),
            node.frequency.to_string(),
            community,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
