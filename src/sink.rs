//! Persistence seam for produced tables.
//!
//! The dashboard/database layer is an external collaborator; the engine only
//! promises stable table keys (see [`crate::config::RunConfig::table_key`])
//! and hands over fully populated tables. [`MemorySink`] is the in-process
//! implementation used by tests and the driver binary.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::graph::TopologyExport;

/// Consumer of finished simulation tables.
///
/// A std table is only stored when the topology defines site coordinates;
/// readers must treat a missing key as "absent", never as an empty table.
pub trait ResultSink {
    fn store_pdf(&mut self, key: &str, pdf: &DMatrix<f64>);
    fn store_std(&mut self, key: &str, std: &[f64]);
    fn store_topology(&mut self, key: &str, export: &TopologyExport);
}

/// In-memory sink keyed by table name.
#[derive(Debug, Default)]
pub struct MemorySink {
    pdf_tables: HashMap<String, DMatrix<f64>>,
    std_tables: HashMap<String, Vec<f64>>,
    topologies: HashMap<String, TopologyExport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pdf(&self, key: &str) -> Option<&DMatrix<f64>> {
        self.pdf_tables.get(key)
    }

    pub fn std(&self, key: &str) -> Option<&[f64]> {
        self.std_tables.get(key).map(Vec::as_slice)
    }

    pub fn topology(&self, key: &str) -> Option<&TopologyExport> {
        self.topologies.get(key)
    }
}

impl ResultSink for MemorySink {
    fn store_pdf(&mut self, key: &str, pdf: &DMatrix<f64>) {
        self.pdf_tables.insert(key.to_string(), pdf.clone());
    }

    fn store_std(&mut self, key: &str, std: &[f64]) {
        self.std_tables.insert(key.to_string(), std.to_vec());
    }

    fn store_topology(&mut self, key: &str, export: &TopologyExport) {
        self.topologies.insert(key.to_string(), export.clone());
    }
}
