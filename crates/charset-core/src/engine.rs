//! Determination engine — runs every detector and ORs their findings.
//!
//! All detectors always run, even once one has found a declaration, so the
//! determination carries a complete set of reasons for diagnostics.

use log::{debug, info};
use rayon::prelude::*;

use crate::detector::CharsetDetector;
use crate::document::MainDocument;
use crate::error::{AuditError, Result};
use crate::finding::CharsetDetermination;
use crate::options::AuditOptions;

/// The determination engine.
pub struct CharsetEngine {
    detectors: Vec<Box<dyn CharsetDetector>>,
}

impl CharsetEngine {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Add a detector. Findings are reported in the order detectors are added.
    pub fn add_detector(&mut self, detector: Box<dyn CharsetDetector>) {
        self.detectors.push(detector);
    }

    /// Evaluate one main document.
    pub fn determine(
        &self,
        document: &MainDocument,
        options: &AuditOptions,
    ) -> CharsetDetermination {
        let reasons = self
            .detectors
            .iter()
            .map(|detector| {
                let finding = detector.detect(document, options);
                debug!("{}: {}", detector.name(), finding);
                finding
            })
            .collect();

        let determination = CharsetDetermination::from_findings(reasons);
        info!(
            "Charset {} ({} of {} signals)",
            if determination.defined { "defined" } else { "not defined" },
            determination.signals().count(),
            determination.reasons.len()
        );
        determination
    }

    /// Evaluate independent documents in parallel. Results keep input order.
    pub fn determine_batch(
        &self,
        documents: &[MainDocument],
        options: &AuditOptions,
    ) -> Vec<CharsetDetermination> {
        documents
            .par_iter()
            .map(|document| self.determine(document, options))
            .collect()
    }
}

impl Default for CharsetEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an engine with a fixed detector set.
pub struct EngineBuilder {
    detectors: Vec<Box<dyn CharsetDetector>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn detector(mut self, detector: Box<dyn CharsetDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    pub fn build(self) -> Result<CharsetEngine> {
        if self.detectors.is_empty() {
            return Err(AuditError::Engine("No detectors specified".to_string()));
        }
        for (i, d) in self.detectors.iter().enumerate() {
            if self.detectors[..i].iter().any(|other| other.source() == d.source()) {
                return Err(AuditError::Engine(format!(
                    "Duplicate detector for {}",
                    d.source()
                )));
            }
        }

        let mut engine = CharsetEngine::new();
        for d in self.detectors {
            engine.add_detector(d);
        }
        Ok(engine)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
