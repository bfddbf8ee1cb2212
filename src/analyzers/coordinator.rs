use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task;
use tokio::time::timeout;

use crate::config::Config;
use crate::types::{AnalysisReport, AnalysisResult, CodeDocument, Issue, Severity};

use super::{default_analyzers, Analyzer};

/// Owns the analyzer registry and runs it with fan-out isolation.
///
/// One analyzer failing, panicking or hanging never prevents the others
/// from being reported; its slot is filled with a degraded zero-score
/// result instead.
pub struct AnalyzerCoordinator {
    analyzers: Vec<Arc<dyn Analyzer>>,
    analyzer_timeout: Duration,
}

impl Default for AnalyzerCoordinator {
    fn default() -> Self {
        Self {
            analyzers: default_analyzers(),
            analyzer_timeout: Config::default().analyzer_timeout(),
        }
    }
}

impl AnalyzerCoordinator {
    pub fn new(config: &Config) -> Self {
        Self {
            analyzers: default_analyzers(),
            analyzer_timeout: config.analyzer_timeout(),
        }
    }

    /// Custom registry, mainly for tests and embedders.
    pub fn with_analyzers(
        analyzers: Vec<Arc<dyn Analyzer>>,
        analyzer_timeout: Duration,
    ) -> Self {
        Self {
            analyzers,
            analyzer_timeout,
        }
    }

    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Run every registered analyzer concurrently and aggregate the
    /// results. Analyzers run on the blocking pool, each bounded by the
    /// configured per-analyzer timeout; on expiry only the result is
    /// discarded (the stray computation finishes in the background).
    pub async fn analyze_code(&self, doc: &CodeDocument) -> AnalysisReport {
        if self.analyzers.is_empty() {
            return empty_registry_report();
        }

        let doc = Arc::new(doc.clone());
        let futures = self.analyzers.iter().map(|analyzer| {
            let analyzer = Arc::clone(analyzer);
            let doc = Arc::clone(&doc);
            let per_timeout = self.analyzer_timeout;
            async move {
                let name = analyzer.kind().to_string();
                let handle = task::spawn_blocking(move || analyzer.analyze(&doc));
                let result = match timeout(per_timeout, handle).await {
                    Err(_) => AnalysisResult::degraded(&name, "timed out"),
                    Ok(Err(join_err)) => AnalysisResult::degraded(&name, &join_err.to_string()),
                    Ok(Ok(Err(err))) => AnalysisResult::degraded(&name, &err.to_string()),
                    Ok(Ok(Ok(result))) => result,
                };
                (name, result)
            }
        });

        aggregate(join_all(futures).await.into_iter().collect())
    }

    /// Sequential variant for callers without a runtime. Same isolation
    /// semantics minus the per-analyzer timeout.
    pub fn analyze_code_blocking(&self, doc: &CodeDocument) -> AnalysisReport {
        if self.analyzers.is_empty() {
            return empty_registry_report();
        }

        let mut results = BTreeMap::new();
        for analyzer in &self.analyzers {
            let name = analyzer.kind().to_string();
            let outcome = catch_unwind(AssertUnwindSafe(|| analyzer.analyze(doc)));
            let result = match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(err)) => AnalysisResult::degraded(&name, &err.to_string()),
                Err(_) => AnalysisResult::degraded(&name, "panicked"),
            };
            results.insert(name, result);
        }
        aggregate(results)
    }
}

fn aggregate(results: BTreeMap<String, AnalysisResult>) -> AnalysisReport {
    let overall_score = if results.is_empty() {
        0.0
    } else {
        results.values().map(|r| r.overall_score).sum::<f32>() / results.len() as f32
    };
    AnalysisReport {
        overall_score,
        results,
    }
}

fn empty_registry_report() -> AnalysisReport {
    let mut results = BTreeMap::new();
    results.insert(
        "error".to_string(),
        AnalysisResult::new(0.0).with_issues(vec![Issue::new(
            Severity::High,
            "Analysis error: no analyzers registered",
            "Please check your code",
        )]),
    );
    AnalysisReport {
        overall_score: 0.0,
        results,
    }
}
