//! Optional summary enhancement.
//!
//! After the pipeline returns, a caller may hand the base artifacts to a
//! [`SummaryEnhancer`] (typically a remote language model) that rewrites
//! the summary. The call runs on its own thread and is bounded by a
//! timeout. Whatever happens, the caller gets artifacts back: the base
//! ones are returned untouched unless the enhancer produced non-empty text
//! in time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::errors::{Result, StudyError};
use crate::types::StudyArtifacts;

/// Longest source excerpt, in characters, passed to an enhancer
pub const MAX_ENHANCE_CHARS: usize = 6000;

/// What an enhancer gets to work with
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    /// Source text, truncated to [`MAX_ENHANCE_CHARS`]
    pub source: String,
    /// The extractive summary the pipeline produced
    pub summary: String,
    cancel: Arc<AtomicBool>,
}

impl EnhanceRequest {
    pub fn new(source: &str, summary: &str) -> Self {
        Self {
            source: source.chars().take(MAX_ENHANCE_CHARS).collect(),
            summary: summary.to_string(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set once the caller stopped waiting. Long-running enhancers should
    /// poll this and bail out.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Rewrites a summary. An empty `Ok` means "nothing better to offer".
pub trait SummaryEnhancer: Send + Sync {
    fn enhance(&self, request: &EnhanceRequest) -> Result<String>;
}

impl<F> SummaryEnhancer for F
where
    F: Fn(&EnhanceRequest) -> Result<String> + Send + Sync,
{
    fn enhance(&self, request: &EnhanceRequest) -> Result<String> {
        self(request)
    }
}

#[derive(Debug)]
pub enum EnhanceOutcome {
    /// The summary was replaced
    Replaced(StudyArtifacts),
    /// The enhancer returned nothing; base artifacts kept
    Kept(StudyArtifacts),
    /// The enhancer failed or timed out; base artifacts kept
    Failed {
        artifacts: StudyArtifacts,
        error: StudyError,
    },
}

impl EnhanceOutcome {
    pub fn artifacts(&self) -> &StudyArtifacts {
        match self {
            EnhanceOutcome::Replaced(a) | EnhanceOutcome::Kept(a) => a,
            EnhanceOutcome::Failed { artifacts, .. } => artifacts,
        }
    }

    pub fn into_artifacts(self) -> StudyArtifacts {
        match self {
            EnhanceOutcome::Replaced(a) | EnhanceOutcome::Kept(a) => a,
            EnhanceOutcome::Failed { artifacts, .. } => artifacts,
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, EnhanceOutcome::Replaced(_))
    }

    pub fn error(&self) -> Option<&StudyError> {
        match self {
            EnhanceOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Run `enhancer` over the artifacts' summary, waiting at most `timeout`.
///
/// On timeout the request's cancellation flag is raised and the worker
/// thread is left to finish on its own; its late result is discarded.
pub fn enhance_summary(
    artifacts: StudyArtifacts,
    source: &str,
    enhancer: Arc<dyn SummaryEnhancer>,
    timeout: Duration,
) -> EnhanceOutcome {
    let request = EnhanceRequest::new(source, artifacts.summary());
    let cancel = Arc::clone(&request.cancel);
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("summary-enhancer".into())
        .spawn(move || {
            // the receiver is gone after a timeout
            let _ = tx.send(enhancer.enhance(&request));
        });
    if let Err(e) = spawned {
        return failed(artifacts, StudyError::Enhancement(e.to_string()));
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(text)) => {
            let text = text.trim();
            if text.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::debug!("enhancer returned an empty summary, keeping the base one");
                EnhanceOutcome::Kept(artifacts)
            } else {
                EnhanceOutcome::Replaced(artifacts.with_summary(text))
            }
        }
        Ok(Err(error)) => failed(artifacts, error),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            failed(artifacts, StudyError::EnhancementTimeout(timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => failed(
            artifacts,
            StudyError::Enhancement("enhancer thread exited without a result".into()),
        ),
    }
}

fn failed(artifacts: StudyArtifacts, error: StudyError) -> EnhanceOutcome {
    #[cfg(feature = "tracing")]
    tracing::warn!(error = %error, "summary enhancement failed, keeping the base summary");
    EnhanceOutcome::Failed { artifacts, error }
}
