//! Recent analyses: the history list and its delete flows.
//!
//! DESIGN
//! ======
//! The view holds the last fetched snapshot plus transient flags. Deleting
//! one entry or clearing everything follows the same steps: ask for
//! confirmation, call the backend, refetch on success, or record a generic
//! alert on failure. There is no retry, rollback or optimistic removal;
//! the list only changes when it is refetched.
//!
//! The backend is reached through [`AnalysisHistory`] so the flows can be
//! driven without a server.

use std::collections::HashSet;
use std::fmt::Write as _;

use async_trait::async_trait;

use super::short_timestamp;
use crate::api::{ApiError, ApiService, DEFAULT_LIST_LIMIT};
use crate::types::AnalysisResult;

pub const DELETE_PROMPT: &str = "Delete this analysis?";
pub const CLEAR_PROMPT: &str = "Delete ALL analysis history? This cannot be undone.";
pub const DELETE_FAILED_ALERT: &str = "Failed to delete analysis. Please try again.";
pub const CLEAR_FAILED_ALERT: &str = "Failed to clear history. Please try again.";

/// Backend operations the history view needs.
#[async_trait]
pub trait AnalysisHistory: Send + Sync {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<AnalysisResult>, ApiError>;
    async fn delete_one(&self, analysis_id: i64) -> Result<(), ApiError>;
    async fn delete_all(&self) -> Result<(), ApiError>;
}

#[async_trait]
impl AnalysisHistory for ApiService {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<AnalysisResult>, ApiError> {
        self.list_analyses(limit).await
    }

    async fn delete_one(&self, analysis_id: i64) -> Result<(), ApiError> {
        self.delete_analysis(analysis_id).await.map(|_| ())
    }

    async fn delete_all(&self) -> Result<(), ApiError> {
        self.delete_all_analyses().await.map(|_| ())
    }
}

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend accepted the delete and the list was refetched.
    Done,
    /// The user declined; nothing was sent.
    Cancelled,
    /// The same delete is already running; nothing was sent.
    InProgress,
    /// The backend call failed; the alert is set.
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct HistoryView {
    pub analyses: Vec<AnalysisResult>,
    pub limit: u32,
    pub loading: bool,
    /// Message from the last failed refetch, shown as-is.
    pub error: Option<String>,
    /// Generic alert from the last failed delete.
    pub alert: Option<String>,
    deleting: HashSet<i64>,
    clearing: bool,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_LIMIT)
    }
}

impl HistoryView {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            analyses: Vec::new(),
            limit,
            loading: false,
            error: None,
            alert: None,
            deleting: HashSet::new(),
            clearing: false,
        }
    }

    #[must_use]
    pub fn is_deleting(&self, analysis_id: i64) -> bool {
        self.deleting.contains(&analysis_id)
    }

    #[must_use]
    pub fn is_clearing(&self) -> bool {
        self.clearing
    }

    /// Refetch the list. A failure keeps the previous snapshot and records
    /// the error message.
    pub async fn refresh<S>(&mut self, backend: &S)
    where
        S: AnalysisHistory + ?Sized,
    {
        self.loading = true;
        match backend.fetch_recent(self.limit).await {
            Ok(analyses) => {
                self.analyses = analyses;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load analysis history");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn delete_one<S, C>(&mut self, backend: &S, confirm: &mut C, analysis_id: i64) -> DeleteOutcome
    where
        S: AnalysisHistory + ?Sized,
        C: Confirm + ?Sized,
    {
        if self.deleting.contains(&analysis_id) {
            return DeleteOutcome::InProgress;
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        let result = {
            let _flag = DeletingFlag::set(&mut self.deleting, analysis_id);
            backend.delete_one(analysis_id).await
        };

        match result {
            Ok(()) => {
                tracing::info!(analysis_id, "analysis deleted");
                self.alert = None;
                self.refresh(backend).await;
                DeleteOutcome::Done
            }
            Err(e) => {
                tracing::warn!(analysis_id, error = %e, "analysis delete failed");
                self.alert = Some(DELETE_FAILED_ALERT.to_owned());
                DeleteOutcome::Failed(e)
            }
        }
    }

    pub async fn delete_all<S, C>(&mut self, backend: &S, confirm: &mut C) -> DeleteOutcome
    where
        S: AnalysisHistory + ?Sized,
        C: Confirm + ?Sized,
    {
        if self.clearing {
            return DeleteOutcome::InProgress;
        }
        if !confirm.confirm(CLEAR_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        let result = {
            let _flag = ClearingFlag::set(&mut self.clearing);
            backend.delete_all().await
        };

        match result {
            Ok(()) => {
                tracing::info!("analysis history cleared");
                self.alert = None;
                self.refresh(backend).await;
                DeleteOutcome::Done
            }
            Err(e) => {
                tracing::warn!(error = %e, "clearing analysis history failed");
                self.alert = Some(CLEAR_FAILED_ALERT.to_owned());
                DeleteOutcome::Failed(e)
            }
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(alert) = &self.alert {
            let _ = writeln!(out, "! {alert}");
        }
        if self.loading {
            out.push_str("Loading recent analyses...\n");
            return out;
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "{error}");
            return out;
        }
        if self.analyses.is_empty() {
            out.push_str("No analyses yet.\n");
            return out;
        }

        let _ = writeln!(out, "Recent analyses ({}):", self.analyses.len());
        for a in &self.analyses {
            let marker = if self.is_deleting(a.id) || self.clearing { "  (deleting...)" } else { "" };
            let _ = writeln!(
                out,
                "  #{:<5} {:<32} {:<8} {:>5.1}% {:>5} reviews  {}{marker}",
                a.id,
                a.product_name,
                a.effective_label().as_str(),
                a.avg_sentiment * 100.0,
                a.total_reviews,
                short_timestamp(&a.analyzed_at)
            );
        }
        out
    }
}

// =============================================================================
// IN-PROGRESS FLAGS
// =============================================================================

/// Marks one analysis as being deleted until dropped, including when the
/// delete future is dropped mid-call.
struct DeletingFlag<'a> {
    deleting: &'a mut HashSet<i64>,
    analysis_id: i64,
}

impl<'a> DeletingFlag<'a> {
    fn set(deleting: &'a mut HashSet<i64>, analysis_id: i64) -> Self {
        deleting.insert(analysis_id);
        Self { deleting, analysis_id }
    }
}

impl Drop for DeletingFlag<'_> {
    fn drop(&mut self) {
        self.deleting.remove(&self.analysis_id);
    }
}

struct ClearingFlag<'a>(&'a mut bool);

impl<'a> ClearingFlag<'a> {
    fn set(clearing: &'a mut bool) -> Self {
        *clearing = true;
        Self(clearing)
    }
}

impl Drop for ClearingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
