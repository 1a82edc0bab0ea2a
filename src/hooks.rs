//! Host hook adapters
//!
//! The host platform calls into lockdown from four places. Each adapter
//! shares the same [`LockdownEvaluator`] and only decides how a denial is
//! surfaced: as data, as an in-place edit of the host's value, or as an
//! abortive [`PermissionError`].

use crate::access_control::{GroupSet, LockdownEvaluator};
use crate::error::PermissionError;
use crate::message::DenialMessage;
use crate::page::{Namespace, Title};
use std::sync::Arc;

/// Hook entry points for the host platform
#[derive(Debug, Clone)]
pub struct LockdownHooks {
    evaluator: Arc<LockdownEvaluator>,
}

impl LockdownHooks {
    pub fn new(evaluator: Arc<LockdownEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Permission check for `action` on `page`
    ///
    /// `None` lets the host continue with its own checks; `Some` is the
    /// permission error to show.
    pub fn get_user_permissions_errors(
        &self,
        page: &Title,
        groups: &GroupSet,
        action: &str,
    ) -> Option<DenialMessage> {
        self.evaluator.resolve(page, action, groups).into_denial()
    }

    /// Gate an already dispatched action
    ///
    /// Output may have started by the time this runs, so a denial aborts the
    /// request instead of returning a soft result.
    pub fn perform_action(&self, action: &str, groups: &GroupSet) -> Result<(), PermissionError> {
        self.evaluator.gate_action(action, groups)
    }

    /// Remove unreadable namespaces from the host's searchable list
    pub fn searchable_namespaces(&self, namespaces: &mut Vec<Namespace>, groups: &GroupSet) {
        self.evaluator.filter_searchable_namespaces(namespaces, groups);
    }

    /// Hide a near-match hit that would reveal an unreadable page
    pub fn search_get_near_match_complete(&self, title: &mut Option<Title>, groups: &GroupSet) {
        self.evaluator.suppress_near_match(title, groups);
    }

    pub fn evaluator(&self) -> &LockdownEvaluator {
        &self.evaluator
    }
}
