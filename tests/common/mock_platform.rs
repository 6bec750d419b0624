//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use release_batch::error::{Error, Result};
use release_batch::platform::PlatformService;
use release_batch::types::{Branch, MergeResult, PlatformConfig, PullRequest, PullRequestFilter};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub name: String,
    pub sha: String,
}

/// Call record for `merge_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub base: String,
    pub head: String,
}

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Call record for `update_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePrCall {
    pub pr_number: u64,
    pub title: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable branches and open PRs
/// - Call tracking for verification
/// - Error injection per operation (merge errors per head branch)
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    branches: Mutex<HashMap<String, String>>,
    open_prs: Mutex<Vec<PullRequest>>,
    up_to_date_heads: Mutex<HashSet<String>>,
    // Call tracking
    get_branch_calls: Mutex<Vec<String>>,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    list_calls: Mutex<Vec<PullRequestFilter>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    update_pr_calls: Mutex<Vec<UpdatePrCall>>,
    // Error injection
    error_on_get_branch: Mutex<Option<String>>,
    error_on_create_branch: Mutex<Option<String>>,
    error_on_list: Mutex<Option<String>>,
    error_on_merge: Mutex<HashMap<String, String>>,
    conflict_on_merge: Mutex<HashSet<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_update_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(100),
            branches: Mutex::new(HashMap::new()),
            open_prs: Mutex::new(Vec::new()),
            up_to_date_heads: Mutex::new(HashSet::new()),
            get_branch_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            update_pr_calls: Mutex::new(Vec::new()),
            error_on_get_branch: Mutex::new(None),
            error_on_create_branch: Mutex::new(None),
            error_on_list: Mutex::new(None),
            error_on_merge: Mutex::new(HashMap::new()),
            conflict_on_merge: Mutex::new(HashSet::new()),
            error_on_create_pr: Mutex::new(None),
            error_on_update_pr: Mutex::new(None),
        }
    }

    // === Setup methods ===

    /// Register an existing branch
    pub fn add_branch(&self, name: &str, sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), sha.to_string());
    }

    /// Replace the open PR list
    pub fn set_open_prs(&self, prs: Vec<PullRequest>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Make merging this head report "nothing to merge"
    pub fn set_up_to_date(&self, head: &str) {
        self.up_to_date_heads
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    // === Error injection methods ===

    /// Make `get_branch` return an error
    pub fn fail_get_branch(&self, msg: &str) {
        *self.error_on_get_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_branch` return an error
    pub fn fail_create_branch(&self, msg: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make merging this head branch return an error
    pub fn fail_merge(&self, head: &str, msg: &str) {
        self.error_on_merge
            .lock()
            .unwrap()
            .insert(head.to_string(), msg.to_string());
    }

    /// Make merging this head branch report a conflict
    pub fn conflict_merge(&self, head: &str) {
        self.conflict_on_merge
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_pr` return an error
    pub fn fail_update_pr(&self, msg: &str) {
        *self.error_on_update_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all branches `get_branch` was called with
    pub fn get_branch_calls(&self) -> Vec<String> {
        self.get_branch_calls.lock().unwrap().clone()
    }

    /// Get all `create_branch` calls
    pub fn get_create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// Get all filters `list_open_prs` was called with
    pub fn get_list_calls(&self) -> Vec<PullRequestFilter> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Get all `merge_branch` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `update_pr` calls
    pub fn get_update_pr_calls(&self) -> Vec<UpdatePrCall> {
        self.update_pr_calls.lock().unwrap().clone()
    }

    /// Head branches merged, in call order
    pub fn merged_heads(&self) -> Vec<String> {
        self.get_merge_calls().into_iter().map(|c| c.head).collect()
    }

    /// Count of calls that would change repository state
    pub fn mutating_call_count(&self) -> usize {
        self.create_branch_calls.lock().unwrap().len()
            + self.merge_calls.lock().unwrap().len()
            + self.create_pr_calls.lock().unwrap().len()
            + self.update_pr_calls.lock().unwrap().len()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `update_pr` was called for a specific PR
    pub fn assert_update_pr_called(&self, pr_number: u64) {
        let calls = self.get_update_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected update_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that no PR was created or updated
    pub fn assert_release_pr_untouched(&self) {
        let created = self.get_create_pr_calls();
        let updated = self.get_update_pr_calls();
        assert!(
            created.is_empty() && updated.is_empty(),
            "Expected no release PR calls but got create: {created:?}, update: {updated:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_branch(&self, name: &str) -> Result<Option<Branch>> {
        self.get_branch_calls.lock().unwrap().push(name.to_string());

        if let Some(msg) = self.error_on_get_branch.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let branches = self.branches.lock().unwrap();
        Ok(branches.get(name).map(|sha| Branch {
            name: name.to_string(),
            sha: sha.clone(),
        }))
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<Branch> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                name: name.to_string(),
                sha: sha.to_string(),
            });

        if let Some(msg) = self.error_on_create_branch.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        self.add_branch(name, sha);
        Ok(Branch {
            name: name.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn list_open_prs(&self, filter: &PullRequestFilter) -> Result<Vec<PullRequest>> {
        self.list_calls.lock().unwrap().push(filter.clone());

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let prs = self.open_prs.lock().unwrap();
        Ok(prs
            .iter()
            .filter(|pr| filter.base.as_ref().is_none_or(|b| &pr.base_ref == b))
            .filter(|pr| filter.head.as_ref().is_none_or(|h| &pr.head_ref == h))
            .cloned()
            .collect())
    }

    async fn merge_branch(&self, base: &str, head: &str) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        if let Some(msg) = self.error_on_merge.lock().unwrap().get(head) {
            return Err(Error::Platform(msg.clone()));
        }
        if self.conflict_on_merge.lock().unwrap().contains(head) {
            return Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            });
        }
        if self.up_to_date_heads.lock().unwrap().contains(head) {
            return Ok(MergeResult::UpToDate);
        }

        let n = self.merge_calls.lock().unwrap().len();
        Ok(MergeResult::Merged {
            sha: format!("merge_sha_{n}"),
        })
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            title: title.to_string(),
            body: body.to_string(),
            head_ref: head.to_string(),
            base_ref: base.to_string(),
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            labels: vec![],
        })
    }

    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest> {
        self.update_pr_calls.lock().unwrap().push(UpdatePrCall {
            pr_number,
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_update_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let prs = self.open_prs.lock().unwrap();
        let existing = prs
            .iter()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::Platform(format!("update_pr: no open PR #{pr_number}")))?;

        Ok(PullRequest {
            title: title.to_string(),
            body: body.to_string(),
            ..existing.clone()
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
