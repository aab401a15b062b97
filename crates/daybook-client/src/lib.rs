//! Blocking HTTP client for the daybook API.
//!
//! All report numbers are computed server side; this crate fetches them and
//! hands back typed envelopes. Calls are synchronous and carry no shared
//! mutable state, so a response can never land against a newer view of the
//! book than the one that requested it. There is no retry or timeout policy
//! beyond the transport defaults; every failure maps to a [`ClientError`]
//! and leaves the caller's state untouched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::NaiveDate;
use daybook_core::{
    BookConfig, CapabilitySet, Dc, EntryDraft, EntryPayload, FetchedEntry, LedgerOption, TagRef,
};
use daybook_entry::{hydrate_draft, LedgerDirectory};
use daybook_report::{BalanceSheetReport, ProfitLossReport, TrialBalanceReport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Error talking to the daybook API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(Box<ureq::Error>),
    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] std::io::Error),
    /// The server answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => Self::Api {
                status,
                message: response.into_string().unwrap_or_default(),
            },
            other => Self::Transport(Box::new(other)),
        }
    }
}

/// Filter for the reconciliation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationQuery {
    /// Ledger whose postings are listed.
    pub ledger_id: String,
    /// Earliest posting date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest posting date, inclusive.
    pub to: Option<NaiveDate>,
}

/// One posting leg in the reconciliation listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRow {
    /// Item identifier.
    pub id: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit or credit.
    pub dc: Dc,
    /// Posted amount.
    pub amount: f64,
    /// Item narration.
    #[serde(default)]
    pub narration: String,
    /// Current reconciliation date, if any.
    #[serde(default)]
    pub reconciliation_date: Option<NaiveDate>,
}

/// A reconciliation date change for one posting leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationUpdate {
    /// Item identifier.
    pub id: String,
    /// New reconciliation date; `null` clears it.
    pub reconciliation_date: Option<NaiveDate>,
}

/// A synchronous client bound to one API base URL.
#[derive(Clone)]
pub struct Client {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            agent: ureq::Agent::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self.agent.get(&self.url(path)).call()?;
        Ok(response.into_json()?)
    }

    /// Fetch the book configuration.
    pub fn fetch_config(&self) -> Result<BookConfig, ClientError> {
        self.get_json("config")
    }

    /// Fetch the capabilities granted to the current operator.
    pub fn fetch_capabilities(&self) -> Result<CapabilitySet, ClientError> {
        self.get_json("capabilities")
    }

    /// List ledgers selectable in the entry form. A restriction narrows the
    /// list server side (for example to bank and cash ledgers).
    pub fn ledger_list(&self, restriction: Option<&str>) -> Result<Vec<LedgerOption>, ClientError> {
        debug!(restriction, "GET ledgers");
        let mut request = self.agent.get(&self.url("ledgers"));
        if let Some(restriction) = restriction {
            request = request.query("restriction", restriction);
        }
        Ok(request.call()?.into_json()?)
    }

    /// List the classification tags.
    pub fn tag_list(&self) -> Result<Vec<TagRef>, ClientError> {
        self.get_json("tags")
    }

    /// Fetch one entry by id.
    pub fn get_entry(&self, id: &str) -> Result<FetchedEntry, ClientError> {
        self.get_json(&format!("entries/{id}"))
    }

    /// Fetch one entry and hydrate it into a draft for editing.
    pub fn get_entry_draft(
        &self,
        id: &str,
        tags: &[TagRef],
        directory: &LedgerDirectory,
    ) -> Result<EntryDraft, ClientError> {
        let entry = self.get_entry(id)?;
        Ok(hydrate_draft(entry, tags, directory))
    }

    /// Create an entry. The whole payload is committed or rejected as one
    /// call; there is no partial line submission.
    pub fn create_entry(&self, payload: &EntryPayload) -> Result<FetchedEntry, ClientError> {
        debug!(date = %payload.date, lines = payload.items.len(), "POST entry");
        let response = self.agent.post(&self.url("entries")).send_json(payload)?;
        Ok(response.into_json()?)
    }

    /// Replace an existing entry.
    pub fn update_entry(
        &self,
        id: &str,
        payload: &EntryPayload,
    ) -> Result<FetchedEntry, ClientError> {
        debug!(id, "PUT entry");
        let response = self
            .agent
            .put(&self.url(&format!("entries/{id}")))
            .send_json(payload)?;
        Ok(response.into_json()?)
    }

    /// Delete an entry.
    pub fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        debug!(id, "DELETE entry");
        self.agent.delete(&self.url(&format!("entries/{id}"))).call()?;
        Ok(())
    }

    /// Fetch the trial balance report.
    pub fn trial_balance(&self) -> Result<TrialBalanceReport, ClientError> {
        self.get_json("reports/trial-balance")
    }

    /// Fetch the balance sheet report.
    pub fn balance_sheet(&self) -> Result<BalanceSheetReport, ClientError> {
        self.get_json("reports/balance-sheet")
    }

    /// Fetch the profit and loss report.
    pub fn profit_loss(&self) -> Result<ProfitLossReport, ClientError> {
        self.get_json("reports/profit-loss")
    }

    /// List postings of one ledger for reconciliation.
    pub fn reconciliation(
        &self,
        query: &ReconciliationQuery,
    ) -> Result<Vec<ReconciliationRow>, ClientError> {
        debug!(ledger_id = %query.ledger_id, "GET reconciliation");
        let mut request = self
            .agent
            .get(&self.url("reconciliation"))
            .query("ledger_id", &query.ledger_id);
        if let Some(from) = query.from {
            request = request.query("from", &from.to_string());
        }
        if let Some(to) = query.to {
            request = request.query("to", &to.to_string());
        }
        Ok(request.call()?.into_json()?)
    }

    /// Apply a batch of reconciliation date changes.
    pub fn update_reconciliation(
        &self,
        updates: &[ReconciliationUpdate],
    ) -> Result<(), ClientError> {
        debug!(count = updates.len(), "POST reconciliation");
        self.agent
            .post(&self.url("reconciliation"))
            .send_json(updates)?;
        Ok(())
    }
}
