//! Legacy (v4) calls: client info and the wordstat report sub-API.

use serde_json::{Value, json};
use yadirect_core::{DirectError, Item, LegacyReply, LegacyRequest};

use crate::Direct;
use crate::core::with_request_deadline;

/// Rows of a finished wordstat report: `data[0].SearchedWith`.
fn searched_with(reply: &LegacyReply) -> Option<Vec<Item>> {
    reply
        .data()?
        .get(0)?
        .get("SearchedWith")?
        .as_array()
        .cloned()
}

impl Direct {
    /// Issue one legacy call and record its units.
    ///
    /// # Errors
    /// `Api` for `error_code` answers, `Connection` for transport failures,
    /// `Unsupported` without a legacy connector.
    pub async fn legacy_call(&self, request: &LegacyRequest) -> Result<LegacyReply, DirectError> {
        let reply = self.legacy()?.invoke(request).await?;
        self.units.record_opt(reply.units.as_ref());
        Ok(reply)
    }

    /// Account information (`GetClientInfo`) for the configured client login.
    ///
    /// # Errors
    /// `InvalidArg` when no login was configured, otherwise as [`legacy_call`](Self::legacy_call).
    pub async fn client_info(&self) -> Result<Value, DirectError> {
        let login = self.client_login.as_deref().ok_or_else(|| {
            DirectError::InvalidArg("client_info needs a client login".to_string())
        })?;
        let reply = self
            .legacy_call(&LegacyRequest::new("GetClientInfo", json!([login])))
            .await?;
        Ok(reply.body)
    }

    /// Start a wordstat report for `phrases`; returns the report id.
    ///
    /// `geo` defaults to the configured `wordstat_geo` regions.
    ///
    /// # Errors
    /// `MalformedResponse` when the answer carries no integer `data`.
    pub async fn create_wordstat_report(
        &self,
        phrases: &[&str],
        geo: Option<&[i64]>,
    ) -> Result<i64, DirectError> {
        if phrases.is_empty() {
            return Err(DirectError::InvalidArg("no phrases for wordstat report".into()));
        }
        let geo = geo.unwrap_or(self.cfg.wordstat_geo.as_slice());
        let reply = self
            .legacy_call(&LegacyRequest::new(
                "CreateNewWordstatReport",
                json!({ "Phrases": phrases, "GeoID": geo }),
            ))
            .await?;
        reply
            .data()
            .and_then(Value::as_i64)
            .ok_or_else(|| DirectError::malformed(format!("no report id in {}", reply.body)))
    }

    /// Poll `request` every `poll_interval` until `ready` extracts a payload.
    ///
    /// `MalformedResponse` answers count as "not ready yet"; every other error
    /// stops polling. Bounded by `max_poll_attempts` and `request_timeout`
    /// when they are configured.
    ///
    /// # Errors
    /// `PollExhausted` after `max_poll_attempts` polls, `RequestTimeout` past
    /// the deadline, or the first non-malformed error.
    pub async fn poll_report<T, F>(
        &self,
        report_id: i64,
        request: &LegacyRequest,
        ready: F,
    ) -> Result<T, DirectError>
    where
        F: Fn(&LegacyReply) -> Option<T>,
    {
        let poll = async {
            let mut attempts = 0u32;
            loop {
                attempts += 1;
                match self.legacy_call(request).await {
                    Ok(reply) => {
                        if let Some(payload) = ready(&reply) {
                            return Ok(payload);
                        }
                    }
                    Err(DirectError::MalformedResponse(_)) => {}
                    Err(e) => return Err(e),
                }
                if let Some(max) = self.cfg.max_poll_attempts
                    && attempts >= max
                {
                    return Err(DirectError::PollExhausted {
                        report_id,
                        attempts,
                    });
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(report_id, attempts, "report not ready");
                tokio::time::sleep(self.cfg.poll_interval).await;
            }
        };
        with_request_deadline(self.cfg.request_timeout, "report", poll).await
    }

    /// Wait for a wordstat report and return its `SearchedWith` rows.
    ///
    /// # Errors
    /// As [`poll_report`](Self::poll_report).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "yadirect::router", skip(self))
    )]
    pub async fn wordstat_report(&self, report_id: i64) -> Result<Vec<Item>, DirectError> {
        let request = LegacyRequest::new("GetWordstatReport", json!(report_id));
        self.poll_report(report_id, &request, searched_with).await
    }

    /// Delete one wordstat report.
    ///
    /// # Errors
    /// As [`legacy_call`](Self::legacy_call).
    pub async fn delete_wordstat_report(&self, report_id: i64) -> Result<(), DirectError> {
        self.legacy_call(&LegacyRequest::new("DeleteWordstatReport", json!(report_id)))
            .await?;
        Ok(())
    }

    /// Delete every outstanding wordstat report; returns how many were deleted.
    ///
    /// A list answer without `data` means there is nothing to delete.
    ///
    /// # Errors
    /// Stops at the first failing call.
    pub async fn delete_all_wordstat_reports(&self) -> Result<usize, DirectError> {
        let list = self
            .legacy_call(&LegacyRequest::bare("GetWordstatReportList"))
            .await?;
        let ids: Vec<i64> = list
            .data()
            .and_then(Value::as_array)
            .map(|reports| {
                reports
                    .iter()
                    .filter_map(|r| r.get("ReportID").and_then(Value::as_i64))
                    .collect()
            })
            .unwrap_or_default();
        for id in &ids {
            self.delete_wordstat_report(*id).await?;
        }
        Ok(ids.len())
    }
}
