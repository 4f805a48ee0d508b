//! Long running tasks and the audit log.

use chrono::NaiveDate;

use super::{ensure, ensure_present};
use crate::client::Confluence;
use crate::error::Result;
use crate::models::{AuditRecord, LongTask};
use crate::paging::Paged;
use crate::request::{ApiRequest, Query, api_path, segment};
use crate::transport::Transport;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl<Tr: Transport> Confluence<Tr> {
  /// Running and recently finished long running tasks.
  pub fn get_long_tasks(&self, expand: &[&str]) -> Result<Paged<'_, LongTask, Tr>> {
    let params = Query::new().expand(expand).build();
    Ok(self.paged(ApiRequest::get(api_path("longtask")).with_params(params)))
  }

  /// Current state of one task. Poll again for progress.
  pub fn get_long_task(&self, task_id: &str, expand: &[&str]) -> Result<LongTask> {
    ensure_present(task_id, "task id")?;
    let params = Query::new().expand(expand).build();
    self.execute_json(ApiRequest::get(api_path(&format!("longtask/{}", segment(task_id)))).with_params(params))
  }

  /// Audit records in a date range, optionally filtered by text.
  ///
  /// # Errors
  /// `InvalidArgument` if `start_date` is after `end_date`.
  pub fn get_audit_records(
    &self,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    search_string: Option<&str>,
  ) -> Result<Paged<'_, AuditRecord, Tr>> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
      ensure(start <= end, &format!("start date {start} is after end date {end}"))?;
    }

    let params = Query::new()
      .push_opt("startDate", start_date.map(|d| d.format(DATE_FORMAT)))
      .push_opt("endDate", end_date.map(|d| d.format(DATE_FORMAT)))
      .push_opt("searchString", search_string)
      .build();

    Ok(self.paged(ApiRequest::get(api_path("audit")).with_params(params)))
  }
}
