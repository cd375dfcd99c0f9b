//! Worker declarations and their reconciliation with observed jobs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::context::RequestContext;
use crate::core::error::{Error, Result};
use crate::core::models::{Job, Service, Workers};
use crate::core::transport::{self, Transport};
use crate::core::{jobs, services};

/// Job type used for worker processes
pub const WORKER_JOB_TYPE: &str = "worker";

/// Only the first page of jobs is inspected
pub const JOB_PAGE_SIZE: u32 = 1000;

/// Declared scale and observed running jobs for one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerCount {
    pub scale: i64,
    pub running: u64,
}

/// Per-target view over declarations and jobs, ordered by target name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkerSummary {
    targets: BTreeMap<String, WorkerCount>,
}

impl WorkerSummary {
    pub fn get(&self, target: &str) -> Option<&WorkerCount> {
        self.targets.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkerCount)> {
        self.targets.iter().map(|(t, c)| (t.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Sum of declared scale over every target, saturating at the `i64` bounds
    pub fn total(&self) -> i64 {
        self.targets
            .values()
            .fold(0i64, |acc, c| acc.saturating_add(c.scale))
    }
}

/// Merge declared scale per target with job records
///
/// Targets only seen in `jobs` get scale 0, targets with no running job get
/// a running count of 0. Scale values are passed through unchecked.
pub fn reconcile(declarations: &BTreeMap<String, i64>, jobs: &[Job]) -> WorkerSummary {
    let mut targets: BTreeMap<String, WorkerCount> = declarations
        .iter()
        .map(|(target, scale)| {
            (
                target.clone(),
                WorkerCount {
                    scale: *scale,
                    running: 0,
                },
            )
        })
        .collect();

    for job in jobs {
        let count = targets.entry(job.target.clone()).or_default();
        if job.is_running() {
            count.running += 1;
        }
    }

    WorkerSummary { targets }
}

/// Declared workers for a service
pub fn retrieve(
    transport: &dyn Transport,
    ctx: &RequestContext,
    service_id: &str,
) -> Result<Workers> {
    let env = ctx.require_association()?;
    let workers: Option<Workers> = transport::get(
        transport,
        ctx,
        &format!(
            "/environments/{}/services/{}/workers",
            env.environment_id, service_id
        ),
    )?;
    Ok(workers.unwrap_or_default())
}

/// Outcome of listing the workers of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerListing {
    /// The service declares no worker targets; jobs were not fetched
    NoWorkers { service: Service },
    Summary {
        service: Service,
        summary: WorkerSummary,
    },
}

impl WorkerListing {
    pub fn service(&self) -> &Service {
        match self {
            WorkerListing::NoWorkers { service } | WorkerListing::Summary { service, .. } => {
                service
            }
        }
    }

    /// Scale in use across all targets
    pub fn total(&self) -> i64 {
        match self {
            WorkerListing::NoWorkers { .. } => 0,
            WorkerListing::Summary { summary, .. } => summary.total(),
        }
    }
}

/// Resolve `label`, fetch its declarations and jobs, and reconcile them
pub fn list(
    transport: &dyn Transport,
    ctx: &RequestContext,
    label: &str,
) -> Result<WorkerListing> {
    let service = services::retrieve_by_label(transport, ctx, label)?.ok_or_else(|| {
        Error::NotFound(format!(
            "Could not find a service with the label \"{}\". \
             You can list services with the \"paas services list\" command.",
            label
        ))
    })?;

    let workers = retrieve(transport, ctx, &service.id)?;
    if workers.workers.is_empty() {
        return Ok(WorkerListing::NoWorkers { service });
    }

    let jobs = jobs::retrieve_by_type(
        transport,
        ctx,
        &service.id,
        WORKER_JOB_TYPE,
        1,
        JOB_PAGE_SIZE,
    )?;
    let summary = reconcile(&workers.workers, &jobs);
    Ok(WorkerListing::Summary { service, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{associated_context, MockTransport};
    use crate::core::transport::Method;

    fn job(target: &str, status: &str) -> Job {
        Job {
            id: format!("{}-{}", target, status),
            target: target.to_string(),
            status: status.to_string(),
            job_type: WORKER_JOB_TYPE.to_string(),
        }
    }

    fn decls(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn test_running_jobs_counted_per_target() {
        let summary = reconcile(
            &decls(&[("worker-a", 2), ("worker-b", 1)]),
            &[
                job("worker-a", "running"),
                job("worker-a", "running"),
                job("worker-b", "pending"),
            ],
        );
        assert_eq!(summary.get("worker-a"), Some(&WorkerCount { scale: 2, running: 2 }));
        assert_eq!(summary.get("worker-b"), Some(&WorkerCount { scale: 1, running: 0 }));
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_undeclared_target_surfaces_with_zero_scale() {
        let summary = reconcile(&decls(&[("worker-a", 1)]), &[job("worker-x", "running")]);
        assert_eq!(summary.get("worker-a"), Some(&WorkerCount { scale: 1, running: 0 }));
        assert_eq!(summary.get("worker-x"), Some(&WorkerCount { scale: 0, running: 1 }));
        assert_eq!(summary.total(), 1);
    }

    #[test]
    fn test_non_running_job_still_adds_target() {
        let summary = reconcile(&decls(&[]), &[job("cron", "finished")]);
        assert_eq!(summary.get("cron"), Some(&WorkerCount { scale: 0, running: 0 }));
    }

    #[test]
    fn test_empty_inputs() {
        let summary = reconcile(&decls(&[]), &[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_total_saturates_on_huge_scales() {
        let summary = reconcile(&decls(&[("a", i64::MAX), ("b", 1)]), &[]);
        assert_eq!(summary.total(), i64::MAX);

        let summary = reconcile(&decls(&[("a", i64::MIN), ("b", -1)]), &[]);
        assert_eq!(summary.total(), i64::MIN);
    }

    #[test]
    fn test_total_ignores_jobs() {
        let d = decls(&[("a", 3), ("b", 4)]);
        let quiet = reconcile(&d, &[]);
        let busy = reconcile(&d, &[job("a", "running"), job("c", "running")]);
        assert_eq!(quiet.total(), 7);
        assert_eq!(busy.total(), 7);
    }

    #[test]
    fn test_negative_scale_passes_through() {
        let summary = reconcile(&decls(&[("a", -2), ("b", 5)]), &[]);
        assert_eq!(summary.get("a").map(|c| c.scale), Some(-2));
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_reconcile_is_repeatable_and_ordered() {
        let d = decls(&[("zeta", 1), ("alpha", 2)]);
        let j = [job("mid", "running"), job("alpha", "running")];
        let first = reconcile(&d, &j);
        let second = reconcile(&d, &j);
        assert_eq!(first, second);

        let order: Vec<&str> = first.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_every_target_appears_once() {
        let d = decls(&[("a", 1), ("b", 1)]);
        let j = [job("b", "running"), job("c", "queued"), job("c", "running")];
        let summary = reconcile(&d, &j);
        let order: Vec<&str> = summary.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    const SERVICES: &str = r#"[{"id": "svc-1", "label": "code-1", "worker_scale": 6}]"#;

    #[test]
    fn test_list_reconciles() {
        let transport = MockTransport::new()
            .on(Method::Get, "/environments/env-1/services", 200, SERVICES)
            .on(
                Method::Get,
                "/environments/env-1/services/svc-1/workers",
                200,
                r#"{"workers": {"worker-a": 2, "worker-b": 1}, "worker_scale": 6}"#,
            )
            .on(
                Method::Get,
                "/environments/env-1/services/svc-1/jobs",
                200,
                r#"[
                    {"target": "worker-a", "status": "running"},
                    {"target": "worker-a", "status": "running"},
                    {"target": "worker-b", "status": "pending"}
                ]"#,
            );

        let listing = list(&transport, &associated_context(), "code-1").unwrap();
        assert_eq!(listing.service().worker_scale, 6);
        assert_eq!(listing.total(), 3);
        match listing {
            WorkerListing::Summary { summary, .. } => {
                assert_eq!(summary.get("worker-a").map(|c| c.running), Some(2));
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_list_without_declarations_skips_jobs() {
        let transport = MockTransport::new()
            .on(Method::Get, "/environments/env-1/services", 200, SERVICES)
            .on(
                Method::Get,
                "/environments/env-1/services/svc-1/workers",
                200,
                r#"{"workers": {}, "worker_scale": 6}"#,
            );

        let listing = list(&transport, &associated_context(), "code-1").unwrap();
        assert!(matches!(listing, WorkerListing::NoWorkers { .. }));
        assert_eq!(listing.total(), 0);
        assert!(!transport.sent(Method::Get, "/jobs"));
    }

    #[test]
    fn test_list_unknown_label() {
        let transport =
            MockTransport::new().on(Method::Get, "/environments/env-1/services", 200, SERVICES);
        let err = list(&transport, &associated_context(), "ghost").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m.contains("ghost")));
    }
}
