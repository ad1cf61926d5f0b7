//! Batch search orchestration
//!
//! One batch passes a precondition gate, then each query walks its own
//! [`Stage`] machine: validate, look up the cache, request admission. The
//! first terminal condition decides the query's outcome and failures never
//! leave the item they belong to.

use super::types::{
    BatchSearchRequest, BatchSearchResponse, BatchStats, ItemOutcome, MAX_BATCH_SIZE,
};
use crate::core::admission::{AdmissionController, AdmissionOutcome};
use crate::core::authorization::BypassAuthorizer;
use crate::core::maintenance::MaintenanceStatus;
use crate::core::profile_cache::ProfileCache;
use crate::core::types::{Region, SearchKey, SearchType};
use crate::core::validators::SearchValidator;
use crate::utils::error::{GatewayError, Result};
use crate::utils::truncate_string;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Caller facts taken from the transport
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Opaque client identity used for per-client admission ceilings
    pub client_id: String,
    /// Admin credential, when the caller sent one
    pub credential: Option<String>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// Batch-wide parameters every item is classified under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub region: Region,
    pub search_type: SearchType,
    pub bypass_cache: bool,
}

/// Where a single query is in its classification
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Validate,
    Lookup(String),
    Admit(String),
    Done(ItemOutcome),
}

/// Turns batch requests into per-item outcomes and counters
pub struct BatchOrchestrator {
    validator: Arc<dyn SearchValidator>,
    cache: Arc<dyn ProfileCache>,
    admission: Arc<dyn AdmissionController>,
    authorizer: Arc<dyn BypassAuthorizer>,
    maintenance: Arc<dyn MaintenanceStatus>,
}

impl BatchOrchestrator {
    pub fn new(
        validator: Arc<dyn SearchValidator>,
        cache: Arc<dyn ProfileCache>,
        admission: Arc<dyn AdmissionController>,
        authorizer: Arc<dyn BypassAuthorizer>,
        maintenance: Arc<dyn MaintenanceStatus>,
    ) -> Self {
        Self {
            validator,
            cache,
            admission,
            authorizer,
            maintenance,
        }
    }

    /// Classify every query of a batch
    pub async fn run(
        &self,
        request: BatchSearchRequest,
        ctx: &RequestContext,
    ) -> Result<BatchSearchResponse> {
        let mut plan = self.check_preconditions(&request)?;
        plan.bypass_cache = self.resolve_bypass(request.bypass_cache, ctx);

        let mut results = Vec::with_capacity(request.queries.len());
        let mut stats = BatchStats::default();

        for raw in &request.queries {
            let outcome = self.classify(raw, &plan, &ctx.client_id).await;
            debug!(
                query = %truncate_string(&outcome.query, 32),
                status = %outcome.status,
                "batch item classified"
            );
            stats.record(outcome.status);
            results.push(outcome);
        }

        info!(
            client = %ctx.client_id,
            region = %plan.region,
            search_type = %plan.search_type,
            size = results.len(),
            cached = stats.cached,
            started = stats.started,
            pending = stats.pending,
            rejected = stats.rejected,
            invalid = stats.invalid,
            error = stats.error,
            "batch search completed"
        );

        Ok(BatchSearchResponse {
            region: plan.region,
            search_type: plan.search_type,
            results,
            stats,
        })
    }

    /// Batch-level checks, in order: region, empty list, size cap, maintenance.
    /// The returned plan has cache bypass switched off.
    pub fn check_preconditions(&self, request: &BatchSearchRequest) -> Result<BatchPlan> {
        let region = self
            .validator
            .validate_region(&request.region)
            .map_err(GatewayError::bad_request)?;
        let search_type = self.validator.validate_search_type(&request.search_type);

        if request.queries.is_empty() {
            return Err(GatewayError::bad_request("queries list cannot be empty."));
        }

        if request.queries.len() > MAX_BATCH_SIZE {
            return Err(GatewayError::bad_request(format!(
                "queries list exceeds max size of {}.",
                MAX_BATCH_SIZE
            )));
        }

        if self.maintenance.is_under_maintenance(region) {
            warn!(region = %region, "batch refused, region under maintenance");
            return Err(GatewayError::maintenance(format!(
                "{} region is currently under maintenance.",
                region
            )));
        }

        Ok(BatchPlan {
            region,
            search_type,
            bypass_cache: false,
        })
    }

    /// Effective cache bypass for the batch. Unauthorized requests are
    /// downgraded silently.
    pub fn resolve_bypass(&self, requested: bool, ctx: &RequestContext) -> bool {
        if !requested {
            return false;
        }

        let authorized = ctx
            .credential
            .as_deref()
            .is_some_and(|credential| self.authorizer.is_authorized(credential));

        if !authorized {
            warn!(
                client = %ctx.client_id,
                "cache bypass requested without authorization, ignoring"
            );
        }
        authorized
    }

    /// Drive one query to a terminal outcome
    pub async fn classify(&self, raw: &str, plan: &BatchPlan, client_id: &str) -> ItemOutcome {
        let mut stage = Stage::Validate;
        loop {
            stage = match stage {
                Stage::Validate => self.validate_stage(raw, plan),
                Stage::Lookup(query) => self.lookup_stage(query, plan).await,
                Stage::Admit(query) => self.admit_stage(query, plan, client_id).await,
                Stage::Done(outcome) => return outcome,
            };
        }
    }

    pub fn validate_stage(&self, raw: &str, plan: &BatchPlan) -> Stage {
        match self
            .validator
            .validate_query(raw, plan.region, plan.search_type)
        {
            Ok(query) if plan.bypass_cache => Stage::Admit(query),
            Ok(query) => Stage::Lookup(query),
            Err(message) => Stage::Done(ItemOutcome::invalid(raw, message)),
        }
    }

    pub async fn lookup_stage(&self, query: String, plan: &BatchPlan) -> Stage {
        let key = SearchKey::new(plan.region, query, plan.search_type);
        match self.cache.get_record(&key).await {
            Some(record) if record.is_success() => {
                Stage::Done(ItemOutcome::cached(key.query, record.data))
            }
            Some(record) => Stage::Done(ItemOutcome::cached_failure(key.query, record.status)),
            None => Stage::Admit(key.query),
        }
    }

    pub async fn admit_stage(&self, query: String, plan: &BatchPlan, client_id: &str) -> Stage {
        let key = SearchKey::new(plan.region, query, plan.search_type);
        let outcome = match self.admission.try_admit(client_id, &key).await {
            AdmissionOutcome::Started => ItemOutcome::started(key.query),
            AdmissionOutcome::Pending => ItemOutcome::pending(key.query),
            AdmissionOutcome::CeilingExceeded => ItemOutcome::rejected(key.query),
        };
        Stage::Done(outcome)
    }
}
