// Shared test helpers for the record checks.
//
// `ScriptedResolver` answers from a fixed table and records every query it
// receives, so tests can assert both on verdicts and on what was asked.
// Per-name delays let tests make answers arrive out of query order.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::dns::{DnsResolver, Query, RecordType, ResolverResponse};
use crate::error_handling::ResolveError;

/// What the resolver does for one query.
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Respond(ResolverResponse),
    /// Fail the request with this HTTP status
    Fail(u16),
}

/// In-memory resolver; unscripted names answer NXDOMAIN.
#[derive(Debug, Default)]
pub(crate) struct ScriptedResolver {
    scripts: HashMap<(String, RecordType), Script>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<Query>>,
    answered: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful TXT response.
    pub(crate) fn txt(self, name: &str, answers: &[&str]) -> Self {
        self.respond(
            name,
            RecordType::Txt,
            ResolverResponse::with_answers(answers.iter().copied()),
        )
    }

    /// Scripts a successful MX response.
    pub(crate) fn mx(self, name: &str, answers: &[&str]) -> Self {
        self.respond(
            name,
            RecordType::Mx,
            ResolverResponse::with_answers(answers.iter().copied()),
        )
    }

    pub(crate) fn respond(
        mut self,
        name: &str,
        record_type: RecordType,
        response: ResolverResponse,
    ) -> Self {
        self.scripts
            .insert((name.to_string(), record_type), Script::Respond(response));
        self
    }

    pub(crate) fn fail(mut self, name: &str, record_type: RecordType, status: u16) -> Self {
        self.scripts
            .insert((name.to_string(), record_type), Script::Fail(status));
        self
    }

    /// Holds every answer for `name` back by `delay`.
    pub(crate) fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Names answered so far, in completion order.
    pub(crate) fn answered_names(&self) -> Vec<String> {
        self.answered.lock().expect("answer log poisoned").clone()
    }

    /// Names queried so far, in call order.
    pub(crate) fn queried_names(&self) -> Vec<String> {
        self.queries
            .lock()
            .expect("query log poisoned")
            .iter()
            .map(|q| q.name.clone())
            .collect()
    }
}

#[async_trait]
impl DnsResolver for ScriptedResolver {
    async fn resolve(&self, query: &Query) -> Result<ResolverResponse, ResolveError> {
        self.queries
            .lock()
            .expect("query log poisoned")
            .push(query.clone());

        if let Some(delay) = self.delays.get(&query.name) {
            tokio::time::sleep(*delay).await;
        }
        self.answered
            .lock()
            .expect("answer log poisoned")
            .push(query.name.clone());

        match self.scripts.get(&(query.name.clone(), query.record_type)) {
            Some(Script::Respond(response)) => Ok(response.clone()),
            Some(Script::Fail(status)) => Err(ResolveError::HttpStatus {
                status: *status,
                endpoint: "scripted".to_string(),
            }),
            None => Ok(ResolverResponse::empty(3)),
        }
    }
}
