//! The per-record transformer and its run-scoped state.
//!
//! A [`Transformer`] exclusively owns the persona map, thread cache, and
//! source-id -> output-id cache for one run; nothing is shared across runs,
//! so independent runs (and tests) never interfere. Records are sorted
//! chronologically exactly once before transformation; thread memoization
//! and statistics are computed in chronological order, which is a
//! precondition for deterministic thread-id assignment.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Duration;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use mailforge_core::{
    Config, MessageBody, MessageHeader, MessagePart, OutputMessage, Persona, RawRecord,
    RunStatistics, addr, encoding, ident,
};

use crate::labels;
use crate::personas;
use crate::snippet;
use crate::threads::ThreadResolver;

/// Fixed overhead standing in for headers/envelope in size estimates.
const ENVELOPE_OVERHEAD: usize = 512;

static EMAIL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// Recoverable per-record transform failure: logged, counted, never fatal
/// to the run.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("record has no sender and no recipients")]
    NoParticipants,
}

/// Run-scoped transformer state.
pub struct Transformer<'cfg> {
    cfg: &'cfg Config,
    owner_fragment: String,
    primary_address: String,
    time_shift: Duration,
    personas: BTreeMap<String, Persona>,
    threads: ThreadResolver,
    id_cache: HashMap<String, String>,
    stats: RunStatistics,
}

impl<'cfg> Transformer<'cfg> {
    #[must_use]
    pub fn new(cfg: &'cfg Config, owner_fragment: &str, primary_address: &str) -> Self {
        Self {
            cfg,
            owner_fragment: owner_fragment.to_lowercase(),
            primary_address: primary_address.to_string(),
            time_shift: cfg.time_shift(),
            personas: BTreeMap::new(),
            threads: ThreadResolver::new(),
            id_cache: HashMap::new(),
            stats: RunStatistics::default(),
        }
    }

    /// Transforms the full record set in chronological order.
    ///
    /// Per-record failures are appended to the run's error list and
    /// skipped; the returned messages are the successful transforms.
    pub fn transform_corpus(&mut self, mut records: Vec<RawRecord>) -> Vec<OutputMessage> {
        // Equal timestamps order by source id so the sort is a total order.
        records.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });

        self.personas = personas::build_persona_map(self.cfg, &records, &self.owner_fragment);

        let mut messages = Vec::with_capacity(records.len());
        for record in &records {
            self.stats.total_processed += 1;
            if record.date_is_fallback {
                self.stats.date_fallbacks += 1;
            }
            match self.transform_record(record) {
                Ok(message) => {
                    messages.push(message);
                    self.stats.total_transformed += 1;
                }
                Err(err) => {
                    warn!(source_id = %record.message_id, %err, "record transform failed");
                    self.stats
                        .errors
                        .push(format!("error transforming {}: {err}", record.message_id));
                }
            }
        }

        self.stats.thread_count = self.threads.thread_count();
        self.stats.persona_map = self.personas.clone();
        messages
    }

    /// Finalized run statistics.
    #[must_use]
    pub fn into_stats(self) -> RunStatistics {
        self.stats
    }

    fn transform_record(&mut self, record: &RawRecord) -> Result<OutputMessage, TransformError> {
        if record.from.is_empty()
            && record.to.is_empty()
            && record.cc.is_empty()
            && record.bcc.is_empty()
        {
            return Err(TransformError::NoParticipants);
        }

        let output_id = self
            .id_cache
            .entry(record.message_id.clone())
            .or_insert_with(|| ident::message_id(&record.message_id))
            .clone();
        let thread_id = self.threads.resolve(record);
        let body = self.rewrite_body(&record.body);
        let headers = self.build_headers(record, &output_id);
        let label_ids = labels::infer_labels(&self.cfg.label_rules, record, &self.owner_fragment);
        let shifted = record.date + self.time_shift;

        Ok(OutputMessage {
            id: output_id,
            thread_id,
            label_ids,
            snippet: snippet::generate_snippet(&body),
            history_id: shifted.timestamp().to_string(),
            internal_date: shifted.timestamp_millis().to_string(),
            size_estimate: record.body.len() + ENVELOPE_OVERHEAD,
            payload: MessagePart {
                part_id: String::new(),
                mime_type: "text/plain".to_string(),
                filename: String::new(),
                headers,
                body: Some(MessageBody {
                    size: body.len(),
                    data: BASE64.encode(body.as_bytes()),
                }),
                parts: Vec::new(),
            },
        })
    }

    fn build_headers(&self, record: &RawRecord, output_id: &str) -> Vec<MessageHeader> {
        let mut headers = vec![MessageHeader {
            name: "From".to_string(),
            value: self.rewrite_address(&record.from),
        }];

        if !record.to.is_empty() {
            headers.push(MessageHeader {
                name: "To".to_string(),
                value: self.rewrite_address_list(&record.to),
            });
        }
        if !record.cc.is_empty() {
            headers.push(MessageHeader {
                name: "Cc".to_string(),
                value: self.rewrite_address_list(&record.cc),
            });
        }

        let shifted = record.date + self.time_shift;
        headers.push(MessageHeader {
            name: "Subject".to_string(),
            value: record.subject.clone(),
        });
        headers.push(MessageHeader {
            name: "Date".to_string(),
            value: shifted.to_rfc2822(),
        });
        headers.push(MessageHeader {
            name: "Message-ID".to_string(),
            value: format!("<{output_id}@{}>", self.cfg.message_id_domain),
        });

        headers
    }

    /// Rewrites one address to its persona form.
    ///
    /// Owner addresses become the fixed primary identity; mapped addresses
    /// take their persona; anything else gets a synthesized identity,
    /// keeping the original domain only when it is not the source
    /// organization's own.
    fn rewrite_address(&self, raw: &str) -> String {
        let Some(bare) = addr::extract_address(raw) else {
            return format!("Unknown <unknown@{}>", self.cfg.placeholder_domain);
        };

        if bare.contains(&self.owner_fragment) {
            return format!("You <{}>", self.primary_address);
        }
        if let Some(persona) = self.personas.get(&bare) {
            return format!("{} <{}>", persona.name, persona.email);
        }

        let name = addr::display_name(&bare);
        let domain = addr::domain(&bare)
            .filter(|d| *d != self.cfg.source_org_domain.as_str())
            .unwrap_or(self.cfg.placeholder_domain.as_str());
        format!("{name} <{}@{domain}>", addr::local_part(&name))
    }

    fn rewrite_address_list(&self, entries: &[String]) -> String {
        entries
            .iter()
            .map(|entry| self.rewrite_address(entry))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Repairs transfer encoding, rewrites embedded address literals via
    /// the persona map, and substitutes the source organization's name.
    fn rewrite_body(&self, body: &str) -> String {
        let repaired = encoding::fix_transfer_encoding(body);

        let rewritten = EMAIL_LITERAL.replace_all(&repaired, |caps: &regex::Captures<'_>| {
            let found = &caps[0];
            let lower = found.to_lowercase();
            if lower.contains(&self.owner_fragment) {
                return self.primary_address.clone();
            }
            if let Some(persona) = self.personas.get(&lower) {
                return persona.email.clone();
            }
            found.to_string()
        });

        rewritten
            .replace(&self.cfg.source_org_name, &self.cfg.placeholder_org_name)
            .replace(
                &self.cfg.source_org_name.to_uppercase(),
                &self.cfg.placeholder_org_name.to_uppercase(),
            )
    }
}
