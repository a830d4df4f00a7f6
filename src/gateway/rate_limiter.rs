use crate::config::toml_config::RateLimitConfig;
use crate::utils::error::{AppError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    ExtractPdf,
    LoadTemplate,
    SaveTemplate,
    SaveDocument,
    ListConsultants,
    Generate,
    ExportBundle,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::ExtractPdf,
        Channel::LoadTemplate,
        Channel::SaveTemplate,
        Channel::SaveDocument,
        Channel::ListConsultants,
        Channel::Generate,
        Channel::ExportBundle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::ExtractPdf => "extract_pdf",
            Channel::LoadTemplate => "load_template",
            Channel::SaveTemplate => "save_template",
            Channel::SaveDocument => "save_document",
            Channel::ListConsultants => "list_consultants",
            Channel::Generate => "generate",
            Channel::ExportBundle => "export_bundle",
        }
    }

    fn quota_from(&self, config: &RateLimitConfig) -> u32 {
        match self {
            Channel::ExtractPdf => config.extract_pdf,
            Channel::LoadTemplate => config.load_template,
            Channel::SaveTemplate => config.save_template,
            Channel::SaveDocument => config.save_document,
            Channel::ListConsultants => config.list_consultants,
            Channel::Generate => config.generate,
            Channel::ExportBundle => config.export_bundle,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sliding-window call counter with an independent quota per channel.
///
/// Each channel keeps the instants of its accepted calls. On every check,
/// instants older than the window are dropped; the call is accepted only if
/// fewer than `quota` remain. Rejected calls are not recorded, so a caller
/// hammering a saturated channel does not extend its own lockout.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    quotas: HashMap<Channel, u32>,
    calls: Mutex<HashMap<Channel, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, quotas: HashMap<Channel, u32>) -> Self {
        Self {
            window,
            quotas,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        let quotas = Channel::ALL
            .into_iter()
            .map(|channel| (channel, channel.quota_from(config)))
            .collect();
        Self::new(Duration::from_secs(config.window_seconds), quotas)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn quota(&self, channel: Channel) -> u32 {
        self.quotas.get(&channel).copied().unwrap_or(0)
    }

    pub fn check(&self, channel: Channel) -> Result<()> {
        self.check_at(channel, Instant::now())
    }

    pub fn check_at(&self, channel: Channel, now: Instant) -> Result<()> {
        let quota = self.quota(channel) as usize;
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| AppError::processing("rate limiter state poisoned"))?;
        let log = calls.entry(channel).or_default();
        prune(log, now, self.window);

        if log.len() >= quota {
            let retry_after = log
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            tracing::warn!(
                "Rate limit hit on {} ({} calls in {:?})",
                channel,
                log.len(),
                self.window
            );
            return Err(AppError::RateLimited {
                channel: channel.name().to_string(),
                retry_after,
            });
        }

        log.push_back(now);
        Ok(())
    }

    pub fn remaining(&self, channel: Channel) -> usize {
        self.remaining_at(channel, Instant::now())
    }

    pub fn remaining_at(&self, channel: Channel, now: Instant) -> usize {
        let quota = self.quota(channel) as usize;
        let Ok(mut calls) = self.calls.lock() else {
            return 0;
        };
        let log = calls.entry(channel).or_default();
        prune(log, now, self.window);
        quota.saturating_sub(log.len())
    }
}

fn prune(log: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = log.front() {
        if now.saturating_duration_since(*oldest) >= window {
            log.pop_front();
        } else {
            break;
        }
    }
}
