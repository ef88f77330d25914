// src/crawl/runner.rs
// =============================================================================
// The crawl loop.
//
// A crawl moves through three states:
//
//   Seeded ──> Running(round 0) ──> Running(round 1) ──> ... ──> Terminated
//
// Each round:
// 1. Print "Fetch <N> urls" for the wave we're about to send
// 2. Run the whole wave through the wave executor
// 3. Cap the flattened children; the result is the next round's wave
//
// The loop stops when the wave is empty or after max_rounds rounds, whichever
// comes first. Rounds never overlap: round k+1 starts only after every
// request of round k has settled.
// =============================================================================

use std::io::Write;

use clap::ValueEnum;
use tracing::{debug, info};

use super::frontier::cap;
use super::wave::{run_wave, FailurePolicy};
use crate::error::CrawlError;
use crate::fetch::Connector;

/// How long an HTTP session lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SessionScope {
    /// One session for the whole crawl; connections are reused across rounds
    #[default]
    Run,
    /// A fresh session for every round, dropped when the round ends
    Round,
}

/// Knobs of the crawl loop, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub max_rounds: usize,
    pub max_wave_size: usize,
    pub session_scope: SessionScope,
    pub on_error: FailurePolicy,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            max_wave_size: 10_000,
            session_scope: SessionScope::default(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// What happened during one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round: usize,
    /// URLs fetched this round
    pub wave_size: usize,
    /// Children found before capping
    pub discovered: usize,
    /// Fetches skipped under FailurePolicy::Skip
    pub failed: usize,
    pub next_wave_size: usize,
}

/// Why the crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    FrontierEmpty,
    RoundBudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub rounds: Vec<RoundReport>,
    pub termination: Termination,
}

impl CrawlSummary {
    /// Total number of fetches issued over the run
    pub fn fetches(&self) -> usize {
        self.rounds.iter().map(|r| r.wave_size).sum()
    }
}

enum CrawlState {
    Seeded(Vec<String>),
    Running { round: usize, wave: Vec<String> },
    Terminated(Termination),
}

/// Drives the rounds. `progress` receives one line per round.
pub struct Crawler<C, W> {
    connector: C,
    settings: CrawlSettings,
    progress: W,
}

impl<C, W> Crawler<C, W>
where
    C: Connector,
    W: Write,
{
    pub fn new(connector: C, settings: CrawlSettings, progress: W) -> Self {
        Self {
            connector,
            settings,
            progress,
        }
    }

    pub async fn run(mut self, seed: String) -> Result<CrawlSummary, CrawlError> {
        let shared = match self.settings.session_scope {
            SessionScope::Run => Some(self.connector.connect()?),
            SessionScope::Round => None,
        };

        let mut rounds = Vec::new();
        let mut state = CrawlState::Seeded(vec![seed]);

        let termination = loop {
            state = match state {
                CrawlState::Seeded(wave) => CrawlState::Running { round: 0, wave },
                CrawlState::Running { wave, .. } if wave.is_empty() => {
                    CrawlState::Terminated(Termination::FrontierEmpty)
                }
                CrawlState::Running { round, .. } if round >= self.settings.max_rounds => {
                    CrawlState::Terminated(Termination::RoundBudgetExhausted)
                }
                CrawlState::Running { round, wave } => {
                    let (report, next) = self.run_round(round, wave, shared.as_ref()).await?;
                    rounds.push(report);
                    CrawlState::Running {
                        round: round + 1,
                        wave: next,
                    }
                }
                CrawlState::Terminated(reason) => break reason,
            };
        };

        let summary = CrawlSummary {
            rounds,
            termination,
        };
        info!(
            rounds = summary.rounds.len(),
            fetches = summary.fetches(),
            termination = ?summary.termination,
            "crawl finished"
        );
        Ok(summary)
    }

    async fn run_round(
        &mut self,
        round: usize,
        wave: Vec<String>,
        shared: Option<&C::Session>,
    ) -> Result<(RoundReport, Vec<String>), CrawlError> {
        writeln!(self.progress, "Fetch {} urls", wave.len())?;

        let outcome = match shared {
            Some(session) => run_wave(session, &wave, self.settings.on_error).await?,
            None => {
                debug!(round, "opening a session for this round");
                let session = self.connector.connect()?;
                run_wave(&session, &wave, self.settings.on_error).await?
            }
        };

        let discovered = outcome.children.len();
        let next = cap(outcome.children, self.settings.max_wave_size);

        let report = RoundReport {
            round,
            wave_size: wave.len(),
            discovered,
            failed: outcome.failed,
            next_wave_size: next.len(),
        };
        info!(
            round = report.round,
            wave = report.wave_size,
            discovered = report.discovered,
            failed = report.failed,
            next = report.next_wave_size,
            "round complete"
        );

        Ok((report, next))
    }
}
