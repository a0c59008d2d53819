//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one simulated playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_zone: u32,
    pub final_level: u32,
    pub turns: u64,
    pub victories: u64,
    pub deaths: u64,
    pub revivals: u64,
    pub phoenix_saves: u64,
    pub boosts: u64,
    pub fragments: u64,
    pub chests_opened: u64,
    pub coins_earned: u64,
    pub reached_target: bool,
    /// Ended on a defeat with revival disabled.
    pub perished: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_perished: u32,
    pub runs_timed_out: u32,

    pub avg_final_zone: f64,
    pub avg_final_level: f64,
    pub avg_victories: f64,
    pub avg_deaths: f64,
    pub avg_revivals: f64,
    pub avg_boosts: f64,
    pub avg_fragments: f64,
    pub avg_turns_to_complete: f64,

    pub zone_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_perished = runs.iter().filter(|r| r.perished).count() as u32;
        let runs_timed_out = num_runs - runs_completed - runs_perished;

        let completed: Vec<&RunStats> = runs.iter().filter(|r| r.reached_target).collect();
        let avg_turns_to_complete = if completed.is_empty() {
            0.0
        } else {
            completed.iter().map(|r| r.turns as f64).sum::<f64>() / completed.len() as f64
        };

        let mut zone_distribution = BTreeMap::new();
        for run in &runs {
            *zone_distribution.entry(run.final_zone).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_completed,
            runs_perished,
            runs_timed_out,
            avg_final_zone: average(&runs, |r| r.final_zone as f64),
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_victories: average(&runs, |r| r.victories as f64),
            avg_deaths: average(&runs, |r| r.deaths as f64),
            avg_revivals: average(&runs, |r| r.revivals as f64),
            avg_boosts: average(&runs, |r| r.boosts as f64),
            avg_fragments: average(&runs, |r| r.fragments as f64),
            avg_turns_to_complete,
            zone_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} perished, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_perished, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Zone:      {:.1}\n", self.avg_final_zone));
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Victories:       {:.0}\n", self.avg_victories));
        report.push_str(&format!(
            "  Avg Turns to Clear:  {:.0}\n\n",
            self.avg_turns_to_complete
        ));

        report.push_str("── SETBACKS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Revivals:        {:.1}\n\n", self.avg_revivals));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Boosts:          {:.1}\n", self.avg_boosts));
        report.push_str(&format!("  Avg Fragments:       {:.1}\n\n", self.avg_fragments));

        report.push_str("── FINAL ZONE ───────────────────────────────────────────────────\n");
        for (zone, count) in &self.zone_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Zone {:3}: {:>5.1}% {}\n", zone, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
