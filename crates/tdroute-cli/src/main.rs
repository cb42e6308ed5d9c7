// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tdroute_model::prelude::RouteOutcome;
use tdroute_solver::prelude::{HighsSolver, RoutePlanner, SolverConfig, toy_instance};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    iteration: usize,
    seed: u64,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    status: &'static str,
    objective: Option<f64>,
    regret: Option<f64>,
    route: Option<Vec<usize>>,
}

fn main() {
    enable_tracing();

    let seeds: Vec<u64> = std::env::args()
        .skip(1)
        .filter_map(|arg| arg.parse().ok())
        .collect();
    let seeds = if seeds.is_empty() { vec![42] } else { seeds };

    let planner = RoutePlanner::with_config(
        HighsSolver::new().with_time_limit(60.0),
        SolverConfig::new(),
    );

    let mut results: Vec<RunRecord> = Vec::new();
    for (iter, &seed) in seeds.iter().enumerate() {
        let iteration = iter + 1;

        let instance = match toy_instance(seed) {
            Ok(instance) => instance,
            Err(e) => {
                tracing::error!("Skipping seed {}: invalid instance: {}", seed, e);
                continue;
            }
        };
        tracing::info!(
            "Solving [{}] seed {} with {} nodes and {} time slots",
            iteration,
            seed,
            instance.nodes(),
            instance.grid().intervals()
        );

        let start_ts = Utc::now();
        let report = match planner.solve(&instance) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Failed [{}] seed {}: {}", iteration, seed, e);
                continue;
            }
        };
        let end_ts = Utc::now();

        tracing::info!("Formulation [{}]: {}", iteration, report.size());
        let record = match report.outcome() {
            RouteOutcome::Optimal(solution) => {
                tracing::info!(
                    "Finished [{}] seed {}: objective={:.3}, regret={:.3}, runtime={:?}",
                    iteration,
                    seed,
                    solution.objective(),
                    solution.regret(),
                    report.elapsed()
                );
                RunRecord {
                    iteration,
                    seed,
                    start_ts,
                    end_ts,
                    runtime_ms: report.elapsed().as_millis(),
                    status: "optimal",
                    objective: Some(solution.objective()),
                    regret: Some(solution.regret()),
                    route: Some(solution.route().iter().map(|n| n.value()).collect()),
                }
            }
            RouteOutcome::Infeasible => {
                tracing::warn!(
                    "Finished [{}] seed {}: infeasible, runtime={:?}",
                    iteration,
                    seed,
                    report.elapsed()
                );
                RunRecord {
                    iteration,
                    seed,
                    start_ts,
                    end_ts,
                    runtime_ms: report.elapsed().as_millis(),
                    status: "infeasible",
                    objective: None,
                    regret: None,
                    route: None,
                }
            }
        };
        results.push(record);
    }

    let out_path = PathBuf::from("route_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&results).expect("serialize results");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} run record(s) to {}",
                results.len(),
                out_path.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to write results to {}: {}", out_path.display(), e);
        }
    }
}
