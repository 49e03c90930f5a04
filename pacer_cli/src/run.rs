//! Config resolution, run execution, and result reporting.

use crate::cli::Cli;
use eyre::{Result, WrapErr};
use pacer_config::Config;
use pacer_core::{RunMode, RunPlan, RunReport, TickStats};
use pacer_traits::MonotonicClock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Merge the optional config file with command-line overrides and validate.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => pacer_config::load_file(path)?,
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(rate) = cli.rate {
        cfg.pacing.rate = rate;
    }
    if let Some(d) = cli.duration {
        cfg.pacing.duration = d;
    }
    if let Some(n) = cli.exactly {
        cfg.pacing.exactly = n;
    }
    if cli.baseline {
        cfg.pacing.baseline = true;
    }

    cfg.validate().wrap_err("invalid configuration")?;
    Ok(cfg)
}

pub fn run(cli: &Cli, cfg: &Config) -> Result<()> {
    let plan = RunPlan::from(cfg);
    let report = pacer_core::execute(&plan, MonotonicClock::new(), cli.stats)?;
    let stats = if cli.stats { report.stats() } else { None };

    if cli.json {
        println!("{}", summary_json(&plan, &report, stats.as_ref()));
    } else {
        let res = &report.result;
        println!(
            "Done after {:?} - did {} iterations actual rate {:.3}",
            res.elapsed, res.iterations, res.actual_rate
        );
    }
    if cli.stats {
        print_stats(&report, stats.as_ref());
    }
    Ok(())
}

fn mode_name(mode: RunMode) -> &'static str {
    match mode {
        RunMode::Duration(_) => "duration",
        RunMode::Count(_) => "count",
    }
}

/// One JSON object describing the finished run.
pub fn summary_json(plan: &RunPlan, report: &RunReport, stats: Option<&TickStats>) -> String {
    use serde_json::json;

    let res = &report.result;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    let target = match plan.mode {
        RunMode::Duration(d) => json!({ "duration_ms": d.as_secs_f64() * 1e3 }),
        RunMode::Count(n) => json!({ "count": n }),
    };
    let stats = stats.map(|s| {
        json!({
            "ticks": s.ticks,
            "period_us": s.period.as_secs_f64() * 1e6,
            "min_us": s.min_us,
            "avg_us": s.avg_us,
            "max_us": s.max_us,
            "stdev_us": s.stdev_us,
            "late": s.late,
        })
    });

    json!({
        "timestamp": timestamp,
        "pacer": report.pacer,
        "rate": report.rate,
        "configured_rate": plan.pacer.configured_rate(),
        "mode": mode_name(res.mode),
        "target": target,
        "iterations": res.iterations,
        "elapsed_ms": res.elapsed.as_secs_f64() * 1e3,
        "actual_rate": res.actual_rate,
        "stats": stats,
    })
    .to_string()
}

/// Print inter-tick interval stats to stderr.
fn print_stats(report: &RunReport, stats: Option<&TickStats>) {
    eprintln!("\n--- Pacer Stats ---");
    eprintln!("Pacer: {} @ {} / sec", report.pacer, report.rate);
    match stats {
        Some(s) => {
            eprintln!("Ticks: {}", s.ticks);
            eprintln!("Period (us): {:.1}", s.period.as_secs_f64() * 1e6);
            eprintln!(
                "Interval min/avg/max/stdev (us): {} / {:.1} / {} / {:.1}",
                s.min_us, s.avg_us, s.max_us, s.stdev_us
            );
            eprintln!("Late ticks (> period + 10ms): {}", s.late);
        }
        None => eprintln!("Ticks: {} (too few to measure)", report.result.iterations),
    }
    eprintln!("-------------------\n");
}
