//! `slotwatch run`: one orchestrated pass

use std::fmt::Write as _;
use std::time::Instant;

use slotwatch_domain::{DeliveryStatus, Result, RunReport, SlotSet};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Observe, persist and notify once.
pub async fn execute_run(context: &AppContext) -> Result<RunReport> {
    let start = Instant::now();
    let result = context.watch_service.run_once().await;

    log_command_execution("run", start.elapsed(), result.as_ref().err());
    result
}

/// Console summary of a finished run.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    write_listing(&mut out, "All slots", &report.observed);
    write_listing(&mut out, "New slots", &report.new_slots);

    let verdict = if report.decision.fires { "notify" } else { "silent" };
    let _ = writeln!(out, "Decision: {verdict} ({})", report.decision.reason.describe());

    let delivery = match &report.delivery {
        DeliveryStatus::Failed(detail) => format!("failed ({detail})"),
        other => other.outcome().to_string(),
    };
    let _ = write!(out, "Delivery: {delivery}");
    out
}

pub(crate) fn write_listing(out: &mut String, title: &str, slots: &SlotSet) {
    let _ = writeln!(out, "{title} ({}):", slots.len());
    if slots.is_empty() {
        out.push_str("- none\n");
    }
    for line in slots.display_lines() {
        let _ = writeln!(out, "- {line}");
    }
}
