//! Pricing command: show plan prices for one billing cycle.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use essay_check_core::pricing::{BillingCycle, PlanPrice};

use super::read_input_file;

/// Arguments for the `pricing` subcommand.
#[derive(Args, Debug)]
pub struct PricingArgs {
    /// JSON array of plans (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Billing cycle to show.
    #[arg(long, value_enum, default_value_t)]
    pub cycle: BillingCycle,

    /// Flip the selected cycle, as the page toggle does.
    #[arg(long)]
    pub toggle: bool,

    /// Shorthand for `--cycle yearly`.
    #[arg(long, conflicts_with_all = ["cycle", "toggle"])]
    pub yearly: bool,
}

impl PricingArgs {
    fn selected_cycle(&self) -> BillingCycle {
        if self.yearly {
            BillingCycle::Yearly
        } else if self.toggle {
            self.cycle.toggle()
        } else {
            self.cycle
        }
    }
}

#[derive(Serialize)]
struct PlanView<'a> {
    name: &'a str,
    price: &'a str,
    period: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    savings: Option<&'a str>,
}

fn plan_views(plans: &[PlanPrice], cycle: BillingCycle) -> Vec<PlanView<'_>> {
    plans
        .iter()
        .map(|plan| PlanView {
            name: &plan.name,
            price: plan.display(cycle),
            period: cycle.period_label(),
            savings: plan.visible_savings(cycle),
        })
        .collect()
}

/// Print each plan's price for the selected cycle.
#[instrument(name = "cmd_pricing", skip_all, fields(file = %args.file))]
pub fn cmd_pricing(
    args: PricingArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let cycle = args.selected_cycle();
    debug!(?cycle, "executing pricing command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let plans: Vec<PlanPrice> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse plans from {}", args.file))?;
    let views = plan_views(&plans, cycle);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in views {
        let name = if view.name.is_empty() { "Plan" } else { view.name };
        print!("{}: {}{}", name.bold(), view.price, view.period.dimmed());
        if let Some(savings) = view.savings {
            print!(" {}", savings.green());
        }
        println!();
    }
    Ok(())
}
