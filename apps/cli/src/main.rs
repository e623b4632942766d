use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    detail::{format_date, task_description, DetailSections},
    display::{card_name, tab_label},
    export,
    list_view::{self, summary_line},
    load_settings, search, DashboardTab, ListFilter, OrderRepository, SortDirection, SortField,
    SortState,
};
use shared::{DashboardError, ErrorReport, Journey, Order, Priority};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Settings file; defaults to ./dashboard.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sections and subcategory counts, optionally narrowed by a search
    Summary {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Orders of one subcategory
    List {
        subcategory: String,
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        json: bool,
    },
    /// One order in detail
    Show {
        order_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Writes a subcategory's current view as comma-separated text
    Export {
        subcategory: String,
        #[command(flatten)]
        view: ViewArgs,
        /// Target directory; defaults to the configured export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    #[arg(long, short)]
    query: Option<String>,
    /// high, medium or low
    #[arg(long)]
    priority: Option<String>,
    /// Provide, Modify or Cease
    #[arg(long)]
    journey: Option<String>,
    /// Sort field, e.g. start_date, customer, progress
    #[arg(long, default_value = "start_date")]
    sort: String,
    #[arg(long)]
    asc: bool,
}

impl ViewArgs {
    fn filter(&self) -> Result<ListFilter> {
        let priority = match &self.priority {
            Some(raw) => match Priority::parse(raw) {
                Some(priority) => Some(priority),
                None => bail!("unknown priority '{raw}'"),
            },
            None => None,
        };
        let journey = match &self.journey {
            Some(raw) => match Journey::parse(raw) {
                Some(journey) => Some(journey),
                None => bail!("unknown journey '{raw}'"),
            },
            None => None,
        };
        Ok(ListFilter {
            query: self.query.clone().unwrap_or_default(),
            priority,
            journey,
        })
    }

    fn sort(&self) -> Result<SortState> {
        let Some(field) = SortField::parse(&self.sort) else {
            bail!("unknown sort field '{}'", self.sort);
        };
        let direction = if self.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Ok(SortState::new(field, direction))
    }
}

fn report_line(err: &DashboardError) -> Result<String> {
    Ok(serde_json::to_string(&ErrorReport::from(err))?)
}

/// Under `--json` a failed lookup also prints its report to stdout.
fn lookup<T>(found: Result<T, DashboardError>, json: bool) -> Result<T> {
    match found {
        Ok(value) => Ok(value),
        Err(err) => {
            if json {
                println!("{}", report_line(&err)?);
            }
            Err(err.into())
        }
    }
}

fn print_summary(repository: &OrderRepository, query: &str, json: bool) -> Result<()> {
    let sections = search::filter_sections(repository.sections(), query);
    if json {
        println!("{}", serde_json::to_string_pretty(&*sections)?);
        return Ok(());
    }
    if let Some(banner) = search::search_banner(&sections, query) {
        println!("{banner}");
    }
    for tab in DashboardTab::ALL {
        let total = repository
            .section(tab.category())
            .map_or(0, |section| section.count);
        println!("{} ({total})", tab_label(tab));
        match search::tab_content(&sections, tab, query) {
            search::TabContent::Section(section) => {
                for sub in &section.subcategories {
                    println!(
                        "  {:<22} {:>3}  matching {}",
                        card_name(&sub.name),
                        sub.count,
                        sub.orders.len()
                    );
                }
            }
            search::TabContent::Empty(reason) => println!("  {}", reason.hint()),
        }
    }
    for drift in repository.count_drift() {
        println!(
            "warning: {} declares {} orders but holds {}",
            drift.subcategory, drift.planned, drift.actual
        );
    }
    Ok(())
}

fn print_rows(rows: &[&Order], total: usize) {
    println!(
        "{:<10} {:<26} {:<12} {:<8} {:<7} {:<5} {:>4}",
        "ORDER", "CUSTOMER", "START", "JOURNEY", "PRIO", "PHASE", "PCT"
    );
    for order in rows {
        println!(
            "{:<10} {:<26} {:<12} {:<8} {:<7} {:<5} {:>3}%",
            order.id,
            order.customer_name,
            order.start_date,
            order.journey,
            order.priority,
            order.current_project_progression,
            order.progress
        );
    }
    println!("{}", summary_line(rows.len(), total));
}

fn print_order(order: &Order, task_drilldown: bool) {
    println!("Order {}  ({})", order.id, order.service_id);
    println!("  Customer:     {}", order.customer_name);
    println!(
        "  Status:       {} / {} / {}",
        order.status, order.category, order.subcategory
    );
    println!(
        "  Journey:      {}  Priority: {}  Phase: {}",
        order.journey,
        order.priority.label(),
        order.current_project_progression
    );
    println!("  Progress:     {}%", order.progress);
    println!("  Start:        {}", format_date(Some(order.start_date.as_str())));
    println!("  Completion:   {}", format_date(order.completion_date.as_deref()));
    println!(
        "  Team:         {}",
        order.assigned_team.as_deref().unwrap_or("-")
    );
    println!("  Description:  {}", order.description);
    println!("  Current task: {}", order.current_task);
    if task_drilldown {
        println!(
            "                {}",
            task_description(&order.current_task, order.journey)
        );
    }

    let sections = DetailSections::for_order(order);
    if sections.delay_reason_card {
        println!(
            "  Delay reason: {}",
            order.delay_reason.as_deref().unwrap_or_default()
        );
    }
    if let Some(cc_date) = order.cc_date.as_deref() {
        println!("  CC date:      {}", format_date(Some(cc_date)));
    }
    if sections.queue_card {
        println!(
            "  Queue:        {} ({} business days)",
            order.queue_name.as_deref().unwrap_or_default(),
            order.business_days_in_queue.unwrap_or_default()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let repository = OrderRepository::generate();

    match cli.command {
        Command::Summary { search, json } => {
            print_summary(&repository, search.as_deref().unwrap_or_default(), json)?;
        }
        Command::List {
            subcategory,
            view,
            json,
        } => {
            let (_, bucket) = lookup(repository.subcategory(&subcategory), json)?;
            let rows = list_view::view(&bucket.orders, &view.filter()?, view.sort()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_rows(&rows, bucket.orders.len());
            }
        }
        Command::Show { order_id, json } => {
            let order = lookup(repository.find_order(&order_id), json)?;
            if json {
                println!("{}", serde_json::to_string_pretty(order)?);
            } else {
                print_order(order, settings.task_drilldown);
            }
        }
        Command::Export {
            subcategory,
            view,
            out,
        } => {
            let (_, bucket) = repository.subcategory(&subcategory)?;
            let rows = list_view::view(&bucket.orders, &view.filter()?, view.sort()?);
            let dir = out.unwrap_or_else(|| settings.export_dir());
            let path = export::write_export(
                &dir,
                &bucket.name,
                Local::now().date_naive(),
                &bucket.orders,
                &rows,
            )
            .context("export failed")?;
            println!("wrote {} rows to {}", rows.len(), path.display());
        }
    }

    Ok(())
}
