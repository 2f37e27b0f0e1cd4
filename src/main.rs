//! Loan quoting CLI
//!
//! Command-line interface for quotes, schedules, and application checks

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use loan_origination::application::{ApplicationDraft, FormStep, LoanPurpose};
use loan_origination::quote::{format_amount, months_from_number};
use loan_origination::rates::{loader::DEFAULT_RATES_PATH, RatePolicy};
use loan_origination::runner::{loader, QuoteRequest, QuoteRunner};

#[derive(Debug, Parser)]
#[command(name = "loanq", version, about = "Loan quotes: monthly payment, schedule, application checks")]
struct Cli {
    /// Rate table (purpose,annual_rate); defaults to data/rates.csv when present
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote one loan
    Quote {
        /// Amount borrowed (XOF)
        #[arg(short, long)]
        amount: f64,

        /// Duration in months
        #[arg(short, long)]
        duration: f64,

        /// Loan purpose (home, car, renovation, personal, business, other)
        #[arg(short, long)]
        purpose: Option<LoanPurpose>,

        /// Annual rate override, e.g. 0.03
        #[arg(long)]
        rate: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print or export the amortization schedule
    Schedule {
        #[arg(short, long)]
        amount: f64,

        #[arg(short, long)]
        duration: f64,

        #[arg(short, long)]
        purpose: Option<LoanPurpose>,

        /// First due date (YYYY-MM-DD)
        #[arg(long)]
        first_due: Option<NaiveDate>,

        /// Write the full schedule to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows to print to the console
        #[arg(long, default_value_t = 12)]
        rows: usize,
    },
    /// Quote every row of a CSV file
    Batch {
        /// Input CSV (amount,duration[,purpose])
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long, default_value = "quotes_output.csv")]
        output: PathBuf,
    },
    /// Compare one amount over several durations
    Compare {
        #[arg(short, long)]
        amount: f64,

        /// Comma-separated durations in months
        #[arg(short, long, value_delimiter = ',', default_values_t = [12, 24, 36, 60, 84, 120])]
        durations: Vec<u32>,

        #[arg(short, long)]
        purpose: Option<LoanPurpose>,
    },
    /// Validate a saved application draft (JSON) and print its payload
    Check {
        /// Draft file
        draft: PathBuf,

        /// User id attached to the payload
        #[arg(long, default_value = "1")]
        user_id: String,
    },
}

fn load_policy(path: Option<&Path>) -> Result<RatePolicy> {
    match path {
        Some(p) => RatePolicy::from_csv_path(p)
            .with_context(|| format!("failed to load rates from {}", p.display())),
        None if Path::new(DEFAULT_RATES_PATH).exists() => {
            log::info!("using rate table {}", DEFAULT_RATES_PATH);
            RatePolicy::from_csv_path(Path::new(DEFAULT_RATES_PATH))
                .with_context(|| format!("failed to load rates from {}", DEFAULT_RATES_PATH))
        }
        None => Ok(RatePolicy::indicative()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let policy = load_policy(cli.rates.as_deref())?;

    match cli.command {
        Command::Quote { amount, duration, purpose, rate, json } => {
            let policy = match rate {
                Some(r) => RatePolicy::flat(r).context("invalid --rate")?,
                None => policy,
            };
            run_quote(QuoteRunner::new(policy), amount, duration, purpose, json)
        }
        Command::Schedule { amount, duration, purpose, first_due, output, rows } => {
            run_schedule(QuoteRunner::new(policy), amount, duration, purpose, first_due, output, rows)
        }
        Command::Batch { input, output } => run_batch(QuoteRunner::new(policy), &input, &output),
        Command::Compare { amount, durations, purpose } => {
            run_compare(QuoteRunner::new(policy), amount, &durations, purpose);
            Ok(())
        }
        Command::Check { draft, user_id } => run_check(&policy, &draft, &user_id),
    }
}

fn run_quote(
    runner: QuoteRunner,
    amount: f64,
    duration: f64,
    purpose: Option<LoanPurpose>,
    json: bool,
) -> Result<()> {
    let request = QuoteRequest::new(amount, months_from_number(duration), purpose);
    let record = runner.quote(&request);

    if json {
        let body = serde_json::json!({
            "amount": amount,
            "duration_months": request.duration_months,
            "annual_rate": record.annual_rate,
            "monthly_payment": record.outcome.monthly_payment(),
            "display": record.outcome.to_string(),
            "error": record.outcome.message(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Montant:  {}", format_amount(amount.round() as i64));
    println!("Durée:    {} mois", request.duration_months);
    println!("Taux:     {:.2}%", record.annual_rate * 100.0);
    println!("Mensualité estimée: {}/mois", record.outcome);
    if let Some(message) = record.outcome.message() {
        println!("  {}", message);
    }
    Ok(())
}

fn run_schedule(
    runner: QuoteRunner,
    amount: f64,
    duration: f64,
    purpose: Option<LoanPurpose>,
    first_due: Option<NaiveDate>,
    output: Option<PathBuf>,
    rows: usize,
) -> Result<()> {
    let request = QuoteRequest::new(amount, months_from_number(duration), purpose);
    let schedule = match runner.schedule(&request, first_due) {
        Ok(s) => s,
        Err(err) => {
            println!("N/A: {}", err);
            return Ok(());
        }
    };

    println!("{:>6} {:>12} {:>14} {:>12} {:>12} {:>12} {:>14}",
        "Period", "Due", "Opening", "Payment", "Interest", "Principal", "Closing");
    println!("{}", "-".repeat(90));

    for row in schedule.rows.iter().take(rows) {
        let due = row.due_date.map(|d| d.to_string()).unwrap_or_default();
        println!("{:>6} {:>12} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.period, due, row.opening_balance, row.payment, row.interest, row.principal, row.closing_balance);
    }
    if schedule.rows.len() > rows {
        println!("... ({} more periods)", schedule.rows.len() - rows);
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Periods:        {}", summary.periods);
    println!("  Total paid:     {}", format_amount(summary.total_paid.round() as i64));
    println!("  Total interest: {}", format_amount(summary.total_interest.round() as i64));

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for row in &schedule.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_batch(runner: QuoteRunner, input: &Path, output: &Path) -> Result<()> {
    let start = std::time::Instant::now();
    let requests = loader::load_requests(input)
        .with_context(|| format!("failed to load requests from {}", input.display()))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let records = runner.quote_batch(&requests);
    loader::write_records(output, &records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let quoted = records.iter().filter(|r| r.outcome.is_applicable()).count();
    println!("Quoted {} of {} requests", quoted, records.len());
    println!("Output written to {}", output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn run_compare(runner: QuoteRunner, amount: f64, durations: &[u32], purpose: Option<LoanPurpose>) {
    println!("{:>8} {:>18} {:>18}", "Months", "Monthly", "Total interest");
    println!("{}", "-".repeat(46));

    for record in runner.quote_durations(amount, durations, purpose) {
        let months = record.request.duration_months;
        match record.outcome.monthly_payment() {
            Some(payment) => {
                let interest = payment * months as i64 - amount.round() as i64;
                println!("{:>8} {:>18} {:>18}", months, format_amount(payment), format_amount(interest));
            }
            None => println!("{:>8} {:>18} {:>18}", months, record.outcome, "-"),
        }
    }
}

fn run_check(policy: &RatePolicy, path: &Path, user_id: &str) -> Result<()> {
    let draft = ApplicationDraft::from_json_path(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;

    let mut complete = true;
    for step in FormStep::ALL {
        let errors = draft.validate_step(step);
        if errors.is_valid() {
            println!("[ok]   {}. {}", step.number(), step.title());
        } else {
            complete = false;
            println!("[todo] {}. {}", step.number(), step.title());
            for (field, message) in errors.iter() {
                println!("         {}: {}", field, message);
            }
        }
    }

    let outcome = draft.quote(policy);
    println!("\nMensualité estimée: {}/mois", outcome);
    if let Some(message) = outcome.message() {
        println!("  {}", message);
    }

    if let Some(a) = draft.affordability(policy) {
        println!("Taux d'endettement: {:.1}% ({})", a.debt_ratio * 100.0,
            if a.within_limit() { "dans la limite de 35%" } else { "au-dessus de 35%" });
    }

    if complete {
        let payload = draft.payload(user_id, policy);
        println!("\n{}", serde_json::to_string_pretty(&payload.to_json())?);
    } else {
        log::warn!("draft {} is incomplete; payload not built", path.display());
    }
    Ok(())
}
