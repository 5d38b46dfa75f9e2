//! Journal CLI: account report and settings check.
//!
//! Commands:
//! - `report`: load an account config and a trade snapshot, print the
//!   drawdown, consistency, goal and weekday figures
//! - `check`: validate an account config and print the effective settings
//! - `history`: list trades filtered by year, month, market and result
//! - `equity`: end-of-day balance and drawdown floor per trading date
//! - `goals`: pending and achieved journal goals

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use journal_core::{
    AccountConfig, AccountSummary, ConsistencyStatus, GoalBoard, GoalEntry, MarketFilter,
    Outcome, TradeFilter, TradeLog, TradeRecord,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "journal", about = "Trading journal: drawdown and consistency report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the account summary for a trade snapshot.
    Report {
        /// Path to the account TOML config.
        #[arg(long)]
        account: PathBuf,

        /// Path to a JSON array of trade records.
        #[arg(long)]
        trades: PathBuf,

        /// Reference date for goal progress (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Emit the summary as pretty JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate an account config and print the effective settings.
    Check {
        /// Path to the account TOML config.
        #[arg(long)]
        account: PathBuf,
    },
    /// List trades matching the given filters, oldest first.
    History {
        /// Path to a JSON array of trade records.
        #[arg(long)]
        trades: PathBuf,

        #[arg(long)]
        year: Option<i32>,

        /// Calendar month, 1-12.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// long/bullish, short/bearish, none, or an instrument symbol.
        #[arg(long)]
        market: Option<MarketFilter>,

        /// win, loss or neutral.
        #[arg(long)]
        result: Option<Outcome>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the end-of-day balance and drawdown floor series.
    Equity {
        /// Path to the account TOML config.
        #[arg(long)]
        account: PathBuf,

        /// Path to a JSON array of trade records.
        #[arg(long)]
        trades: PathBuf,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List pending and achieved journal goals.
    Goals {
        /// Path to a JSON array of goal entries.
        #[arg(long)]
        goals: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal=info,journal_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            account,
            trades,
            as_of,
            json,
        } => run_report(&account, &trades, as_of.as_deref(), json),
        Commands::Check { account } => run_check(&account),
        Commands::History {
            trades,
            year,
            month,
            market,
            result,
            json,
        } => {
            let filter = TradeFilter {
                year,
                month,
                market,
                result,
            };
            run_history(&trades, &filter, json)
        }
        Commands::Equity {
            account,
            trades,
            json,
        } => run_equity(&account, &trades, json),
        Commands::Goals { goals } => run_goals(&goals),
    }
}

fn run_report(account: &Path, trades: &Path, as_of: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(account)?;
    let log = load_trades(trades)?;

    let as_of = as_of
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("--as-of must be YYYY-MM-DD")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    info!(trades = log.len(), %as_of, "building account summary");
    let summary = AccountSummary::build(&log, &config, as_of);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn run_check(account: &Path) -> Result<()> {
    let config = load_config(account)?;
    let risk = &config.risk;
    println!("Account:             {}", config.name.as_deref().unwrap_or("(unnamed)"));
    println!("Initial balance:     {}", money(risk.initial_balance));
    println!("Trailing drawdown:   {}", money(risk.trailing_drawdown_amount));
    println!("Buffer threshold:    {}", money(risk.buffer_threshold()));
    println!("Starting floor:      {}", money(risk.base_floor()));
    println!("Consistency limit:   {}%", risk.consistency_percentage);
    println!("Weekly goal:         {}", money(config.goals.weekly));
    println!("Monthly goal:        {}", money(config.goals.monthly));
    Ok(())
}

fn run_history(trades: &Path, filter: &TradeFilter, json: bool) -> Result<()> {
    let log = load_trades(trades)?;
    let matched = log.filter(filter);
    info!(matched = matched.len(), total = log.len(), "history filtered");

    if json {
        println!("{}", serde_json::to_string_pretty(&matched)?);
        return Ok(());
    }
    println!(
        "{:<12} {:<8} {:<6} {:>12}",
        "Date", "Market", "Side", "P&L"
    );
    for t in &matched {
        let side = match t.direction {
            Some(d) => format!("{d:?}"),
            None => "-".to_string(),
        };
        println!(
            "{:<12} {:<8} {:<6} {:>12}",
            t.date.to_string(),
            t.instrument.as_deref().unwrap_or("-"),
            side,
            money(t.contribution())
        );
    }
    println!("{} of {} trades", matched.len(), log.len());
    Ok(())
}

fn run_equity(account: &Path, trades: &Path, json: bool) -> Result<()> {
    let config = load_config(account)?;
    let log = load_trades(trades)?;
    let series = log.equity_series(&config.risk);

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }
    println!("{:<12} {:>14} {:>14}", "Date", "Balance", "Floor");
    for p in &series {
        println!(
            "{:<12} {:>14} {:>14}",
            p.date.to_string(),
            money(p.balance),
            money(p.drawdown_floor)
        );
    }
    Ok(())
}

fn run_goals(path: &Path) -> Result<()> {
    let board = load_goals(path)?;
    println!("Pending:");
    for g in board.pending() {
        println!("  [ ] {}  {}", g.date, g.title);
    }
    println!("Achieved:");
    for g in board.achieved() {
        println!("  [x] {}  {}", g.date, g.title);
    }
    Ok(())
}

fn load_goals(path: &Path) -> Result<GoalBoard> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading goals {}", path.display()))?;
    let entries: Vec<GoalEntry> = serde_json::from_str(&content)
        .with_context(|| format!("parsing goals {}", path.display()))?;
    let board = GoalBoard::from_entries(entries)
        .with_context(|| format!("loading goals {}", path.display()))?;
    Ok(board)
}

fn load_config(path: &Path) -> Result<AccountConfig> {
    let config = AccountConfig::from_file(path)
        .with_context(|| format!("loading account config {}", path.display()))?;
    info!(path = %path.display(), "account config loaded");
    Ok(config)
}

fn load_trades(path: &Path) -> Result<TradeLog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading trades {}", path.display()))?;
    let records: Vec<TradeRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing trades {}", path.display()))?;
    let log = TradeLog::from_records(records)
        .with_context(|| format!("loading trades {}", path.display()))?;
    Ok(log)
}

fn print_summary(s: &AccountSummary) {
    println!();
    println!(
        "=== {} — as of {} ===",
        s.name.as_deref().unwrap_or("Account"),
        s.as_of
    );
    println!("Trades:              {}", s.trade_count);
    println!("Initial balance:     {}", money(s.initial_balance));
    println!("Current balance:     {}", money(s.current_balance));
    println!("P&L:                 {}", money(s.total_pnl));
    println!("ROI:                 {:.2}%", s.roi_pct);
    println!();
    println!("High-water mark:     {}", money(s.drawdown.high_water_mark));
    println!(
        "Drawdown floor:      {}{}",
        money(s.drawdown.drawdown_floor),
        if s.drawdown.floor_locked { " (locked)" } else { "" }
    );
    println!("Margin to floor:     {}", money(s.margin_to_floor));
    if s.breached {
        println!("WARNING: balance is below the drawdown floor");
    }

    println!();
    match &s.consistency {
        Some(c) => {
            let label = match c.status {
                ConsistencyStatus::Ok => "ok",
                ConsistencyStatus::Warning => "warning",
                ConsistencyStatus::Violated => "VIOLATED",
            };
            println!(
                "Consistency:         {:.2}% of {} on {} (limit {}%, {})",
                c.percentage,
                money(c.total_positive),
                c.best_day,
                c.limit_pct,
                label
            );
        }
        None => println!("Consistency:         not enough data"),
    }

    println!(
        "Weekly goal:         {} / {} ({:.2}%)",
        money(s.goals.weekly.pnl),
        money(s.goals.weekly.target),
        s.goals.weekly.percent
    );
    println!(
        "Monthly goal:        {} / {} ({:.2}%)",
        money(s.goals.monthly.pnl),
        money(s.goals.monthly.target),
        s.goals.monthly.percent
    );

    println!();
    println!("{:<5} {:>12} {:>8} {:>8}", "Day", "P&L", "Trades", "Win %");
    for d in &s.weekdays.days {
        println!(
            "{:<5} {:>12} {:>8} {:>7.1}%",
            d.weekday.to_string(),
            money(d.pnl),
            d.trades,
            d.win_rate_pct()
        );
    }

    let st = &s.stats;
    println!();
    println!(
        "Trades won/lost/flat: {}/{}/{}  win rate {:.2}%",
        st.winners, st.losers, st.neutral, st.win_rate_pct
    );
    println!(
        "Gross profit:        {}  gross loss: {}",
        money(st.gross_profit),
        money(st.gross_loss)
    );
    println!(
        "Avg win:             {}  avg loss: {}",
        money(st.avg_win),
        money(st.avg_loss)
    );
    println!(
        "Profit factor:       {}",
        st.profit_factor
            .map_or_else(|| "∞".to_string(), |pf| format!("{pf:.2}"))
    );
    println!("Avg holding time:    {}", st.avg_holding_label());

    if !s.recent.is_empty() {
        println!();
        println!("Recent trades:");
        for t in &s.recent {
            println!("  {}  {:>12}", t.date, money(t.contribution()));
        }
    }
}

fn money(v: f64) -> String {
    format!("${v:.2}")
}
