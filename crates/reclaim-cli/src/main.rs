use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use reclaim_core::app::{SweepBuilder, SweepReport};
use reclaim_core::domain::{
    ChestTierMatch, Claim, ClaimId, ClaimKind, OwnerId, OwnerSettings, SweepConfig, WorldId,
    WorldPolicyConfig,
};
use reclaim_core::impls::{
    InMemoryClaimRegistry, NoopPermissionCleaner, NoopRestorer, StaticOptionResolver,
    StaticPolicyConfig, TracingNotifier,
};
use reclaim_core::ports::OptionKey;

/// Run claim expiration sweeps against an in-memory claim store.
#[derive(Debug, Parser)]
#[command(name = "reclaim", version)]
struct Cli {
    /// JSON fixture with worlds, owners, options and claims (built-in demo if omitted).
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Number of sweeps to run before exiting (at least 1).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    sweeps: u64,

    /// Override the sweep period.
    #[arg(long)]
    period_secs: Option<u64>,

    /// Override what happens after a chest-tier match.
    #[arg(long, value_enum)]
    chest_tier_match: Option<ChestTierMatchArg>,

    /// -v: info, -vv: debug, -vvv: trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChestTierMatchArg {
    Continue,
    StopWorld,
    StopSweep,
}

impl From<ChestTierMatchArg> for ChestTierMatch {
    fn from(arg: ChestTierMatchArg) -> Self {
        match arg {
            ChestTierMatchArg::Continue => ChestTierMatch::Continue,
            ChestTierMatchArg::StopWorld => ChestTierMatch::StopWorld,
            ChestTierMatchArg::StopSweep => ChestTierMatch::StopSweep,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionsFixture {
    expiration: i64,
    #[serde(rename = "tax-expiration")]
    tax_expiration: i64,
    #[serde(rename = "tax-expiration-days-keep")]
    tax_expiration_days_keep: i64,
}

#[derive(Debug, Deserialize)]
struct ClaimFixture {
    world_id: WorldId,
    #[serde(flatten)]
    claim: Claim,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    sweep: SweepConfig,
    policy: StaticPolicyConfig,
    options: OptionsFixture,
    claims: Vec<ClaimFixture>,
}

impl Fixture {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
    }

    /// One world, two owners, a handful of claims around the thresholds.
    fn demo() -> Self {
        let now = Utc::now();
        let world_id = WorldId::generate();
        let alice = OwnerId::generate();
        let bob = OwnerId::generate();

        let claim = |owner, kind, area, idle_days| ClaimFixture {
            world_id,
            claim: Claim::new(ClaimId::generate(), owner, kind, area, now - Duration::days(idle_days)),
        };
        let indebted = ClaimFixture {
            world_id,
            claim: Claim::new(ClaimId::generate(), alice, ClaimKind::Basic, 2_500, now)
                .with_tax_arrears(Some(now - Duration::days(30))),
        };

        Self {
            sweep: SweepConfig::default(),
            policy: StaticPolicyConfig::new(WorldPolicyConfig {
                auto_nature_restore: true,
                tax_system_enabled: true,
                ..WorldPolicyConfig::default()
            })
            .with_owner(alice, OwnerSettings::new("alice", 7))
            .with_owner(bob, OwnerSettings::uninitialized("bob")),
            options: OptionsFixture {
                expiration: 14,
                tax_expiration: 7,
                tax_expiration_days_keep: 7,
            },
            claims: vec![
                claim(alice, ClaimKind::Basic, 81, 30),
                claim(alice, ClaimKind::Basic, 81, 2),
                claim(alice, ClaimKind::Basic, 400, 60),
                claim(alice, ClaimKind::Subdivision, 100, 60),
                claim(alice, ClaimKind::Admin, 10_000, 900),
                claim(bob, ClaimKind::Basic, 400, 900),
                indebted,
            ],
        }
    }
}

fn print_report(report: &SweepReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn,reclaim_core=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .init();

    // (A) fixture を読み込む（なければデモデータ）
    let mut fixture = match &cli.fixture {
        Some(path) => Fixture::load(path)?,
        None => Fixture::demo(),
    };
    if let Some(period_secs) = cli.period_secs {
        fixture.sweep.period_secs = period_secs;
    }
    if let Some(mode) = cli.chest_tier_match {
        fixture.sweep.chest_tier_match = mode.into();
    }

    // (B) in-memory のコラボレーターを用意
    let registry = Arc::new(InMemoryClaimRegistry::new());
    for ClaimFixture { world_id, claim } in fixture.claims {
        registry.insert(world_id, claim).await;
    }
    for world_id in fixture.policy.worlds.keys() {
        registry.add_world(*world_id).await;
    }
    let options = StaticOptionResolver::new()
        .with_default(OptionKey::BasicExpiration, fixture.options.expiration)
        .with_default(OptionKey::TaxExpiration, fixture.options.tax_expiration)
        .with_default(OptionKey::TaxExpirationGrace, fixture.options.tax_expiration_days_keep);

    let scheduler = SweepBuilder::new()
        .registry(registry.clone())
        .policy_config(Arc::new(fixture.policy))
        .options(Arc::new(options))
        .restorer(Arc::new(NoopRestorer))
        .permissions(Arc::new(NoopPermissionCleaner))
        .notifier(Arc::new(TracingNotifier))
        .sweep_config(fixture.sweep)
        .build()?;

    // (C) 1 回だけならその場で実行
    if cli.sweeps == 1 {
        let report = scheduler.sweep_once().await?;
        return print_report(&report);
    }

    // (D) 複数回なら定期実行して N 回分のレポートを待つ（Ctrl-C で中断）
    let handle = Arc::new(scheduler).spawn();
    let mut reports = handle.reports();
    let mut seen = 0;
    while seen < cli.sweeps {
        tokio::select! {
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = reports.borrow_and_update().clone();
                if let Some(report) = report {
                    print_report(&report)?;
                    seen += 1;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; finishing current claim");
                break;
            }
        }
    }

    handle.shutdown_and_join().await?;
    Ok(())
}
