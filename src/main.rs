//! Analyzer CLI - ledger node, simulation and interaction tooling

use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artist_income_analyzer::accounts::{dev_addresses, dev_signer, parse_address, signer_from_key};
use artist_income_analyzer::api::create_router;
use artist_income_analyzer::cli::{Cli, Command};
use artist_income_analyzer::client::NodeClient;
use artist_income_analyzer::config::{Config, NetworkConfig};
use artist_income_analyzer::deployment::DeploymentRecord;
use artist_income_analyzer::node::LedgerNode;
use artist_income_analyzer::simulation::run_simulation;

const CLIENT_TIMEOUT_SECONDS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize tracing
    init_tracing(&config.service.log_level);

    print_banner();

    let network = config.network(&cli.network)?;
    info!(
        "Network: {} (chain {}, {})",
        cli.network, network.chain_id, network.url
    );

    match &cli.command {
        Command::Node { host, port } => {
            run_node(&cli, &config, &network, host.clone(), *port).await?
        }
        Command::Simulate => simulate(&cli, &network).await?,
        Command::Interact => interact(&cli, &config, &network).await?,
        Command::ContractInfo { address } => contract_info(&network, address).await?,
        Command::DeployStatus => deploy_status(&cli, &config, &network).await?,
        Command::Accounts => list_accounts()?,
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║        PRIVATE ARTIST INCOME ANALYZER                ║".bright_cyan());
    println!("{}", "║        Confidential earnings, aggregate insight      ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

/// `--private-key`, then the network's configured key, then dev account #0
/// on local networks
fn resolve_signer(cli: &Cli, network: &NetworkConfig) -> Result<PrivateKeySigner> {
    if let Some(key) = cli.private_key.as_deref().or(network.private_key.as_deref()) {
        return Ok(signer_from_key(key)?);
    }
    if network.is_local() {
        return Ok(dev_signer(0)?);
    }
    anyhow::bail!(
        "No signer for network '{}': set PRIVATE_KEY or networks.{}.private_key",
        cli.network,
        cli.network
    )
}

fn client_for(network: &NetworkConfig) -> Result<NodeClient> {
    NodeClient::new(&network.url, CLIENT_TIMEOUT_SECONDS)
        .with_context(|| format!("Failed to create client for {}", network.url))
}

async fn run_node(
    cli: &Cli,
    config: &Config,
    network: &NetworkConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let deployer = resolve_signer(cli, network)?.address();
    println!("{}", "Deploying PrivateArtistIncomeAnalyzer...".bright_green().bold());
    println!("  Deployer: {}", deployer);

    let (node, record) = LedgerNode::deploy(&cli.network, network.chain_id, deployer);
    let path = record.save(&config.deployments.dir)?;

    println!("  Contract: {}", record.contract_address);
    println!("  Tx hash:  {}", record.transaction_hash);
    println!("  Block:    {}", record.block_number);
    println!("  Record:   {}", path.display());
    println!();
    println!("{}", "Next steps:".bright_yellow().bold());
    println!("  1. analyzer --network {} interact", cli.network);
    println!(
        "  2. analyzer --network {} contract-info --address {}",
        cli.network, record.contract_address
    );
    println!("  3. analyzer --network {} simulate", cli.network);
    println!();

    let mut config = config.clone();
    if let Some(host) = host {
        config.service.host = host;
    }
    if let Some(port) = port {
        config.service.port = port;
    }
    let addr = config.bind_address();

    info!(
        "Ledger node for {} (chain {}) listening on {}",
        node.network(),
        node.chain_id(),
        addr
    );
    let app = create_router(Arc::new(node));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app).await?;

    Ok(())
}

async fn simulate(cli: &Cli, network: &NetworkConfig) -> Result<()> {
    println!("{}", "Running income analysis simulation...".bright_green().bold());
    println!();

    let sim = run_simulation(&cli.network, network.chain_id).await?;

    println!("{}", "Participants:".bright_yellow());
    println!("  Contract: {}", sim.contract_address);
    println!("  Owner:    {}", sim.owner);
    println!("  Analyst:  {}", sim.analyst);
    for (address, profile) in sim.artists.iter().zip(&sim.profiles) {
        println!(
            "  Artist #{}: {} ({}, active: {})",
            profile.artist_number, address, profile.artist_id, profile.is_active
        );
    }
    println!();

    println!("{}", "Platform stats:".bright_yellow());
    println!(
        "  Before analysis: {} artists, session {}",
        sim.stats_before.total_artists_count, sim.stats_before.current_session_id
    );
    println!(
        "  After analysis:  {} artists, session {}, last report at {}",
        sim.stats_after.total_artists_count,
        sim.stats_after.current_session_id,
        sim.stats_after.last_report_timestamp
    );
    println!();

    let report = &sim.report;
    println!("{}", format!("Aggregate report (session {}):", sim.analyzed_session).bright_yellow());
    println!("  Participating artists: {}", report.participating_artists);
    println!("  Total income:          {}", report.total_income);
    println!("  Artworks sold:         {}", report.total_artworks_sold);
    println!("  Royalty earnings:      {}", report.total_royalty_earnings);
    println!("  Commission earnings:   {}", report.total_commission_earnings);
    if let Some(average) = report.average_income() {
        println!("  Average income:        {}", average);
    }
    println!("  Digital art sales:     {}", report.creative.digital_art_sales);
    println!("  Physical art sales:    {}", report.creative.physical_art_sales);
    println!("  NFT sales:             {}", report.creative.nft_sales);
    println!("  Licensing revenue:     {}", report.creative.licensing_revenue);
    println!("  Workshop earnings:     {}", report.creative.workshop_earnings);
    println!("  Custom commissions:    {}", report.creative.custom_commissions);
    println!();

    if let Some(rejection) = &sim.outsider_rejection {
        println!(
            "{} outsider {} rejected: {}",
            "Access control:".bright_yellow(),
            sim.outsider,
            rejection.to_string().red()
        );
    }
    println!(
        "{}",
        format!("Simulation complete, {} blocks mined", sim.blocks_mined)
            .bright_green()
            .bold()
    );

    Ok(())
}

async fn interact(cli: &Cli, config: &Config, network: &NetworkConfig) -> Result<()> {
    let record = DeploymentRecord::require_latest(&config.deployments.dir, &cli.network)?;
    let signer = resolve_signer(cli, network)?;
    let client = client_for(network)?.with_signer(signer.clone());
    let signer = signer.address();

    let status = client.node_status().await?;
    if status.contract_address != record.contract_address {
        warn!(
            "Latest deployment record points at {}, node hosts {}",
            record.contract_address, status.contract_address
        );
    }

    println!("{}", "Contract:".bright_yellow().bold());
    println!("  Address:  {}", record.contract_address);
    println!("  Deployed: {} in block {}", record.timestamp, record.block_number);
    println!("  Owner:    {}", client.owner().await?);

    let stats = client.get_platform_stats().await?;
    println!("{}", "Platform stats:".bright_yellow().bold());
    println!("  Total artists:    {}", stats.total_artists_count);
    println!("  Current session:  {}", stats.current_session_id);
    println!("  Last report:      {}", stats.last_report_timestamp);

    let registered = client.is_registered_artist(signer).await?;
    let analyst = client.is_authorized_analyst(signer).await?;
    println!("{}", "Signer:".bright_yellow().bold());
    println!("  Address:    {}", signer);
    println!("  Registered: {}", registered);
    println!("  Analyst:    {}", analyst);

    if registered {
        match client.get_my_profile().await {
            Ok(profile) => {
                println!("  Artist ID:  {}", profile.artist_id);
                println!("  Created:    {}", profile.profile_created);
                println!("  Active:     {}", profile.is_active);
            }
            Err(e) => warn!("Could not read profile of {}: {}", signer, e),
        }
    }

    Ok(())
}

async fn contract_info(network: &NetworkConfig, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let client = client_for(network)?;
    let status = client.node_status().await?;

    if status.contract_address != address {
        println!("{} {}", "No contract found at address".red(), address);
        return Ok(());
    }

    println!("{}", format!("{} at {}", status.contract_name, address).bright_yellow().bold());
    println!("  Owner:           {}", client.owner().await?);
    println!("  Total artists:   {}", client.total_artists().await?);
    println!("  Current session: {}", client.analysis_session_id().await?);

    Ok(())
}

async fn deploy_status(cli: &Cli, config: &Config, network: &NetworkConfig) -> Result<()> {
    let client = client_for(network)?;
    let status = client.node_status().await?;

    println!("{}", "Deployment status:".bright_yellow().bold());
    println!("  Network:      {}", status.network);
    println!("  Chain ID:     {}", status.chain_id);
    println!("  Block number: {}", status.block_number);
    println!("  Contract:     {}", status.contract_address);
    println!("  Transactions: {}", status.transaction_count);

    match DeploymentRecord::latest_for_network(&config.deployments.dir, &cli.network)? {
        Some(record) => println!("  Last record:  {} ({})", record.file_name(), record.timestamp),
        None => println!("  Last record:  none for '{}'", cli.network),
    }

    Ok(())
}

fn list_accounts() -> Result<()> {
    println!("{}", "Development accounts:".bright_yellow().bold());
    for (index, address) in dev_addresses()?.iter().enumerate() {
        println!("  #{} {}", index, address);
    }
    println!();
    println!("{}", "These keys are public. Use them on local networks only.".red());

    Ok(())
}
