use anyhow::{Context, Result};
use peerview_core::models::{AppConfig, Credentials, SeriesId};
use peerview_core::services::monitor::{HOST_CPU, HOST_MEMORY, TOTAL_RX, TOTAL_TX};
use peerview_core::{
    format_data_size, ApiClient, HostStatsMonitor, SessionStore, TrafficMonitor, SUMMARY_CARDS,
};
use std::time::Duration;

/// Headless console: logs in, starts the pollers, and periodically logs the
/// rolling-window snapshots a UI would chart.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;
    tracing::info!("backend: {}", config.base_url);

    let client = ApiClient::new(config.base_url.clone());
    let session = SessionStore::new();

    let credentials = Credentials {
        username: std::env::var("PEERVIEW_USERNAME").context("PEERVIEW_USERNAME is not set")?,
        password: std::env::var("PEERVIEW_PASSWORD").context("PEERVIEW_PASSWORD is not set")?,
    };
    client.login(&credentials).await?;

    let user = client.current_user().await?;
    tracing::info!("logged in as {} ({})", user.username, user.role);
    session.set_user(user.clone()).await;

    let mut traffic = TrafficMonitor::new(config.traffic_window_points);
    traffic.start_totals(
        client.clone(),
        session.is_admin().await,
        config.peer_poll_interval(),
    )?;
    traffic.start_peers(client.clone(), user.id.clone(), config.peer_poll_interval())?;

    let mut host = HostStatsMonitor::new(config.traffic_window_points);
    host.start(client.clone(), config.host_poll_interval())?;

    // Optional finder pipeline: watch a fixed set of peers by assigned IP,
    // over the wider finder window.
    let mut finder = match std::env::var("PEERVIEW_FINDER_IPS") {
        Ok(raw) => {
            let ips: Vec<String> = raw
                .split(',')
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty())
                .collect();
            if ips.is_empty() {
                None
            } else {
                tracing::info!("finder watching {} peer(s)", ips.len());
                let mut monitor = TrafficMonitor::new(config.finder_window_points);
                monitor.start_peers_by_ips(client.clone(), ips, config.peer_poll_interval())?;
                Some(monitor)
            }
        }
        Err(_) => None,
    };

    tracing::info!("polling started, press Ctrl-C to exit");

    let mut render = tokio::time::interval(Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = render.tick() => {
                render_snapshot(&traffic, &host).await;
                if let Some(finder) = &finder {
                    let series = finder.rx_store().snapshot_all().await;
                    tracing::info!("finder series: {}", series.len());
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    traffic.stop();
    host.stop();
    if let Some(finder) = finder.as_mut() {
        finder.stop();
    }
    session.reset().await;
    tracing::info!("stopped");
    Ok(())
}

async fn render_snapshot(traffic: &TrafficMonitor, host: &HostStatsMonitor) {
    if let Some(totals) = traffic.latest_totals().await {
        for card in SUMMARY_CARDS {
            tracing::info!("{}: {}", card.title, card.value(&totals));
        }
    }

    let rx = traffic.rx_store().snapshot(&SeriesId::from(TOTAL_RX)).await;
    let tx = traffic.tx_store().snapshot(&SeriesId::from(TOTAL_TX)).await;
    tracing::info!(
        "rx window: [{}]",
        rx.iter()
            .map(|s| format_data_size(s.value))
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "tx window: [{}]",
        tx.iter()
            .map(|s| format_data_size(s.value))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let peer_series = traffic.rx_store().snapshot_all().await;
    // total:rx lives in the same store as the per-peer windows
    tracing::info!("tracked series: {}", peer_series.len());

    let cpu = host.store().latest_value(&SeriesId::from(HOST_CPU)).await;
    let mem = host.store().latest_value(&SeriesId::from(HOST_MEMORY)).await;
    if let (Some(cpu), Some(mem)) = (cpu, mem) {
        tracing::info!("host cpu {:.1}% mem {:.1}%", cpu, mem);
    }
}
