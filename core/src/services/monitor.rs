use crate::models::{DashboardTotals, HostMetrics, Peer, PeerId, SeriesId, ServerStatsRaw};
use crate::services::api::ApiClient;
use crate::services::metrics::MetricsStore;
use crate::services::poller::Poller;
use crate::services::units::{parse_io_pair, parse_magnitude};
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Fixed series keys for figures that are not tied to a single peer.
pub const TOTAL_RX: &str = "total:rx";
pub const TOTAL_TX: &str = "total:tx";
pub const HOST_CPU: &str = "host:cpu";
pub const HOST_MEMORY: &str = "host:memory";
pub const HOST_NET_RX: &str = "host:net-rx";
pub const HOST_NET_TX: &str = "host:net-tx";

/// Normalize the raw docker-stats strings into chartable figures. Bad
/// strings zero the affected figure; the tick is never lost.
pub fn parse_server_stats(raw: &ServerStatsRaw) -> HostMetrics {
    let (mem_used_mb, mem_limit_mb) = parse_io_pair(&raw.mem_usage);
    let (net_rx_mb, net_tx_mb) = parse_io_pair(&raw.net_io);
    let (block_read_mb, block_write_mb) = parse_io_pair(&raw.block_io);

    HostMetrics {
        cpu_percent: parse_magnitude(&raw.cpu_perc),
        mem_percent: parse_magnitude(&raw.mem_perc),
        mem_used_mb,
        mem_limit_mb,
        net_rx_mb,
        net_tx_mb,
        block_read_mb,
        block_write_mb,
        pids: raw.pids.trim().parse().unwrap_or(0),
    }
}

pub async fn apply_totals(rx: &MetricsStore, tx: &MetricsStore, totals: &DashboardTotals) {
    rx.append(&SeriesId::from(TOTAL_RX), totals.total_rx).await;
    tx.append(&SeriesId::from(TOTAL_TX), totals.total_tx).await;
}

pub async fn apply_peer_traffic(rx: &MetricsStore, tx: &MetricsStore, peers: &[Peer]) {
    for peer in peers {
        rx.append(&SeriesId::rx(&peer.id), peer.rx).await;
        tx.append(&SeriesId::tx(&peer.id), peer.tx).await;
    }
}

pub async fn apply_host_metrics(store: &MetricsStore, host: &HostMetrics) {
    store.append(&SeriesId::from(HOST_CPU), host.cpu_percent).await;
    store
        .append(&SeriesId::from(HOST_MEMORY), host.mem_percent)
        .await;
    store.append(&SeriesId::from(HOST_NET_RX), host.net_rx_mb).await;
    store.append(&SeriesId::from(HOST_NET_TX), host.net_tx_mb).await;
}

/// Drives the dashboard traffic charts: one poller for the aggregate totals,
/// one for the per-peer counters, both feeding fixed-capacity windows. A
/// monitor lives as long as its owning view; dropping it stops both cycles.
pub struct TrafficMonitor {
    rx: MetricsStore,
    tx: MetricsStore,
    latest_totals: Arc<RwLock<Option<DashboardTotals>>>,
    totals_poller: Poller,
    peers_poller: Poller,
}

impl TrafficMonitor {
    pub fn new(window_points: usize) -> Self {
        Self {
            rx: MetricsStore::new(window_points),
            tx: MetricsStore::new(window_points),
            latest_totals: Arc::new(RwLock::new(None)),
            totals_poller: Poller::new("dashboard-totals"),
            peers_poller: Poller::new("peer-traffic"),
        }
    }

    pub fn rx_store(&self) -> &MetricsStore {
        &self.rx
    }

    pub fn tx_store(&self) -> &MetricsStore {
        &self.tx
    }

    /// Most recent totals payload, for the summary cards.
    pub async fn latest_totals(&self) -> Option<DashboardTotals> {
        self.latest_totals.read().await.clone()
    }

    pub fn start_totals(
        &mut self,
        client: ApiClient,
        is_admin: bool,
        interval: Duration,
    ) -> Result<()> {
        let rx = self.rx.clone();
        let tx = self.tx.clone();
        let latest = self.latest_totals.clone();

        self.totals_poller.start(
            interval,
            move || {
                let client = client.clone();
                async move { Ok(client.dashboard_totals(is_admin).await?) }
            },
            move |totals: DashboardTotals| {
                let rx = rx.clone();
                let tx = tx.clone();
                let latest = latest.clone();
                async move {
                    apply_totals(&rx, &tx, &totals).await;
                    *latest.write().await = Some(totals);
                }
            },
        )
    }

    /// Shared plumbing for the per-peer pipelines: any fetch that yields a
    /// batch of peer records feeds the per-peer windows.
    pub fn start_peer_source<F, Fut>(&mut self, interval: Duration, fetch: F) -> Result<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<Peer>>> + Send + 'static,
    {
        let rx = self.rx.clone();
        let tx = self.tx.clone();

        self.peers_poller.start(interval, fetch, move |peers: Vec<Peer>| {
            let rx = rx.clone();
            let tx = tx.clone();
            async move { apply_peer_traffic(&rx, &tx, &peers).await }
        })
    }

    /// Poll the peers owned by one user (dashboard and user-peer views).
    pub fn start_peers(
        &mut self,
        client: ApiClient,
        user_id: String,
        interval: Duration,
    ) -> Result<()> {
        self.start_peer_source(interval, move || {
            let client = client.clone();
            let user_id = user_id.clone();
            async move { Ok(client.peers_for_user(&user_id).await?) }
        })
    }

    /// Poll a single peer (peer-detail view).
    pub fn start_peer(
        &mut self,
        client: ApiClient,
        peer_id: PeerId,
        interval: Duration,
    ) -> Result<()> {
        self.start_peer_source(interval, move || {
            let client = client.clone();
            let peer_id = peer_id.clone();
            async move { Ok(vec![client.peer(&peer_id).await?]) }
        })
    }

    /// Poll a fixed set of peers by assigned IP (finder view).
    pub fn start_peers_by_ips(
        &mut self,
        client: ApiClient,
        ips: Vec<String>,
        interval: Duration,
    ) -> Result<()> {
        self.start_peer_source(interval, move || {
            let client = client.clone();
            let ips = ips.clone();
            async move { Ok(client.peers_by_ips(&ips).await?) }
        })
    }

    pub fn stop(&mut self) {
        self.totals_poller.stop();
        self.peers_poller.stop();
    }

    pub fn is_running(&self) -> bool {
        self.totals_poller.is_running() || self.peers_poller.is_running()
    }
}

/// Drives the sidebar host gauges at their slower cadence.
pub struct HostStatsMonitor {
    store: MetricsStore,
    poller: Poller,
}

impl HostStatsMonitor {
    pub fn new(window_points: usize) -> Self {
        Self {
            store: MetricsStore::new(window_points),
            poller: Poller::new("host-stats"),
        }
    }

    pub fn store(&self) -> &MetricsStore {
        &self.store
    }

    pub fn start(&mut self, client: ApiClient, interval: Duration) -> Result<()> {
        let store = self.store.clone();

        self.poller.start(
            interval,
            move || {
                let client = client.clone();
                async move { Ok(client.server_stats().await?) }
            },
            move |raw: ServerStatsRaw| {
                let store = store.clone();
                async move {
                    let host = parse_server_stats(&raw);
                    apply_host_metrics(&store, &host).await;
                }
            },
        )
    }

    pub fn stop(&mut self) {
        self.poller.stop();
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_running()
    }
}
